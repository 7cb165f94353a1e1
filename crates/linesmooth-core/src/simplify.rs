//! Simplifier selection and configuration.
//!
//! This module defines the [`Simplifier`] trait for pluggable line
//! simplification algorithms and the [`SimplifierKind`] enum for
//! selecting which algorithm to use at runtime.
//!
//! # Strategy pattern
//!
//! The two algorithms read their tolerance in different units
//! (Visvalingam-Whyatt an area, Douglas-Peucker a distance) and disagree
//! on lines too short to simplify: Visvalingam-Whyatt reports `None`
//! while Douglas-Peucker hands the input back. The trait keeps that
//! difference visible in its `Option` return rather than hiding it.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::{Polyline, SimplifyError};
use crate::{douglas_peucker, visvalingam};

/// Selects which line simplification algorithm to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SimplifierKind {
    /// Visvalingam-Whyatt: drop the vertex with the smallest effective
    /// triangle area until every remaining area reaches the tolerance.
    ///
    /// Tolerance is an area (squared coordinate units).
    #[default]
    Visvalingam,

    /// Douglas-Peucker: keep vertices that deviate from the local
    /// baseline by more than the tolerance.
    ///
    /// Tolerance is a distance (coordinate units).
    DouglasPeucker,
}

impl fmt::Display for SimplifierKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Visvalingam => f.write_str("Visvalingam-Whyatt"),
            Self::DouglasPeucker => f.write_str("Douglas-Peucker"),
        }
    }
}

/// Trait for line simplification strategies.
///
/// Input: a polyline and a tolerance in the algorithm's own unit.
/// Output: the simplified polyline, or `None` when the algorithm
/// declines to simplify the input.
pub trait Simplifier {
    /// Simplify `polyline` with the given tolerance.
    fn simplify(&self, polyline: &Polyline, tolerance: f64) -> Option<Polyline>;
}

impl Simplifier for SimplifierKind {
    fn simplify(&self, polyline: &Polyline, tolerance: f64) -> Option<Polyline> {
        match *self {
            Self::Visvalingam => visvalingam::simplify(polyline, tolerance),
            Self::DouglasPeucker => Some(douglas_peucker::simplify(polyline, tolerance)),
        }
    }
}

/// Simplify multiple polylines, applying the same simplifier to each
/// independently.
#[must_use = "returns the simplified polylines"]
pub fn simplify_paths(
    polylines: &[Polyline],
    simplifier: &impl Simplifier,
    tolerance: f64,
) -> Vec<Option<Polyline>> {
    polylines
        .iter()
        .map(|pl| simplifier.simplify(pl, tolerance))
        .collect()
}

/// Convert a linear tolerance into a Visvalingam-Whyatt area tolerance.
///
/// A vertex whose triangle has area `d²` sits roughly `d` off the line
/// for neighbours spaced about `2d` apart, so squaring is the usual way
/// to pick an area threshold from a distance.
#[must_use]
pub fn area_tolerance(distance: f64) -> f64 {
    distance * distance
}

/// Configuration for a simplification run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimplifyConfig {
    /// Which algorithm to run.
    pub algorithm: SimplifierKind,

    /// Tolerance in the algorithm's unit: an area for
    /// [`SimplifierKind::Visvalingam`], a distance for
    /// [`SimplifierKind::DouglasPeucker`].
    pub tolerance: f64,
}

impl SimplifyConfig {
    /// Default algorithm.
    pub const DEFAULT_ALGORITHM: SimplifierKind = SimplifierKind::Visvalingam;

    /// Default tolerance. Zero removes nothing with Visvalingam-Whyatt and
    /// only exactly collinear vertices with Douglas-Peucker.
    pub const DEFAULT_TOLERANCE: f64 = 0.0;

    /// Create a configuration for the given algorithm and tolerance.
    #[must_use]
    pub const fn new(algorithm: SimplifierKind, tolerance: f64) -> Self {
        Self {
            algorithm,
            tolerance,
        }
    }

    /// Check that the tolerance is finite and non-negative.
    ///
    /// # Errors
    ///
    /// Returns [`SimplifyError::InvalidTolerance`] otherwise.
    pub fn validate(&self) -> Result<(), SimplifyError> {
        if self.tolerance.is_finite() && self.tolerance >= 0.0 {
            Ok(())
        } else {
            Err(SimplifyError::InvalidTolerance(self.tolerance))
        }
    }
}

impl Default for SimplifyConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_ALGORITHM, Self::DEFAULT_TOLERANCE)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::types::Point;

    fn line(points: &[(f64, f64)]) -> Polyline {
        points.iter().copied().map(Point::from).collect()
    }

    #[test]
    fn default_is_visvalingam() {
        assert_eq!(SimplifierKind::default(), SimplifierKind::Visvalingam);
    }

    #[test]
    fn kind_display_names() {
        assert_eq!(SimplifierKind::Visvalingam.to_string(), "Visvalingam-Whyatt");
        assert_eq!(SimplifierKind::DouglasPeucker.to_string(), "Douglas-Peucker");
    }

    #[test]
    fn kind_serializes_as_snake_case() {
        let json = serde_json::to_string(&SimplifierKind::DouglasPeucker).unwrap();
        assert_eq!(json, "\"douglas_peucker\"");
    }

    #[test]
    fn short_line_asymmetry_is_preserved() {
        let pl = line(&[(0.0, 0.0), (1.0, 1.0)]);
        assert!(SimplifierKind::Visvalingam.simplify(&pl, 1.0).is_none());
        assert_eq!(
            SimplifierKind::DouglasPeucker.simplify(&pl, 1.0),
            Some(pl.clone()),
        );
    }

    #[test]
    fn simplify_paths_applies_to_each() {
        let polylines = vec![
            line(&[(0.0, 0.0), (1.0, 1.0), (2.0, 2.0)]),
            line(&[(0.0, 0.0), (1.0, 5.0), (2.0, 0.0)]),
            line(&[(0.0, 0.0)]),
        ];
        let results = simplify_paths(&polylines, &SimplifierKind::DouglasPeucker, 0.5);
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].as_ref().unwrap().len(), 2);
        assert_eq!(results[1].as_ref().unwrap().len(), 3);
        assert_eq!(results[2].as_ref().unwrap().len(), 1);

        let results = simplify_paths(&polylines, &SimplifierKind::Visvalingam, 0.5);
        assert_eq!(results[0].as_ref().unwrap().len(), 2);
        assert_eq!(results[1].as_ref().unwrap().len(), 3);
        assert!(results[2].is_none());
    }

    #[test]
    fn area_tolerance_squares_distance() {
        assert!((area_tolerance(0.003) - 0.000_009).abs() < 1e-18);
        assert!((area_tolerance(2.0) - 4.0).abs() < f64::EPSILON);
    }

    #[test]
    fn config_defaults() {
        let config = SimplifyConfig::default();
        assert_eq!(config.algorithm, SimplifierKind::Visvalingam);
        assert!(config.tolerance.abs() < f64::EPSILON);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn config_rejects_bad_tolerances() {
        for tolerance in [-0.5, f64::NAN, f64::INFINITY] {
            let config = SimplifyConfig::new(SimplifierKind::DouglasPeucker, tolerance);
            assert!(
                matches!(config.validate(), Err(SimplifyError::InvalidTolerance(_))),
                "tolerance {tolerance}",
            );
        }
    }

    #[test]
    fn config_serde_round_trip() {
        let config = SimplifyConfig::new(SimplifierKind::DouglasPeucker, 1.5);
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: SimplifyConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, deserialized);
    }

    #[test]
    fn config_missing_fields_use_defaults() {
        let config: SimplifyConfig = serde_json::from_str(r#"{"tolerance": 2.0}"#).unwrap();
        assert_eq!(config.algorithm, SimplifierKind::Visvalingam);
        assert!((config.tolerance - 2.0).abs() < f64::EPSILON);
    }
}
