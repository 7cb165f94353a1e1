//! Simplification diagnostics: timing and point counts for a run.
//!
//! The core has no clock of its own. Callers pass a [`Clock`] so the
//! crate stays free of platform timers; the CLI supplies one backed by
//! [`std::time::Instant`].
//!
//! Durations are serialized as fractional seconds (`f64`) for JSON
//! compatibility, since `std::time::Duration` does not implement serde
//! traits.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::simplify::{Simplifier, SimplifierKind, SimplifyConfig};
use crate::types::Polyline;

/// Serde support for `std::time::Duration` as fractional seconds.
mod duration_serde {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    /// Serialize a `Duration` as fractional seconds (`f64`).
    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        duration.as_secs_f64().serialize(serializer)
    }

    /// Deserialize a `Duration` from fractional seconds (`f64`).
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let secs = f64::deserialize(deserializer)?;
        Duration::try_from_secs_f64(secs).map_err(|_| {
            serde::de::Error::custom(
                "duration seconds must be finite, non-negative, and representable as a Duration",
            )
        })
    }
}

/// Source of timestamps for diagnostics.
pub trait Clock {
    /// Opaque timestamp type.
    type Instant;

    /// Current timestamp.
    fn now(&self) -> Self::Instant;

    /// Time elapsed since `since`.
    fn elapsed(&self, since: &Self::Instant) -> Duration;
}

/// Diagnostics collected from a single simplification run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimplifyDiagnostics {
    /// Algorithm that ran.
    pub algorithm: SimplifierKind,
    /// Tolerance it ran with.
    pub tolerance: f64,
    /// Points in the input polyline.
    pub points_before: usize,
    /// Points in the output polyline. Equal to `points_before` when the
    /// simplifier declined the input.
    pub points_after: usize,
    /// Fraction of points removed (0.0 to 1.0).
    pub reduction_ratio: f64,
    /// Whether the simplifier produced an output at all.
    pub simplified: bool,
    /// Wall-clock duration of the run (seconds).
    #[serde(with = "duration_serde")]
    pub duration: Duration,
}

impl SimplifyDiagnostics {
    /// Format diagnostics as a one-line human-readable report.
    #[must_use]
    pub fn report(&self) -> String {
        if !self.simplified {
            return format!(
                "{} tol={} {} pts: fewer than 3 points, not simplified ({:.3}ms)",
                self.algorithm,
                self.tolerance,
                self.points_before,
                duration_ms(self.duration),
            );
        }
        format!(
            "{} tol={} {}->{} pts ({:.1}% reduction, {:.3}ms)",
            self.algorithm,
            self.tolerance,
            self.points_before,
            self.points_after,
            self.reduction_ratio * 100.0,
            duration_ms(self.duration),
        )
    }
}

/// Run one simplification and collect diagnostics for it.
///
/// The configuration is not validated here; see
/// [`SimplifyConfig::validate`].
pub fn simplify_with_diagnostics<C: Clock>(
    polyline: &Polyline,
    config: &SimplifyConfig,
    clock: &C,
) -> (Option<Polyline>, SimplifyDiagnostics) {
    let started = clock.now();
    let result = config.algorithm.simplify(polyline, config.tolerance);
    let duration = clock.elapsed(&started);

    let points_before = polyline.len();
    let points_after = result.as_ref().map_or(points_before, Polyline::len);

    let diagnostics = SimplifyDiagnostics {
        algorithm: config.algorithm,
        tolerance: config.tolerance,
        points_before,
        points_after,
        reduction_ratio: reduction_ratio(points_before, points_after),
        simplified: result.is_some(),
        duration,
    };
    (result, diagnostics)
}

/// Fraction of points removed, 0.0 for an empty input.
#[allow(clippy::cast_precision_loss)]
fn reduction_ratio(before: usize, after: usize) -> f64 {
    if before == 0 {
        0.0
    } else {
        before.saturating_sub(after) as f64 / before as f64
    }
}

/// Convert a `Duration` to fractional milliseconds.
fn duration_ms(d: Duration) -> f64 {
    d.as_secs_f64() * 1000.0
}
