//! Shared types for the linesmooth simplification core.

use serde::{Deserialize, Serialize};

/// A 2D point in the coordinate space of the input geometry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal coordinate (easting / longitude / x).
    pub x: f64,
    /// Vertical coordinate (northing / latitude / y).
    pub y: f64,
}

impl Point {
    /// Create a new point.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Squared Euclidean distance to another point.
    ///
    /// Avoids the square root for comparison purposes.
    #[must_use]
    pub fn distance_squared(self, other: Self) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx.mul_add(dx, dy * dy)
    }

    /// Euclidean distance to another point.
    #[must_use]
    pub fn distance(self, other: Self) -> f64 {
        self.distance_squared(other).sqrt()
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

/// An ordered sequence of points describing a connected path.
///
/// Order is geometrically significant. Simplifiers only ever drop
/// points from a polyline; they never edit coordinates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Polyline(Vec<Point>);

impl Polyline {
    /// Create a new polyline from a vector of points.
    #[must_use]
    pub const fn new(points: Vec<Point>) -> Self {
        Self(points)
    }

    /// Returns `true` if the polyline has no points.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the number of points in the polyline.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns the first point, if any.
    #[must_use]
    pub fn first(&self) -> Option<&Point> {
        self.0.first()
    }

    /// Returns the last point, if any.
    #[must_use]
    pub fn last(&self) -> Option<&Point> {
        self.0.last()
    }

    /// Returns a slice of all points.
    #[must_use]
    pub fn points(&self) -> &[Point] {
        &self.0
    }

    /// Consumes the polyline and returns the underlying vector of points.
    #[must_use]
    pub fn into_points(self) -> Vec<Point> {
        self.0
    }
}

impl FromIterator<Point> for Polyline {
    fn from_iter<I: IntoIterator<Item = Point>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Errors raised while parsing geometry text or validating a
/// simplification request.
///
/// Having fewer than 3 vertices is deliberately *not* an error: the
/// simplifiers report it through their return values instead.
#[derive(Debug, Clone, PartialEq, thiserror::Error, Serialize, Deserialize)]
pub enum SimplifyError {
    /// The geometry type tag is not `LINESTRING`.
    #[error("unsupported geometry type {tag:?}: only LINESTRING can be simplified")]
    UnsupportedGeometryType {
        /// The tag as it appeared in the input.
        tag: String,
    },

    /// A coordinate tuple could not be read as two finite numbers.
    #[error("malformed coordinate #{position}: {text:?}")]
    MalformedCoordinate {
        /// Zero-based position of the tuple in the coordinate list.
        position: usize,
        /// The offending tuple text.
        text: String,
    },

    /// The coordinate list is not enclosed in parentheses.
    #[error("coordinate list must be enclosed in parentheses")]
    MissingParentheses,

    /// The tolerance is negative, NaN, or infinite.
    #[error("invalid tolerance {0}: must be finite and non-negative")]
    InvalidTolerance(f64),
}
