//! WKT `LINESTRING` codec.
//!
//! Parses `LINESTRING (x1 y1, x2 y2, ...)` text into a [`Polyline`] and
//! serializes a [`Polyline`] back into the same form. No other geometry
//! type is accepted: simplifying points or polygons is out of scope, so
//! any other tag is reported as [`SimplifyError::UnsupportedGeometryType`].
//!
//! ## Formatting
//!
//! Coordinates are written with the shortest `f64` representation that
//! reads back to the same value (Rust's `Display` for `f64`), so
//! `0.0` becomes `0` and no precision is lost: `parse(&serialize(p))`
//! returns `p` for every polyline of finite coordinates.

use std::fmt::Write;

use crate::types::{Point, Polyline, SimplifyError};

/// The only geometry type tag this codec reads and writes.
pub const LINESTRING: &str = "LINESTRING";

/// Parse a WKT `LINESTRING` into a polyline.
///
/// The tag is case-insensitive and surrounding whitespace is ignored.
/// `LINESTRING ()` and `LINESTRING EMPTY` give an empty polyline. A
/// `Z`, `M`, or `ZM` marker is accepted; only the first two ordinates of
/// each tuple are kept.
///
/// # Errors
///
/// - [`SimplifyError::UnsupportedGeometryType`] if the tag is not `LINESTRING`.
/// - [`SimplifyError::MissingParentheses`] if the coordinate list is not
///   enclosed in `(` and `)`.
/// - [`SimplifyError::MalformedCoordinate`] if a tuple has fewer than two
///   numbers, or a number is not a finite float.
///
/// # Examples
///
/// ```
/// use linesmooth_core::{Point, wkt};
///
/// let line = wkt::parse("LineString (30 10, 10 30, 40 40)").unwrap();
/// assert_eq!(line.len(), 3);
/// assert_eq!(line.first(), Some(&Point::new(30.0, 10.0)));
/// ```
pub fn parse(text: &str) -> Result<Polyline, SimplifyError> {
    let text = text.trim();
    let tag_len = text
        .find(|c: char| !c.is_ascii_alphabetic())
        .unwrap_or(text.len());
    let (tag, body) = text.split_at(tag_len);

    if !tag.eq_ignore_ascii_case(LINESTRING) {
        return Err(SimplifyError::UnsupportedGeometryType {
            tag: tag.to_string(),
        });
    }

    let body = strip_dimension_marker(body.trim());
    if body.eq_ignore_ascii_case("EMPTY") {
        return Ok(Polyline::default());
    }

    let inner = body
        .strip_prefix('(')
        .and_then(|b| b.strip_suffix(')'))
        .ok_or(SimplifyError::MissingParentheses)?;

    if inner.trim().is_empty() {
        return Ok(Polyline::default());
    }

    inner
        .split(',')
        .enumerate()
        .map(|(position, tuple)| parse_coordinate(position, tuple))
        .collect()
}

/// Serialize a polyline as a WKT `LINESTRING`.
///
/// An empty polyline becomes `LINESTRING ()`. Strict WKT readers expect
/// `LINESTRING EMPTY` instead; [`parse`] accepts both.
///
/// # Examples
///
/// ```
/// use linesmooth_core::{Point, Polyline, wkt};
///
/// let line = Polyline::new(vec![Point::new(0.0, 0.0), Point::new(2.5, -1.0)]);
/// assert_eq!(wkt::serialize(&line), "LINESTRING (0 0, 2.5 -1)");
/// ```
#[must_use]
pub fn serialize(polyline: &Polyline) -> String {
    let mut out = String::with_capacity(LINESTRING.len() + 3 + polyline.len() * 16);
    out.push_str(LINESTRING);
    out.push_str(" (");
    for (i, p) in polyline.points().iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        let _ = write!(out, "{} {}", p.x, p.y);
    }
    out.push(')');
    out
}

/// Drop a leading `Z`, `M`, or `ZM` dimension marker.
fn strip_dimension_marker(body: &str) -> &str {
    for marker in ["ZM", "Z", "M"] {
        if let Some(prefix) = body.get(..marker.len())
            && prefix.eq_ignore_ascii_case(marker)
        {
            let rest = &body[marker.len()..];
            if rest.starts_with(|c: char| c.is_whitespace() || c == '(') {
                return rest.trim_start();
            }
        }
    }
    body
}

/// Read one `x y [z [m]]` tuple.
fn parse_coordinate(position: usize, tuple: &str) -> Result<Point, SimplifyError> {
    let malformed = || SimplifyError::MalformedCoordinate {
        position,
        text: tuple.trim().to_string(),
    };

    let mut numbers = tuple.split_whitespace().map(|token| {
        token
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(malformed)
    });

    let x = numbers.next().ok_or_else(malformed)??;
    let y = numbers.next().ok_or_else(malformed)??;
    // Extra ordinates are dropped but must still be numbers.
    for extra in numbers {
        extra?;
    }

    Ok(Point::new(x, y))
}
