//! Geometric primitives shared by the simplifiers.
//!
//! [`triangle_area`] drives Visvalingam-Whyatt and
//! [`perpendicular_distance`] drives Douglas-Peucker.

use crate::types::Point;

/// Unsigned area of the triangle `p1`, `p2`, `p3` (shoelace formula).
///
/// Collinear triples give 0. Plain products are used rather than
/// `mul_add` so that mirrored products cancel exactly.
#[must_use]
#[allow(clippy::suboptimal_flops)]
pub fn triangle_area(p1: Point, p2: Point, p3: Point) -> f64 {
    (0.5 * ((p2.x - p1.x) * (p3.y - p1.y) - (p3.x - p1.x) * (p2.y - p1.y))).abs()
}

/// Perpendicular distance from point `p` to the line defined by `a` and `b`.
///
/// Uses the formula: |cross(b-a, p-a)| / |b-a|.
/// When `a` and `b` coincide, returns the distance from `p` to `a`.
///
/// The line is infinite: a point beyond either end of `a`-`b` is
/// measured against the extension of the segment, not its nearest
/// endpoint.
#[must_use]
pub fn perpendicular_distance(p: Point, a: Point, b: Point) -> f64 {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let length_sq = dx.mul_add(dx, dy * dy);

    if length_sq == 0.0 {
        return p.distance(a);
    }

    let cross = dx.mul_add(a.y - p.y, -(dy * (a.x - p.x)));
    cross.abs() / length_sq.sqrt()
}
