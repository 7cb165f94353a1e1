//! Line simplification using the Ramer-Douglas-Peucker algorithm.
//!
//! Reduces point count in polylines by removing points that are within
//! a given tolerance of the line between their neighbors. This is the
//! iterative form: rather than recursing into both halves, it walks an
//! anchor forward along the line. A run that does not fit is split at
//! its farthest point and the old end is pushed onto a stack; once the
//! left half fits, the anchor moves to the split point and the pending
//! end is popped. Runs are visited in the same order as the recursive
//! form, so the kept points match it exactly.
//!
//! `epsilon` is a **linear** distance in coordinate units.

use crate::geometry::perpendicular_distance;
use crate::types::{Point, Polyline};

/// Simplify a single polyline using the Ramer-Douglas-Peucker algorithm.
///
/// Points whose distance to the line through the current anchor and
/// end candidate is at most `epsilon` are removed; a distance exactly
/// equal to `epsilon` is removed too. A negative `epsilon` preserves
/// all points.
///
/// Polylines with fewer than 3 points are returned unchanged (nothing
/// to simplify). The first and last points are always kept.
#[must_use = "returns the simplified polyline"]
pub fn simplify(polyline: &Polyline, epsilon: f64) -> Polyline {
    let points = polyline.points();
    if points.len() < 3 {
        return polyline.clone();
    }

    let mut kept: Vec<Point> = vec![points[0]];
    // Right-hand ends still to be visited, innermost on top.
    let mut pending: Vec<usize> = Vec::new();
    let mut start = 0;
    let mut end = points.len() - 1;

    loop {
        if let Some((index, distance)) = farthest_point(points, start, end)
            && distance > epsilon
        {
            pending.push(end);
            end = index;
            continue;
        }

        tracing::trace!(start, end, "segment fits within tolerance");
        kept.push(points[end]);
        start = end;
        match pending.pop() {
            Some(next) => end = next,
            None => break,
        }
    }

    tracing::debug!(
        before = points.len(),
        after = kept.len(),
        epsilon,
        "douglas-peucker simplification done",
    );

    Polyline::new(kept)
}

/// Finds the point strictly between `start` and `end` that is farthest
/// from the line through them.
///
/// Returns `None` when there are no points in between. On ties the
/// lowest index wins.
fn farthest_point(points: &[Point], start: usize, end: usize) -> Option<(usize, f64)> {
    let mut farthest: Option<(usize, f64)> = None;
    for (i, &p) in points.iter().enumerate().take(end).skip(start + 1) {
        let d = perpendicular_distance(p, points[start], points[end]);
        if farthest.is_none_or(|(_, max)| d > max) {
            farthest = Some((i, d));
        }
    }
    farthest
}
