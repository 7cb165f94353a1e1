//! Line simplification using the Visvalingam-Whyatt algorithm.
//!
//! Each interior vertex "owns" the triangle it forms with its two
//! neighbours. The vertex with the smallest triangle is dropped, its
//! neighbours' triangles are recomputed, and the process repeats until
//! the smallest remaining triangle is at least `epsilon`.
//!
//! `epsilon` is an **area**, in squared coordinate units. Use
//! [`area_tolerance`](crate::simplify::area_tolerance) to derive one from
//! a linear distance.
//!
//! See <https://en.wikipedia.org/wiki/Visvalingam%E2%80%93Whyatt_algorithm>.

use crate::geometry::triangle_area;
use crate::types::{Point, Polyline};

/// Simplify a polyline with the Visvalingam-Whyatt algorithm.
///
/// A vertex is removed while its triangle area is strictly less than
/// `epsilon`; an area equal to `epsilon` is kept. When several vertices
/// share the smallest area, the one nearest the start of the line goes
/// first. The first and last points are never removed.
///
/// Returns `None` for polylines with fewer than 3 points: there is no
/// triangle to measure, so the line cannot be simplified.
#[must_use = "returns the simplified polyline"]
pub fn simplify(polyline: &Polyline, epsilon: f64) -> Option<Polyline> {
    if polyline.len() < 3 {
        return None;
    }

    let mut points: Vec<Point> = polyline.points().to_vec();

    // areas[i] belongs to interior vertex points[i + 1].
    let mut areas: Vec<f64> = points
        .windows(3)
        .map(|w| triangle_area(w[0], w[1], w[2]))
        .collect();

    while points.len() >= 3 {
        let Some((slot, min_area)) = smallest_area(&areas) else {
            break;
        };
        if min_area >= epsilon {
            break;
        }

        let vertex = slot + 1;
        tracing::trace!(vertex, area = min_area, "removing vertex");
        points.remove(vertex);
        areas.remove(slot);

        // Only the two vertices adjacent to the removed one changed
        // neighbours; every other triangle is untouched.
        if vertex >= 2 {
            areas[vertex - 2] =
                triangle_area(points[vertex - 2], points[vertex - 1], points[vertex]);
        }
        if vertex + 1 < points.len() {
            areas[vertex - 1] =
                triangle_area(points[vertex - 1], points[vertex], points[vertex + 1]);
        }
    }

    tracing::debug!(
        before = polyline.len(),
        after = points.len(),
        epsilon,
        "visvalingam simplification done",
    );

    Some(Polyline::new(points))
}

/// Index and value of the smallest area, first occurrence on ties.
///
/// NaN areas never compare smaller and are skipped.
fn smallest_area(areas: &[f64]) -> Option<(usize, f64)> {
    let mut best: Option<(usize, f64)> = None;
    for (i, &area) in areas.iter().enumerate() {
        if area < best.map_or(f64::INFINITY, |(_, a)| a) {
            best = Some((i, area));
        }
    }
    best
}
