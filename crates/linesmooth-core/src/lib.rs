//! linesmooth-core: WKT line simplification (sans-IO).
//!
//! Simplifies `LINESTRING` geometries through:
//! WKT parsing -> Visvalingam-Whyatt or Douglas-Peucker -> WKT output.
//!
//! This crate has **no I/O dependencies** -- it operates on in-memory
//! strings and returns structured data. Reading files and printing
//! results lives in `linesmooth-cli`.

pub mod diagnostics;
pub mod douglas_peucker;
pub mod geometry;
pub mod simplify;
pub mod types;
pub mod visvalingam;
pub mod wkt;

pub use diagnostics::{Clock, SimplifyDiagnostics};
pub use simplify::{Simplifier, SimplifierKind, SimplifyConfig, area_tolerance, simplify_paths};
pub use types::{Point, Polyline, SimplifyError};

/// Simplify a WKT `LINESTRING` and return the result as WKT.
///
/// Returns `Ok(None)` when Visvalingam-Whyatt is asked to simplify a
/// line of fewer than 3 points. Douglas-Peucker never returns `None`.
///
/// # Errors
///
/// Returns [`SimplifyError::InvalidTolerance`] if the tolerance is
/// negative or not finite, and any parse error from [`wkt::parse`].
///
/// # Examples
///
/// ```
/// use linesmooth_core::{SimplifierKind, SimplifyConfig, simplify_wkt};
///
/// let config = SimplifyConfig::new(SimplifierKind::Visvalingam, 1.0);
/// let out = simplify_wkt("LINESTRING (0 0, 1 0.01, 2 0)", &config).unwrap();
/// assert_eq!(out.as_deref(), Some("LINESTRING (0 0, 2 0)"));
/// ```
pub fn simplify_wkt(text: &str, config: &SimplifyConfig) -> Result<Option<String>, SimplifyError> {
    config.validate()?;
    let polyline = wkt::parse(text)?;
    let simplified = config.algorithm.simplify(&polyline, config.tolerance);
    if simplified.is_none() {
        tracing::debug!(
            points = polyline.len(),
            algorithm = %config.algorithm,
            "line too short to simplify",
        );
    }
    Ok(simplified.as_ref().map(wkt::serialize))
}
