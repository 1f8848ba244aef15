//! Geometry and coverage predicates.
//!
//! Distances are Euclidean in coordinate-degree units, matching the
//! convention of the demand data. The default radius of `0.03` degrees is
//! roughly 3 km at the target latitude.

use crate::types::{Site, User};

/// Coverage radius applied when a caller does not configure one (≈3 km).
pub const DEFAULT_COVERAGE_RADIUS: f64 = 0.03;

/// Euclidean distance between two positions in degree units.
#[inline]
#[must_use]
pub fn distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    ((lat1 - lat2).powi(2) + (lon1 - lon2).powi(2)).sqrt()
}

/// Returns `true` if `site` covers `user` under the given radius.
///
/// The boundary is inclusive: a user exactly `radius` away is covered.
#[inline]
#[must_use]
pub fn covers(site: &Site, user: &User, radius: f64) -> bool {
    distance(site.lat, site.lon, user.lat, user.lon) <= radius
}

/// Returns `true` if any selected site covers `user`.
///
/// Coverage is OR-combined across the selection, so the scan
/// short-circuits on the first covering site.
#[must_use]
pub fn covered_by_selection(
    user: &User,
    chromosome: &[bool],
    sites: &[Site],
    radius: f64,
) -> bool {
    chromosome
        .iter()
        .zip(sites)
        .any(|(&selected, site)| selected && covers(site, user, radius))
}
