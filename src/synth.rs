//! Synthetic demand and candidate-site generation.
//!
//! Real deployments feed the optimizer measured user positions and
//! surveyed site costs; for demos and benchmarks this module fabricates
//! both from a weighted list of city [`Area`]s. The bundled
//! [`pune_areas`] scenario models ten Pune neighborhoods whose density
//! weights drive both how many users are sampled around each center and
//! how expensive a station there is.

use serde::{Deserialize, Serialize};

use crate::rng_util;
use crate::types::{Site, User};

/// Default number of users drawn across all areas.
pub const DEFAULT_TOTAL_USERS: usize = 200;

/// Spread of sampled user positions around their area center, in degrees.
const USER_JITTER: f64 = 0.01;

/// A named city area with a relative EV-user density weight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Area {
    /// Human-readable area name.
    pub name: String,
    /// Latitude of the area center in degrees.
    pub lat: f64,
    /// Longitude of the area center in degrees.
    pub lon: f64,
    /// Relative demand weight. Denser areas draw more users and carry a
    /// higher installation cost.
    pub density: u32,
}

impl Area {
    /// Creates an area record.
    #[must_use]
    pub fn new(name: &str, lat: f64, lon: f64, density: u32) -> Self {
        Self { name: name.to_owned(), lat, lon, density }
    }
}

/// The ten-area Pune scenario used by the demo and the benchmarks.
#[must_use]
pub fn pune_areas() -> Vec<Area> {
    vec![
        Area::new("Hinjawadi", 18.595, 73.735, 20),
        Area::new("Baner", 18.563, 73.789, 15),
        Area::new("Kothrud", 18.507, 73.807, 10),
        Area::new("Hadapsar", 18.498, 73.941, 12),
        Area::new("Viman Nagar", 18.565, 73.911, 10),
        Area::new("Nigdi", 18.650, 73.770, 8),
        Area::new("Koregaon Park", 18.536, 73.896, 18),
        Area::new("Aundh", 18.570, 73.800, 14),
        Area::new("Wakad", 18.600, 73.750, 16),
        Area::new("Pimpri", 18.629, 73.813, 12),
    ]
}

/// Samples user positions around the area centers.
///
/// Each area receives `floor(density / total_density * total_users)`
/// users, scattered uniformly within `±0.01°` of its center on both
/// axes. Rounding down means the returned list can be slightly shorter
/// than `total_users`. Returns no users when every density is zero.
#[must_use]
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn generate_users(rng: &mut fastrand::Rng, areas: &[Area], total_users: usize) -> Vec<User> {
    let total_density: u32 = areas.iter().map(|area| area.density).sum();
    if total_density == 0 {
        return Vec::new();
    }

    let mut users = Vec::new();
    for area in areas {
        let count =
            (f64::from(area.density) / f64::from(total_density) * total_users as f64) as usize;
        for _ in 0..count {
            users.push(User::new(
                area.lat + rng_util::f64_range(rng, -USER_JITTER, USER_JITTER),
                area.lon + rng_util::f64_range(rng, -USER_JITTER, USER_JITTER),
            ));
        }
    }
    users
}

/// Derives one candidate site per area.
///
/// The site sits at the area center with id equal to the area's position
/// in the list. Cost is `100_000 + 5_000 * density` plus uniform noise of
/// up to `±20_000`, so denser areas are pricier but never free.
#[must_use]
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
pub fn generate_sites(rng: &mut fastrand::Rng, areas: &[Area]) -> Vec<Site> {
    areas
        .iter()
        .enumerate()
        .map(|(index, area)| {
            let base_cost = 100_000 + i64::from(area.density) * 5_000;
            let cost = base_cost + rng.i64(-20_000..=20_000);
            Site::new(index as u32, area.lat, area.lon, cost as f64)
        })
        .collect()
}
