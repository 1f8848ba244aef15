//! Core record types shared across the crate.

use serde::{Deserialize, Serialize};

/// A candidate charging-station site.
///
/// Sites are immutable inputs to an optimization run: they are generated
/// (or loaded) once and read by every generation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Site {
    /// Stable identifier, unique within one problem.
    pub id: u32,
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lon: f64,
    /// Installation cost. Must be finite and strictly positive.
    pub cost: f64,
}

impl Site {
    /// Creates a site record.
    #[must_use]
    pub fn new(id: u32, lat: f64, lon: f64, cost: f64) -> Self {
        Self { id, lat, lon, cost }
    }
}

/// One demand point: the location of an EV user.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lon: f64,
}

impl User {
    /// Creates a user record.
    #[must_use]
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

/// A candidate solution: one selection bit per candidate site, `true`
/// meaning the site is built.
///
/// Chromosomes are only ever produced by initialization, crossover, or
/// mutation; an evaluated chromosome is never edited in place.
pub type Chromosome = Vec<bool>;

/// The objective vector attached to an evaluated chromosome.
///
/// `[total_cost, -(covered user count)]`. Coverage is negated so that
/// both components are minimized, which keeps dominance comparisons,
/// crowding distance, and truncation on a single uniform convention.
pub type ObjectiveVector = [f64; 2];
