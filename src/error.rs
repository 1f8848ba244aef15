#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Returned when the candidate site list is empty.
    #[error("site list cannot be empty")]
    EmptySites,

    /// Returned when the population size is zero.
    #[error("population size must be positive")]
    InvalidPopulationSize,

    /// Returned when the generation count is zero.
    #[error("generation count must be positive")]
    InvalidGenerations,

    /// Returned when the coverage radius is negative or not finite.
    #[error("invalid coverage radius {radius}: must be finite and non-negative")]
    InvalidCoverageRadius {
        /// The rejected radius value.
        radius: f64,
    },

    /// Returned when a probability parameter lies outside `[0.0, 1.0]`.
    #[error("invalid {name} {value}: must be within [0.0, 1.0]")]
    InvalidProbability {
        /// Which parameter was rejected (e.g. `"crossover_prob"`).
        name: &'static str,
        /// The rejected value.
        value: f64,
    },

    /// Returned when a site record carries a non-finite position or a
    /// non-positive or non-finite installation cost.
    #[error("invalid site {id}: {reason}")]
    InvalidSite {
        /// The offending site's identifier.
        id: u32,
        /// Why the record was rejected.
        reason: &'static str,
    },

    /// Returned when a user record carries a non-finite position.
    #[error("invalid user at index {index}: position must be finite")]
    InvalidUser {
        /// The offending user's index in the input list.
        index: usize,
    },

    /// Returned when a chromosome does not have one bit per candidate site.
    #[error("chromosome length mismatch: expected {expected} bits, got {got}")]
    ChromosomeLengthMismatch {
        /// The number of candidate sites.
        expected: usize,
        /// The actual chromosome length.
        got: usize,
    },
}

pub type Result<T> = core::result::Result<T, Error>;
