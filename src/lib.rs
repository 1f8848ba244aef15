#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![deny(unreachable_pub)]
#![deny(clippy::correctness)]
#![deny(clippy::suspicious)]
#![deny(clippy::style)]
#![deny(clippy::complexity)]
#![deny(clippy::perf)]
#![deny(clippy::pedantic)]
#![deny(clippy::std_instead_of_core)]

//! Bi-objective placement optimizer for EV charging stations. Given a set
//! of candidate sites with installation costs and a set of user demand
//! points, it runs NSGA-II to map the Pareto trade-off between total cost
//! and user coverage: every returned solution is a site selection that no
//! other found selection beats on both objectives at once.
//!
//! # Getting Started
//!
//! ```
//! use evsite::prelude::*;
//!
//! // Three candidate sites; both users sit next to the first one.
//! let sites = vec![
//!     Site::new(0, 18.52, 73.85, 120_000.0),
//!     Site::new(1, 18.56, 73.91, 150_000.0),
//!     Site::new(2, 18.60, 73.75, 180_000.0),
//! ];
//! let users = vec![User::new(18.521, 73.851), User::new(18.519, 73.849)];
//!
//! let problem = Problem::with_default_radius(sites, users).unwrap();
//! let report = Optimizer::builder()
//!     .population_size(16)
//!     .generations(10)
//!     .seed(42)
//!     .build()
//!     .unwrap()
//!     .run(&problem);
//!
//! assert!(!report.solutions.is_empty());
//! for pair in report.pareto_front.windows(2) {
//!     assert!(pair[0].cost <= pair[1].cost);
//! }
//! ```
//!
//! # Core Concepts
//!
//! | Type | Role |
//! |------|------|
//! | [`Problem`] | Validated inputs of a run: candidate [`Site`]s, [`User`] demand points, coverage radius. |
//! | [`Optimizer`] | The configured NSGA-II loop, built with [`OptimizerBuilder`]. |
//! | [`Report`] | Pareto-optimal solutions in domain terms, cheapest first. |
//! | [`CancelToken`] | Stops a running optimization between generations. |
//! | [`synth`] | Synthetic demand/site generation, including the Pune demo scenario. |
//!
//! # Feature Flags
//!
//! | Flag | What it enables | Default |
//! |------|-----------------|---------|
//! | `tracing` | Structured log events via [`tracing`](https://docs.rs/tracing) at key points of the evolution loop | off |

/// Emit a `tracing::info!` event when the `tracing` feature is enabled.
/// No-op otherwise.
#[cfg(feature = "tracing")]
macro_rules! trace_info {
    ($($arg:tt)*) => { tracing::info!($($arg)*) };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_info {
    ($($arg:tt)*) => {};
}

/// Emit a `tracing::debug!` event when the `tracing` feature is enabled.
/// No-op otherwise.
#[cfg(feature = "tracing")]
macro_rules! trace_debug {
    ($($arg:tt)*) => { tracing::debug!($($arg)*) };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_debug {
    ($($arg:tt)*) => {};
}

pub mod coverage;
mod engine;
mod error;
pub mod evaluate;
pub mod operators;
pub mod pareto;
mod population;
mod problem;
mod report;
mod rng_util;
pub mod synth;
mod types;

pub use engine::{
    CancelToken, DEFAULT_CROSSOVER_PROB, DEFAULT_GENERATIONS, DEFAULT_INIT_BIAS,
    DEFAULT_POPULATION_SIZE, Optimizer, OptimizerBuilder,
};
pub use error::{Error, Result};
pub use population::{Individual, Ranking};
pub use problem::Problem;
pub use report::{FrontPoint, Report, Solution};
pub use types::{Chromosome, ObjectiveVector, Site, User};

/// Convenient wildcard import for the most common types.
///
/// ```
/// use evsite::prelude::*;
/// ```
pub mod prelude {
    pub use crate::coverage::DEFAULT_COVERAGE_RADIUS;
    pub use crate::engine::{CancelToken, Optimizer, OptimizerBuilder};
    pub use crate::error::{Error, Result};
    pub use crate::population::{Individual, Ranking};
    pub use crate::problem::Problem;
    pub use crate::report::{FrontPoint, Report, Solution};
    pub use crate::types::{Chromosome, ObjectiveVector, Site, User};
}
