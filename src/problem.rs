//! Problem definition: the immutable inputs of one optimization run.
//!
//! A [`Problem`] bundles the candidate sites, the user demand points, and
//! the coverage radius, validated once at construction. Everything
//! downstream (evaluation, the evolution loop, report extraction) borrows
//! the problem immutably, so a validated problem can be shared across
//! threads and reused for any number of runs.

use crate::coverage::DEFAULT_COVERAGE_RADIUS;
use crate::error::{Error, Result};
use crate::evaluate;
use crate::types::{ObjectiveVector, Site, User};

/// The facility-placement instance being optimized.
#[derive(Debug, Clone)]
pub struct Problem {
    sites: Vec<Site>,
    users: Vec<User>,
    coverage_radius: f64,
}

impl Problem {
    /// Creates a validated problem instance.
    ///
    /// The user list may be empty (every solution then covers zero users
    /// and the cost axis alone drives the search). A radius of zero is
    /// accepted and means a site covers only users at its exact position.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptySites`] if `sites` is empty,
    /// [`Error::InvalidCoverageRadius`] if `coverage_radius` is negative
    /// or not finite, [`Error::InvalidSite`] if a site has a non-finite
    /// position or a non-finite or non-positive cost, and
    /// [`Error::InvalidUser`] if a user has a non-finite position.
    pub fn new(sites: Vec<Site>, users: Vec<User>, coverage_radius: f64) -> Result<Self> {
        if sites.is_empty() {
            return Err(Error::EmptySites);
        }
        if !coverage_radius.is_finite() || coverage_radius < 0.0 {
            return Err(Error::InvalidCoverageRadius { radius: coverage_radius });
        }
        for site in &sites {
            if !site.lat.is_finite() || !site.lon.is_finite() {
                return Err(Error::InvalidSite {
                    id: site.id,
                    reason: "position must be finite",
                });
            }
            if !site.cost.is_finite() || site.cost <= 0.0 {
                return Err(Error::InvalidSite {
                    id: site.id,
                    reason: "cost must be finite and positive",
                });
            }
        }
        for (index, user) in users.iter().enumerate() {
            if !user.lat.is_finite() || !user.lon.is_finite() {
                return Err(Error::InvalidUser { index });
            }
        }

        Ok(Self { sites, users, coverage_radius })
    }

    /// Creates a problem with the default coverage radius
    /// ([`DEFAULT_COVERAGE_RADIUS`]).
    ///
    /// # Errors
    ///
    /// Same validation as [`Problem::new`].
    pub fn with_default_radius(sites: Vec<Site>, users: Vec<User>) -> Result<Self> {
        Self::new(sites, users, DEFAULT_COVERAGE_RADIUS)
    }

    /// The candidate sites. One chromosome gene corresponds to each entry.
    #[must_use]
    pub fn sites(&self) -> &[Site] {
        &self.sites
    }

    /// The user demand points.
    #[must_use]
    pub fn users(&self) -> &[User] {
        &self.users
    }

    /// The coverage radius, in the same degree units as the coordinates.
    #[must_use]
    pub const fn coverage_radius(&self) -> f64 {
        self.coverage_radius
    }

    /// Number of candidate sites, which is also the chromosome length.
    #[must_use]
    pub fn dimension(&self) -> usize {
        self.sites.len()
    }

    /// Evaluates one chromosome against this problem.
    ///
    /// Stateless and deterministic: a given chromosome always yields the
    /// same `[cost, -coverage]` vector for the same problem.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ChromosomeLengthMismatch`] if the chromosome does
    /// not carry exactly one gene per candidate site.
    pub fn evaluate(&self, chromosome: &[bool]) -> Result<ObjectiveVector> {
        if chromosome.len() != self.sites.len() {
            return Err(Error::ChromosomeLengthMismatch {
                expected: self.sites.len(),
                got: chromosome.len(),
            });
        }
        Ok(evaluate::objectives(
            chromosome,
            &self.sites,
            &self.users,
            self.coverage_radius,
        ))
    }
}
