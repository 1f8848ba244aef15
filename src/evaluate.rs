//! Fitness evaluation: objective vectors for candidate solutions.
//!
//! Evaluation is a stateless function of the chromosome and the read-only
//! problem data, so a generation's worth of chromosomes can be evaluated
//! in parallel without any shared mutable state.

use rayon::prelude::*;

use crate::coverage;
use crate::types::{Chromosome, ObjectiveVector, Site, User};

/// Computes the objective vector for one chromosome.
///
/// The first component is the summed installation cost of the selected
/// sites; the second is the negated count of users covered by at least
/// one selected site. An empty selection evaluates to `(0, 0)`, which is
/// a valid (if usually dominated) solution.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn objectives(
    chromosome: &[bool],
    sites: &[Site],
    users: &[User],
    radius: f64,
) -> ObjectiveVector {
    debug_assert_eq!(chromosome.len(), sites.len());

    let cost: f64 = chromosome
        .iter()
        .zip(sites)
        .filter(|&(&selected, _)| selected)
        .map(|(_, site)| site.cost)
        .sum();

    let covered = users
        .iter()
        .filter(|user| coverage::covered_by_selection(user, chromosome, sites, radius))
        .count();

    [cost, -(covered as f64)]
}

/// Evaluates a batch of chromosomes, optionally on the rayon thread pool.
///
/// Each evaluation is independent and writes only its own output slot;
/// the call returns once every objective vector is available, so ranking
/// always sees a complete generation.
#[must_use]
pub fn batch(
    chromosomes: &[Chromosome],
    sites: &[Site],
    users: &[User],
    radius: f64,
    parallel: bool,
) -> Vec<ObjectiveVector> {
    if parallel {
        chromosomes
            .par_iter()
            .map(|chromosome| objectives(chromosome, sites, users, radius))
            .collect()
    } else {
        chromosomes
            .iter()
            .map(|chromosome| objectives(chromosome, sites, users, radius))
            .collect()
    }
}

/// Recovers the covered-user count from an objective vector.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn coverage_count(objective: ObjectiveVector) -> usize {
    (-objective[1]).round() as usize
}
