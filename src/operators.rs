//! Genetic operators over bitstring chromosomes.
//!
//! Selection sites are encoded as one boolean gene per candidate site, so
//! the operators here are the classic binary-GA trio: biased random
//! initialization, binary tournament selection under the crowded
//! comparison, uniform crossover, and independent bit-flip mutation. All
//! randomness flows through the caller's [`fastrand::Rng`] so a seeded
//! run replays exactly.

use crate::population::Ranking;
use crate::rng_util;
use crate::types::Chromosome;

/// Draws a random chromosome of `len` genes, each set with probability
/// `bias`.
#[must_use]
pub fn random_chromosome(rng: &mut fastrand::Rng, len: usize, bias: f64) -> Chromosome {
    (0..len)
        .map(|_| rng_util::f64_range(rng, 0.0, 1.0) < bias)
        .collect()
}

/// Binary tournament: pick 2 random individuals, return index of winner.
/// Winner has lower Pareto rank; ties broken by higher crowding distance.
#[must_use]
pub fn tournament_select(rng: &mut fastrand::Rng, ranking: &Ranking, n: usize) -> usize {
    let a = rng.usize(0..n);
    let b = rng.usize(0..n);
    if ranking.beats(b, a) { b } else { a }
}

/// Uniform crossover between two parents.
///
/// With probability `crossover_prob` the parents exchange each gene
/// independently with 50% probability; otherwise both children are exact
/// copies of their parents. Parents must have equal length.
#[must_use]
pub fn uniform_crossover(
    rng: &mut fastrand::Rng,
    parent1: &[bool],
    parent2: &[bool],
    crossover_prob: f64,
) -> (Chromosome, Chromosome) {
    debug_assert_eq!(parent1.len(), parent2.len());

    let mut child1 = parent1.to_vec();
    let mut child2 = parent2.to_vec();

    let u = rng_util::f64_range(rng, 0.0, 1.0);
    if u > crossover_prob {
        return (child1, child2);
    }

    for i in 0..child1.len() {
        if rng_util::f64_range(rng, 0.0, 1.0) < 0.5 {
            core::mem::swap(&mut child1[i], &mut child2[i]);
        }
    }

    (child1, child2)
}

/// Flips each gene independently with probability `mutation_prob`.
pub fn flip_mutation(rng: &mut fastrand::Rng, chromosome: &mut [bool], mutation_prob: f64) {
    for gene in &mut *chromosome {
        if rng_util::f64_range(rng, 0.0, 1.0) < mutation_prob {
            *gene = !*gene;
        }
    }
}
