//! Population representation for the evolutionary loop.
//!
//! An [`Individual`] pairs a chromosome with its evaluated objective
//! vector, so fitness is computed exactly once per new chromosome and
//! carried alongside it from then on. [`Ranking`] caches the NSGA-II
//! ordering of a whole population (front membership, Pareto rank, and
//! crowding distance per member) so that selection and survival can both
//! read from one sorting pass per generation.

use crate::pareto;
use crate::types::{Chromosome, ObjectiveVector};

/// One candidate solution together with its evaluated objectives.
#[derive(Debug, Clone, PartialEq)]
pub struct Individual {
    /// Site selection mask, one gene per candidate site.
    pub chromosome: Chromosome,
    /// Minimize-space objectives, `[cost, -coverage]`.
    pub objectives: ObjectiveVector,
}

impl Individual {
    /// Creates an individual from an already-evaluated chromosome.
    #[must_use]
    pub const fn new(chromosome: Chromosome, objectives: ObjectiveVector) -> Self {
        Self { chromosome, objectives }
    }
}

/// NSGA-II ordering of one population, computed in a single pass.
///
/// `ranks[i]` and `crowding[i]` describe the individual at index `i` of
/// the population the ranking was built from; `fronts` lists the same
/// indices partitioned by Pareto rank, best front first.
#[derive(Debug, Clone)]
pub struct Ranking {
    /// Pareto rank per individual; 0 is the non-dominated front.
    pub ranks: Vec<usize>,
    /// Crowding distance per individual within its front.
    pub crowding: Vec<f64>,
    /// Indices partitioned into fronts, `fronts[0]` first.
    pub fronts: Vec<Vec<usize>>,
}

impl Ranking {
    /// Ranks a population by non-dominated sorting plus crowding distance.
    #[must_use]
    pub fn of(objectives: &[ObjectiveVector]) -> Self {
        let n = objectives.len();
        let fronts = pareto::non_dominated_sort(objectives);

        let mut ranks = vec![0_usize; n];
        let mut crowding = vec![0.0_f64; n];
        for (front_rank, front) in fronts.iter().enumerate() {
            let cd = pareto::crowding_distance(front, objectives);
            for (i, &idx) in front.iter().enumerate() {
                ranks[idx] = front_rank;
                crowding[idx] = cd[i];
            }
        }

        Self { ranks, crowding, fronts }
    }

    /// Returns `true` if individual `a` wins a crowded-comparison against
    /// `b`: lower rank first, then larger crowding distance on ties.
    #[must_use]
    pub fn beats(&self, a: usize, b: usize) -> bool {
        self.ranks[a] < self.ranks[b]
            || (self.ranks[a] == self.ranks[b] && self.crowding[a] > self.crowding[b])
    }
}
