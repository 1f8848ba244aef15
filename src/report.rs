//! Result extraction: from a final population to a client-facing report.
//!
//! The evolution loop ends with a ranked population in minimize-space;
//! callers want the trade-off curve in domain terms. [`Report`] carries
//! the rank-0 solutions with their selected sites and coverage statistics,
//! plus the same curve as a compact cost/coverage projection, both sorted
//! by ascending cost. All report types serialize with `serde`, so the
//! result can be handed to an HTTP layer or written to disk as is.

use serde::{Deserialize, Serialize};

use crate::evaluate;
use crate::pareto;
use crate::population::Individual;
use crate::problem::Problem;
use crate::types::{ObjectiveVector, Site};

/// One Pareto-optimal placement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Solution {
    /// Rank of this solution within the report, starting at 0. Stable for
    /// a given report: solutions are ordered by ascending cost.
    pub id: usize,
    /// Total installation cost of the selected sites.
    pub cost: f64,
    /// Number of users within the coverage radius of at least one
    /// selected site.
    pub coverage: usize,
    /// Covered share of all users, in percent. 0 when there are no users.
    pub coverage_percentage: f64,
    /// The selected sites, in candidate-list order.
    pub selected_sites: Vec<Site>,
}

/// One point of the cost/coverage trade-off curve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrontPoint {
    /// Total installation cost.
    pub cost: f64,
    /// Covered user count.
    pub coverage: usize,
    /// Covered share of all users, in percent.
    pub coverage_percentage: f64,
}

/// The outcome of one optimization run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    /// Pareto-optimal solutions, cheapest first.
    pub solutions: Vec<Solution>,
    /// The same solutions as a reduced cost/coverage projection.
    pub pareto_front: Vec<FrontPoint>,
    /// Number of generations completed before the run ended.
    pub generations_run: usize,
    /// `true` when the run stopped early on cancellation or deadline and
    /// the front reflects the last completed generation only.
    pub partial: bool,
}

/// Builds the report from the final population.
///
/// Takes the rank-0 front, orders it by ascending cost, and reports each
/// distinct objective vector once (two chromosomes with identical cost
/// and coverage keep only the first). Solutions that cover no users are
/// kept unless `keep_uncovered` is `false`; the all-zero selection is a
/// legitimate front member and dropping it is opt-in.
pub(crate) fn extract(
    population: &[Individual],
    problem: &Problem,
    generations_run: usize,
    partial: bool,
    keep_uncovered: bool,
) -> Report {
    let objectives: Vec<ObjectiveVector> = population.iter().map(|ind| ind.objectives).collect();
    let front = pareto::pareto_front_indices(&objectives);

    let mut members: Vec<&Individual> = front.iter().map(|&idx| &population[idx]).collect();
    members.sort_by(|a, b| {
        a.objectives[0]
            .partial_cmp(&b.objectives[0])
            .unwrap_or(core::cmp::Ordering::Equal)
    });
    // Exact duplicates only (same cost, same coverage count).
    #[allow(clippy::float_cmp)]
    members.dedup_by(|a, b| a.objectives == b.objectives);
    if !keep_uncovered {
        members.retain(|ind| evaluate::coverage_count(ind.objectives) > 0);
    }

    let total_users = problem.users().len();
    let solutions: Vec<Solution> = members
        .iter()
        .enumerate()
        .map(|(id, ind)| {
            let coverage = evaluate::coverage_count(ind.objectives);
            let selected_sites: Vec<Site> = ind
                .chromosome
                .iter()
                .zip(problem.sites())
                .filter(|&(&selected, _)| selected)
                .map(|(_, site)| site.clone())
                .collect();
            Solution {
                id,
                cost: ind.objectives[0],
                coverage,
                coverage_percentage: percentage(coverage, total_users),
                selected_sites,
            }
        })
        .collect();

    let pareto_front = solutions
        .iter()
        .map(|s| FrontPoint {
            cost: s.cost,
            coverage: s.coverage,
            coverage_percentage: s.coverage_percentage,
        })
        .collect();

    Report { solutions, pareto_front, generations_run, partial }
}

#[allow(clippy::cast_precision_loss)]
fn percentage(coverage: usize, total_users: usize) -> f64 {
    if total_users == 0 {
        0.0
    } else {
        coverage as f64 / total_users as f64 * 100.0
    }
}
