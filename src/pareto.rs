//! Non-dominated sorting and crowding distance.
//!
//! With two competing objectives there is no single best selection of
//! sites; the optimizer instead maintains the **Pareto front**, the set of
//! solutions where neither cost nor coverage can improve without the other
//! getting worse. This module ranks a population into successive fronts
//! and measures how sparsely each front member is surrounded in objective
//! space, the two ingredients of NSGA-II's survival and selection rules.
//!
//! All objective vectors are in minimize-space (`[cost, -coverage]`), so
//! every comparison here is a plain "lower is better".

use crate::types::ObjectiveVector;

/// Returns `true` if solution `a` Pareto-dominates solution `b`.
///
/// `a` dominates `b` when it is no worse in both objectives and strictly
/// better in at least one. Equal vectors do not dominate each other, which
/// makes the relation a strict partial order.
#[must_use]
pub fn dominates(a: ObjectiveVector, b: ObjectiveVector) -> bool {
    let mut strictly_better = false;
    for (av, bv) in a.iter().zip(b.iter()) {
        if av > bv {
            return false;
        }
        if av < bv {
            strictly_better = true;
        }
    }
    strictly_better
}

/// Fast non-dominated sorting (Deb et al., 2002).
///
/// Returns the population partitioned into fronts: `fronts[0]` is the
/// Pareto front, `fronts[1]` is dominated only by front 0, and so on.
/// Each inner vec holds indices into `objectives`. Every index appears in
/// exactly one front. An individual's Pareto rank is its front's position.
///
/// Complexity: O(N²) pairwise comparisons for N solutions.
#[must_use]
pub fn non_dominated_sort(objectives: &[ObjectiveVector]) -> Vec<Vec<usize>> {
    let n = objectives.len();
    if n == 0 {
        return Vec::new();
    }

    // S_p: solutions dominated by p; n_p: count of solutions dominating p.
    let mut dominated_by: Vec<Vec<usize>> = vec![Vec::new(); n];
    let mut domination_count: Vec<usize> = vec![0; n];

    for i in 0..n {
        for j in (i + 1)..n {
            if dominates(objectives[i], objectives[j]) {
                dominated_by[i].push(j);
                domination_count[j] += 1;
            } else if dominates(objectives[j], objectives[i]) {
                dominated_by[j].push(i);
                domination_count[i] += 1;
            }
        }
    }

    let mut fronts: Vec<Vec<usize>> = Vec::new();
    let mut current_front: Vec<usize> = (0..n).filter(|&i| domination_count[i] == 0).collect();

    while !current_front.is_empty() {
        let mut next_front: Vec<usize> = Vec::new();
        for &p in &current_front {
            for &q in &dominated_by[p] {
                domination_count[q] -= 1;
                if domination_count[q] == 0 {
                    next_front.push(q);
                }
            }
        }
        fronts.push(current_front);
        current_front = next_front;
    }

    fronts
}

/// Indices of the non-dominated subset of `objectives`.
///
/// Equivalent to `non_dominated_sort(objectives)` followed by taking the
/// first front, for callers that do not need the full ranking.
#[must_use]
pub fn pareto_front_indices(objectives: &[ObjectiveVector]) -> Vec<usize> {
    non_dominated_sort(objectives).into_iter().next().unwrap_or_default()
}

/// Crowding distance for the members of one front.
///
/// Returns one distance per entry of `front`, in the same order. For each
/// objective the front is sorted by that objective; the two boundary
/// members receive [`f64::INFINITY`] and interior members accumulate the
/// gap between their neighbors normalized by the objective's range across
/// the front. A zero range contributes nothing, so degenerate fronts are
/// safe. Fronts of one or two members are all boundary.
#[must_use]
pub fn crowding_distance(front: &[usize], objectives: &[ObjectiveVector]) -> Vec<f64> {
    let n = front.len();
    if n <= 2 {
        return vec![f64::INFINITY; n];
    }

    let mut distances = vec![0.0_f64; n];

    // Objective value of the front member at position `pos`.
    let val = |pos: usize, obj: usize| -> f64 { objectives[front[pos]][obj] };

    for obj in 0..2 {
        let mut sorted: Vec<usize> = (0..n).collect();
        sorted.sort_by(|&a, &b| {
            val(a, obj)
                .partial_cmp(&val(b, obj))
                .unwrap_or(core::cmp::Ordering::Equal)
        });

        distances[sorted[0]] = f64::INFINITY;
        distances[sorted[n - 1]] = f64::INFINITY;

        let range = val(sorted[n - 1], obj) - val(sorted[0], obj);
        if range > 0.0 {
            for i in 1..(n - 1) {
                distances[sorted[i]] += (val(sorted[i + 1], obj) - val(sorted[i - 1], obj)) / range;
            }
        }
    }

    distances
}
