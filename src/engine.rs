//! The NSGA-II evolution loop.
//!
//! One run is the classic generational cycle: evaluate, rank, select
//! parents by binary tournament, recombine and mutate, merge parents with
//! offspring, and truncate back to the population size by Pareto rank
//! with crowding-distance ties. Merging before truncation is what makes
//! the loop elitist: a non-dominated solution survives until something
//! that dominates it appears.
//!
//! Every random draw comes from one [`fastrand::Rng`] owned by the run,
//! so a fixed seed replays the exact chromosome sequence. The `parallel`
//! setting cannot change results because evaluation draws no randomness.

use core::sync::atomic::{AtomicBool, Ordering};
use core::time::Duration;
use std::sync::Arc;
use std::time::Instant;

use crate::error::{Error, Result};
use crate::evaluate;
use crate::operators;
use crate::population::{Individual, Ranking};
use crate::problem::Problem;
use crate::report::{self, Report};
use crate::types::{Chromosome, ObjectiveVector};

/// Default number of individuals kept per generation.
pub const DEFAULT_POPULATION_SIZE: usize = 50;

/// Default number of generations per run.
pub const DEFAULT_GENERATIONS: usize = 100;

/// Default probability that a parent pair is recombined.
pub const DEFAULT_CROSSOVER_PROB: f64 = 0.9;

/// Default probability that a freshly initialized gene is set.
pub const DEFAULT_INIT_BIAS: f64 = 0.5;

// ---------------------------------------------------------------------------
// Cancellation
// ---------------------------------------------------------------------------

/// Cooperative cancellation handle for a running optimization.
///
/// Clone the token, keep one clone and pass the other to
/// [`Optimizer::run_with_cancel`]; calling [`CancelToken::cancel`] from
/// any thread makes the loop stop before its next generation and return
/// the front of the last completed one.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    /// Creates a token in the not-cancelled state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation. Idempotent and callable from any thread.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    /// Returns `true` once [`CancelToken::cancel`] has been called.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}

// ---------------------------------------------------------------------------
// Optimizer
// ---------------------------------------------------------------------------

/// Configured NSGA-II optimizer.
///
/// Construct with [`Optimizer::new`] for defaults, [`Optimizer::with_seed`]
/// for a reproducible run, or [`Optimizer::builder`] for full control. An
/// optimizer is immutable once built and can drive any number of runs.
#[derive(Debug, Clone)]
pub struct Optimizer {
    population_size: usize,
    generations: usize,
    crossover_prob: f64,
    mutation_prob: Option<f64>,
    init_bias: f64,
    seed: Option<u64>,
    parallel: bool,
    deadline: Option<Duration>,
    keep_uncovered: bool,
}

impl Optimizer {
    /// Creates an optimizer with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self {
            population_size: DEFAULT_POPULATION_SIZE,
            generations: DEFAULT_GENERATIONS,
            crossover_prob: DEFAULT_CROSSOVER_PROB,
            mutation_prob: None,
            init_bias: DEFAULT_INIT_BIAS,
            seed: None,
            parallel: false,
            deadline: None,
            keep_uncovered: true,
        }
    }

    /// Creates a default optimizer with a fixed seed.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self { seed: Some(seed), ..Self::new() }
    }

    /// Creates a builder for configuring an [`Optimizer`].
    #[must_use]
    pub fn builder() -> OptimizerBuilder {
        OptimizerBuilder::default()
    }

    /// Runs the full evolution loop against `problem`.
    #[must_use]
    pub fn run(&self, problem: &Problem) -> Report {
        self.run_with_cancel(problem, &CancelToken::new())
    }

    /// Runs the evolution loop, stopping early when `cancel` fires or the
    /// configured deadline passes.
    ///
    /// Both conditions are checked between generations, so an interrupted
    /// run still returns a consistent front taken from the last completed
    /// generation, tagged via [`Report::partial`].
    #[must_use]
    pub fn run_with_cancel(&self, problem: &Problem, cancel: &CancelToken) -> Report {
        #[cfg(feature = "tracing")]
        let _span = tracing::info_span!(
            "evolve",
            sites = problem.dimension(),
            users = problem.users().len(),
            population_size = self.population_size,
            generations = self.generations
        )
        .entered();

        let started = Instant::now();
        let mut rng = self.seed.map_or_else(fastrand::Rng::new, fastrand::Rng::with_seed);

        let dimension = problem.dimension();
        #[allow(clippy::cast_precision_loss)]
        let mutation_prob = self.mutation_prob.unwrap_or(1.0 / dimension as f64);

        let chromosomes: Vec<Chromosome> = (0..self.population_size)
            .map(|_| operators::random_chromosome(&mut rng, dimension, self.init_bias))
            .collect();
        let objectives = evaluate::batch(
            &chromosomes,
            problem.sites(),
            problem.users(),
            problem.coverage_radius(),
            self.parallel,
        );
        let mut population: Vec<Individual> = chromosomes
            .into_iter()
            .zip(objectives)
            .map(|(chromosome, objectives)| Individual::new(chromosome, objectives))
            .collect();

        let mut generations_run = 0;
        let mut partial = false;

        for generation in 0..self.generations {
            if cancel.is_cancelled() {
                partial = true;
                trace_info!(generation, "run cancelled");
                break;
            }
            if let Some(limit) = self.deadline
                && started.elapsed() >= limit
            {
                partial = true;
                trace_info!(generation, "deadline reached");
                break;
            }

            let parent_objectives: Vec<ObjectiveVector> =
                population.iter().map(|ind| ind.objectives).collect();
            let ranking = Ranking::of(&parent_objectives);

            let offspring = self.make_offspring(&mut rng, &population, &ranking, mutation_prob);
            let offspring_objectives = evaluate::batch(
                &offspring,
                problem.sites(),
                problem.users(),
                problem.coverage_radius(),
                self.parallel,
            );
            population.extend(
                offspring
                    .into_iter()
                    .zip(offspring_objectives)
                    .map(|(chromosome, objectives)| Individual::new(chromosome, objectives)),
            );
            population = truncate(population, self.population_size);
            generations_run = generation + 1;

            trace_debug!(generation, "generation complete");
        }

        trace_info!(
            generations_run,
            partial,
            elapsed = ?started.elapsed(),
            "evolution finished"
        );

        report::extract(&population, problem, generations_run, partial, self.keep_uncovered)
    }

    fn make_offspring(
        &self,
        rng: &mut fastrand::Rng,
        population: &[Individual],
        ranking: &Ranking,
        mutation_prob: f64,
    ) -> Vec<Chromosome> {
        let n = population.len();
        let mut offspring = Vec::with_capacity(self.population_size);
        while offspring.len() < self.population_size {
            let p1 = operators::tournament_select(rng, ranking, n);
            let p2 = operators::tournament_select(rng, ranking, n);

            let (mut child1, mut child2) = operators::uniform_crossover(
                rng,
                &population[p1].chromosome,
                &population[p2].chromosome,
                self.crossover_prob,
            );
            operators::flip_mutation(rng, &mut child1, mutation_prob);
            operators::flip_mutation(rng, &mut child2, mutation_prob);

            offspring.push(child1);
            if offspring.len() < self.population_size {
                offspring.push(child2);
            }
        }
        offspring
    }
}

impl Default for Optimizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for [`Optimizer`].
#[derive(Debug, Clone, Default)]
pub struct OptimizerBuilder {
    population_size: Option<usize>,
    generations: Option<usize>,
    crossover_prob: Option<f64>,
    mutation_prob: Option<f64>,
    init_bias: Option<f64>,
    seed: Option<u64>,
    parallel: bool,
    deadline: Option<Duration>,
    keep_uncovered: Option<bool>,
}

impl OptimizerBuilder {
    /// Sets the number of individuals per generation. Default: 50.
    #[must_use]
    pub fn population_size(mut self, size: usize) -> Self {
        self.population_size = Some(size);
        self
    }

    /// Sets the number of generations. Default: 100.
    #[must_use]
    pub fn generations(mut self, generations: usize) -> Self {
        self.generations = Some(generations);
        self
    }

    /// Sets the probability that a parent pair is recombined. Default: 0.9.
    #[must_use]
    pub fn crossover_prob(mut self, prob: f64) -> Self {
        self.crossover_prob = Some(prob);
        self
    }

    /// Sets the per-gene flip probability. Default: 1 / number of sites.
    #[must_use]
    pub fn mutation_prob(mut self, prob: f64) -> Self {
        self.mutation_prob = Some(prob);
        self
    }

    /// Sets the probability that a gene starts set at initialization.
    /// Default: 0.5.
    #[must_use]
    pub fn init_bias(mut self, bias: f64) -> Self {
        self.init_bias = Some(bias);
        self
    }

    /// Sets the random seed for reproducibility.
    #[must_use]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Evaluates each generation on the rayon thread pool. Default: off.
    #[must_use]
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Sets a wall-clock budget for the run, checked between generations.
    /// Default: none.
    #[must_use]
    pub fn deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Keeps zero-coverage solutions in the report. Default: on.
    #[must_use]
    pub fn keep_uncovered(mut self, keep: bool) -> Self {
        self.keep_uncovered = Some(keep);
        self
    }

    /// Builds the configured [`Optimizer`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPopulationSize`] or
    /// [`Error::InvalidGenerations`] if either count is zero, and
    /// [`Error::InvalidProbability`] if `crossover_prob`, `mutation_prob`,
    /// or `init_bias` lies outside `[0.0, 1.0]`.
    pub fn build(self) -> Result<Optimizer> {
        let optimizer = Optimizer {
            population_size: self.population_size.unwrap_or(DEFAULT_POPULATION_SIZE),
            generations: self.generations.unwrap_or(DEFAULT_GENERATIONS),
            crossover_prob: self.crossover_prob.unwrap_or(DEFAULT_CROSSOVER_PROB),
            mutation_prob: self.mutation_prob,
            init_bias: self.init_bias.unwrap_or(DEFAULT_INIT_BIAS),
            seed: self.seed,
            parallel: self.parallel,
            deadline: self.deadline,
            keep_uncovered: self.keep_uncovered.unwrap_or(true),
        };

        if optimizer.population_size == 0 {
            return Err(Error::InvalidPopulationSize);
        }
        if optimizer.generations == 0 {
            return Err(Error::InvalidGenerations);
        }
        check_probability("crossover_prob", optimizer.crossover_prob)?;
        if let Some(prob) = optimizer.mutation_prob {
            check_probability("mutation_prob", prob)?;
        }
        check_probability("init_bias", optimizer.init_bias)?;

        Ok(optimizer)
    }
}

fn check_probability(name: &'static str, value: f64) -> Result<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(Error::InvalidProbability { name, value })
    }
}

// ---------------------------------------------------------------------------
// Survival selection
// ---------------------------------------------------------------------------

/// Keeps the best `target` individuals of a merged population, filling by
/// whole fronts and breaking the straddling front by descending crowding
/// distance.
fn truncate(population: Vec<Individual>, target: usize) -> Vec<Individual> {
    if population.len() <= target {
        return population;
    }

    let objectives: Vec<ObjectiveVector> = population.iter().map(|ind| ind.objectives).collect();
    let ranking = Ranking::of(&objectives);

    let mut selected: Vec<usize> = Vec::with_capacity(target);
    for front in &ranking.fronts {
        if selected.len() + front.len() <= target {
            selected.extend_from_slice(front);
        } else {
            let remaining = target - selected.len();
            let mut front_sorted = front.clone();
            front_sorted.sort_by(|&a, &b| {
                ranking.crowding[b]
                    .partial_cmp(&ranking.crowding[a])
                    .unwrap_or(core::cmp::Ordering::Equal)
            });
            selected.extend_from_slice(&front_sorted[..remaining]);
            break;
        }
    }

    selected
        .into_iter()
        .map(|idx| population[idx].clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Site, User};

    fn toy_problem() -> Problem {
        // Site 0 covers all three users; sites 1 and 2 cover none.
        Problem::new(
            vec![
                Site::new(0, 0.0, 0.0, 100.0),
                Site::new(1, 2.0, 2.0, 200.0),
                Site::new(2, 4.0, 4.0, 300.0),
            ],
            vec![
                User::new(0.0, 0.005),
                User::new(0.005, 0.0),
                User::new(0.01, 0.01),
            ],
            0.03,
        )
        .unwrap()
    }

    fn ind(cost: f64, coverage: f64) -> Individual {
        Individual::new(vec![true], [cost, -coverage])
    }

    #[test]
    #[allow(clippy::float_cmp)]
    fn test_builder_defaults() {
        let optimizer = Optimizer::builder().build().unwrap();
        assert_eq!(optimizer.population_size, DEFAULT_POPULATION_SIZE);
        assert_eq!(optimizer.generations, DEFAULT_GENERATIONS);
        assert_eq!(optimizer.crossover_prob, DEFAULT_CROSSOVER_PROB);
        assert_eq!(optimizer.init_bias, DEFAULT_INIT_BIAS);
        assert!(optimizer.mutation_prob.is_none());
        assert!(optimizer.seed.is_none());
        assert!(optimizer.deadline.is_none());
        assert!(!optimizer.parallel);
        assert!(optimizer.keep_uncovered);
    }

    #[test]
    fn test_builder_rejects_zero_population() {
        let err = Optimizer::builder().population_size(0).build().unwrap_err();
        assert!(matches!(err, Error::InvalidPopulationSize));
    }

    #[test]
    fn test_builder_rejects_zero_generations() {
        let err = Optimizer::builder().generations(0).build().unwrap_err();
        assert!(matches!(err, Error::InvalidGenerations));
    }

    #[test]
    fn test_builder_rejects_bad_probabilities() {
        for value in [-0.1, 1.5, f64::NAN] {
            let err = Optimizer::builder().crossover_prob(value).build().unwrap_err();
            assert!(matches!(
                err,
                Error::InvalidProbability { name: "crossover_prob", .. }
            ));

            let err = Optimizer::builder().mutation_prob(value).build().unwrap_err();
            assert!(matches!(
                err,
                Error::InvalidProbability { name: "mutation_prob", .. }
            ));

            let err = Optimizer::builder().init_bias(value).build().unwrap_err();
            assert!(matches!(err, Error::InvalidProbability { name: "init_bias", .. }));
        }
    }

    #[test]
    fn test_truncate_keeps_whole_first_front() {
        let population = vec![
            ind(0.0, 0.0),   // front 0
            ind(100.0, 5.0), // front 0
            ind(150.0, 5.0), // front 1
            ind(200.0, 5.0), // front 2
            ind(250.0, 5.0), // front 3
        ];
        let survivors = truncate(population, 3);

        assert_eq!(survivors.len(), 3);
        let costs: Vec<f64> = survivors.iter().map(|i| i.objectives[0]).collect();
        assert!(costs.contains(&0.0));
        assert!(costs.contains(&100.0));
        assert!(costs.contains(&150.0));
    }

    #[test]
    fn test_truncate_prefers_spread_on_straddling_front() {
        // One front of five mutually non-dominating points. The straddling
        // cut keeps both boundaries plus the least crowded interior point.
        let population = vec![
            ind(0.0, 0.0),
            ind(10.0, 1.0),
            ind(11.0, 1.1),
            ind(12.0, 1.2),
            ind(100.0, 10.0),
        ];
        let survivors = truncate(population, 3);

        let costs: Vec<f64> = survivors.iter().map(|i| i.objectives[0]).collect();
        assert!(costs.contains(&0.0));
        assert!(costs.contains(&100.0));
        assert!(costs.contains(&12.0));
    }

    #[test]
    fn test_truncate_is_noop_when_population_fits() {
        let population = vec![ind(0.0, 0.0), ind(100.0, 5.0)];
        let survivors = truncate(population.clone(), 5);
        assert_eq!(survivors, population);
    }

    #[test]
    fn test_run_completes_all_generations() {
        let report = Optimizer::builder()
            .population_size(8)
            .generations(5)
            .seed(42)
            .build()
            .unwrap()
            .run(&toy_problem());

        assert_eq!(report.generations_run, 5);
        assert!(!report.partial);
        assert!(!report.solutions.is_empty());
    }

    #[test]
    fn test_run_is_reproducible_for_a_seed() {
        let problem = toy_problem();
        let run = || {
            Optimizer::builder()
                .population_size(10)
                .generations(8)
                .seed(7)
                .build()
                .unwrap()
                .run(&problem)
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn test_precancelled_run_returns_initial_front() {
        let cancel = CancelToken::new();
        cancel.cancel();

        let report = Optimizer::with_seed(1).run_with_cancel(&toy_problem(), &cancel);
        assert_eq!(report.generations_run, 0);
        assert!(report.partial);
        assert!(!report.solutions.is_empty());
    }

    #[test]
    fn test_cancel_token_is_shared_across_clones() {
        let token = CancelToken::new();
        let clone = token.clone();
        assert!(!clone.is_cancelled());
        token.cancel();
        assert!(clone.is_cancelled());
    }
}
