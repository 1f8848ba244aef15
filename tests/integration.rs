//! End-to-end tests over the public optimizer API.

use core::time::Duration;

use evsite::synth;
use evsite::{CancelToken, Optimizer, Problem, Site, User, evaluate, pareto};

// =============================================================================
// Deterministic scenarios
// =============================================================================

/// Three sites, five users clustered around the first site only. The
/// single-site selection {site 0} costs 100 and covers all five users;
/// every other covering selection is strictly more expensive.
fn clustered_problem() -> Problem {
    let sites = vec![
        Site::new(0, 0.0, 0.0, 100.0),
        Site::new(1, 1.0, 1.0, 200.0),
        Site::new(2, 2.0, 2.0, 300.0),
    ];
    let users = vec![
        User::new(0.0, 0.001),
        User::new(0.001, 0.0),
        User::new(0.0, -0.001),
        User::new(-0.001, 0.0),
        User::new(0.001, 0.001),
    ];
    Problem::new(sites, users, 0.03).expect("valid problem")
}

#[test]
fn test_cheapest_covering_site_survives_to_the_front() {
    let report = Optimizer::builder()
        .population_size(20)
        .generations(30)
        .seed(42)
        .build()
        .expect("valid config")
        .run(&clustered_problem());

    let full_coverage = report
        .solutions
        .iter()
        .find(|s| s.coverage == 5)
        .expect("a full-coverage solution must be on the front");

    assert!(
        (full_coverage.cost - 100.0).abs() < 1e-9,
        "full coverage is achievable for 100, found cost {}",
        full_coverage.cost
    );
    assert_eq!(full_coverage.selected_sites.len(), 1);
    assert_eq!(full_coverage.selected_sites[0].id, 0);
    assert!((full_coverage.coverage_percentage - 100.0).abs() < 1e-9);
}

#[test]
fn test_zero_radius_collapses_front_to_empty_selection() {
    let sites = vec![
        Site::new(0, 1.0, 1.0, 100.0),
        Site::new(1, 2.0, 2.0, 200.0),
        Site::new(2, 3.0, 3.0, 300.0),
    ];
    let users = vec![User::new(4.0, 4.0), User::new(5.0, 5.0)];
    let problem = Problem::new(sites, users, 0.0).expect("zero radius is valid");

    let report = Optimizer::builder()
        .population_size(16)
        .generations(60)
        .seed(7)
        .build()
        .expect("valid config")
        .run(&problem);

    // No chromosome can cover anything, so dominance reduces to cost and
    // the front collapses to the single cheapest solution: build nothing.
    assert_eq!(report.pareto_front.len(), 1);
    let only = &report.solutions[0];
    assert!(only.cost.abs() < 1e-12, "cheapest solution is the empty one");
    assert_eq!(only.coverage, 0);
    assert!(only.selected_sites.is_empty());
}

#[test]
fn test_dropping_uncovered_solutions_can_empty_the_report() {
    // Same zero-radius setup with the uncovered filter switched on: every
    // solution has zero coverage, so nothing is left to report.
    let sites = vec![Site::new(0, 1.0, 1.0, 100.0), Site::new(1, 2.0, 2.0, 200.0)];
    let users = vec![User::new(4.0, 4.0)];
    let problem = Problem::new(sites, users, 0.0).expect("valid problem");

    let report = Optimizer::builder()
        .population_size(10)
        .generations(10)
        .seed(3)
        .keep_uncovered(false)
        .build()
        .expect("valid config")
        .run(&problem);

    assert!(report.solutions.is_empty());
    assert!(report.pareto_front.is_empty());
    assert_eq!(report.generations_run, 10);
}

#[test]
fn test_selecting_all_sites_covers_reachable_users_only() {
    let sites = vec![Site::new(0, 0.0, 0.0, 100.0), Site::new(1, 1.0, 1.0, 50.0)];
    let users = vec![
        User::new(0.0, 0.01), // near site 0
        User::new(1.0, 1.02), // near site 1
        User::new(0.5, 0.5),  // between, unreachable
        User::new(2.0, 2.0),  // far away
    ];
    let problem = Problem::new(sites, users, 0.03).expect("valid problem");

    let objectives = problem.evaluate(&[true, true]).expect("lengths match");
    assert!((objectives[0] - 150.0).abs() < 1e-12);
    assert_eq!(evaluate::coverage_count(objectives), 2);
}

// =============================================================================
// Front invariants on the full synthetic scenario
// =============================================================================

fn pune_problem(seed: u64) -> Problem {
    let mut rng = fastrand::Rng::with_seed(seed);
    let areas = synth::pune_areas();
    let users = synth::generate_users(&mut rng, &areas, synth::DEFAULT_TOTAL_USERS);
    let sites = synth::generate_sites(&mut rng, &areas);
    Problem::with_default_radius(sites, users).expect("synthetic data is valid")
}

#[test]
fn test_front_is_sorted_deduplicated_and_non_dominating() {
    let problem = pune_problem(99);
    let report = Optimizer::builder()
        .population_size(30)
        .generations(25)
        .seed(5)
        .build()
        .expect("valid config")
        .run(&problem);

    assert!(!report.solutions.is_empty());
    assert_eq!(report.solutions.len(), report.pareto_front.len());

    for (expected_id, solution) in report.solutions.iter().enumerate() {
        assert_eq!(solution.id, expected_id, "ids are dense and ordered");
    }

    for pair in report.pareto_front.windows(2) {
        assert!(
            pair[0].cost < pair[1].cost,
            "deduplicated front costs must strictly increase"
        );
        assert!(
            pair[0].coverage < pair[1].coverage,
            "on a Pareto front, paying more must buy more coverage"
        );
    }

    let vectors: Vec<[f64; 2]> = report
        .pareto_front
        .iter()
        .map(|p| [p.cost, -(p.coverage as f64)])
        .collect();
    for a in &vectors {
        for b in &vectors {
            assert!(!pareto::dominates(*a, *b), "front members must not dominate each other");
        }
    }
}

#[test]
fn test_solution_annotations_are_consistent() {
    let problem = pune_problem(4);
    let total_users = problem.users().len();

    let report = Optimizer::builder()
        .population_size(30)
        .generations(20)
        .seed(11)
        .parallel(true)
        .build()
        .expect("valid config")
        .run(&problem);

    for solution in &report.solutions {
        let site_cost_sum: f64 = solution.selected_sites.iter().map(|s| s.cost).sum();
        assert!(
            (solution.cost - site_cost_sum).abs() < 1e-6,
            "reported cost {} must equal the sum of selected site costs {}",
            solution.cost,
            site_cost_sum
        );

        assert!(solution.coverage <= total_users);
        let expected_pct = solution.coverage as f64 / total_users as f64 * 100.0;
        assert!((solution.coverage_percentage - expected_pct).abs() < 1e-9);
    }
}

// =============================================================================
// Reproducibility and early stopping
// =============================================================================

#[test]
fn test_identical_seeds_give_identical_reports() {
    let problem = pune_problem(123);
    let run = |parallel: bool| {
        Optimizer::builder()
            .population_size(24)
            .generations(15)
            .seed(77)
            .parallel(parallel)
            .build()
            .expect("valid config")
            .run(&problem)
    };

    let first = run(false);
    let second = run(false);
    assert_eq!(first, second, "a seed must replay the exact run");

    // Evaluation draws no randomness, so the parallel path replays too.
    let third = run(true);
    assert_eq!(first, third, "parallel evaluation must not change results");
}

#[test]
fn test_precancelled_token_skips_all_generations() {
    let cancel = CancelToken::new();
    cancel.cancel();

    let report = Optimizer::builder()
        .population_size(12)
        .generations(50)
        .seed(1)
        .build()
        .expect("valid config")
        .run_with_cancel(&clustered_problem(), &cancel);

    assert_eq!(report.generations_run, 0);
    assert!(report.partial);
    assert!(
        !report.solutions.is_empty(),
        "even a cancelled run reports the front of its initial population"
    );
}

#[test]
fn test_zero_deadline_stops_before_first_generation() {
    let report = Optimizer::builder()
        .population_size(12)
        .generations(50)
        .seed(1)
        .deadline(Duration::ZERO)
        .build()
        .expect("valid config")
        .run(&clustered_problem());

    assert_eq!(report.generations_run, 0);
    assert!(report.partial);
}

#[test]
fn test_report_round_trips_through_json() {
    let report = Optimizer::builder()
        .population_size(10)
        .generations(5)
        .seed(21)
        .build()
        .expect("valid config")
        .run(&clustered_problem());

    let json = serde_json::to_string(&report).expect("report serializes");
    let back: evsite::Report = serde_json::from_str(&json).expect("report deserializes");
    assert_eq!(back, report);
}
