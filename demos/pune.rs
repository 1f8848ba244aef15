//! Pune charging-station placement on the full synthetic scenario.
//!
//! Generates users and candidate sites for ten Pune areas, runs the
//! optimizer, and prints the cost/coverage trade-off followed by the
//! report as JSON, the shape an HTTP layer would return.
//!
//! Run with: `cargo run --example pune --features tracing`

use evsite::prelude::*;
use evsite::synth;

fn main() -> evsite::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing_subscriber::filter::LevelFilter::DEBUG)
        .init();

    let mut rng = fastrand::Rng::with_seed(2024);
    let areas = synth::pune_areas();
    let users = synth::generate_users(&mut rng, &areas, synth::DEFAULT_TOTAL_USERS);
    let sites = synth::generate_sites(&mut rng, &areas);

    println!(
        "{} candidate sites, {} users across {} areas",
        sites.len(),
        users.len(),
        areas.len(),
    );

    let problem = Problem::with_default_radius(sites, users)?;
    let report = Optimizer::builder()
        .population_size(50)
        .generations(100)
        .seed(2024)
        .parallel(true)
        .build()?
        .run(&problem);

    println!("Pareto front ({} solutions):", report.solutions.len());
    for solution in &report.solutions {
        let names: Vec<&str> = solution
            .selected_sites
            .iter()
            .map(|site| areas[site.id as usize].name.as_str())
            .collect();
        println!(
            "  #{:<2} cost {:>8.0}  coverage {:>3} ({:>5.1}%)  [{}]",
            solution.id,
            solution.cost,
            solution.coverage,
            solution.coverage_percentage,
            names.join(", "),
        );
    }

    let json = serde_json::to_string_pretty(&report).unwrap();
    println!("\n{json}");

    Ok(())
}
