//! Print a single seeded projection path as a table
//! Useful for eyeballing a path against hand-computed cumulative PD values

use impairment_system::matrix::{default_matrices, MatrixProvider};
use impairment_system::{CollectibilityState, Projector, SeededUniform};

fn main() {
    env_logger::init();

    let provider = default_matrices();
    let matrix = provider
        .transition_matrix("2024H1")
        .expect("bundled matrix missing");

    let start = CollectibilityState::SpecialMention;
    let tenor = 12;
    let seed = 42;

    let projector = Projector::default();
    let mut draws = SeededUniform::from_seed(seed);
    let run = projector
        .project(matrix, start, tenor, &mut draws)
        .expect("projection failed");

    println!(
        "Single path trace (period 2024H1, start {} ({}), tenor {}, seed {})",
        start,
        start.name(),
        tenor,
        seed
    );
    println!(
        "{:<8} {:<6} {:<18} {:<14} {:<14}",
        "Period", "State", "Classification", "PeriodicPD", "CumulativePD"
    );

    for step in &run {
        println!(
            "{:<8} {:<6} {:<18} {:<14.8} {:<14.8}",
            step.period,
            step.state,
            step.state.name(),
            step.periodic_default_probability,
            step.cumulative_default_probability
        );
    }

    match run.first_default_period() {
        Some(period) => println!("\nPath first reached Loss in period {}", period),
        None => println!("\nPath never reached Loss"),
    }
    println!("Final cumulative PD: {:.8}", run.final_cumulative_pd());
}
