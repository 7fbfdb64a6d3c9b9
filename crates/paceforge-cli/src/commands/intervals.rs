//! Intervals command implementation
//!
//! Prints the interval plan for a training configuration without touching
//! audio or the cache.

use anyhow::Result;
use colored::Colorize;
use std::process::ExitCode;

use paceforge_spec::{generate_intervals, TrainingConfig};

use crate::cli_args::TrainingArgs;
use crate::table;

pub fn run(training: &TrainingArgs) -> Result<ExitCode> {
    let config = TrainingConfig::new(
        training.initial_speed,
        training.distance,
        training.stage_duration,
        training.stage_threshold,
        training.increment,
        training.max_speed,
    )?;
    let intervals = generate_intervals(&config);

    println!(
        "{} {:.1} km/h to {:.1} km/h, {} m intervals",
        "Interval plan:".cyan().bold(),
        config.initial_speed_kmh,
        config.max_speed_kmh,
        config.interval_distance_m
    );
    table::print_intervals(&intervals);
    table::print_summary(&intervals);

    Ok(ExitCode::SUCCESS)
}
