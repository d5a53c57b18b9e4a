//! Example: Hospital staffing sweep.
//!
//! This example demonstrates how to:
//! 1. Select a pre-defined experiment
//! 2. Run the simulations in parallel
//! 3. Print the comparison table
//! 4. Export results and per-run reports
//!
//! Usage: `cargo run -p sim_experiments --example parameter_sweep -- [preset] [out_dir]`
//! where preset is one of `hospital_comparison` (default), `single_ward`,
//! `capacity_sweep` or `minimal`.

use std::path::PathBuf;

use sim_experiments::parameter_spaces::{self, PRESET_NAMES};
use sim_experiments::runner::run_parallel_artifacts;
use sim_experiments::{export_to_csv, export_to_json, write_run_artifacts, SimulationResult};
use tracing_subscriber::EnvFilter;

fn fmt_opt(value: Option<f64>) -> String {
    value.map(|v| format!("{v:.2}")).unwrap_or_else(|| "-".to_string())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut args = std::env::args().skip(1);
    let preset = args.next().unwrap_or_else(|| "hospital_comparison".to_string());
    let out_dir = PathBuf::from(args.next().unwrap_or_else(|| "sweep-output".to_string()));

    let parameter_sets = parameter_spaces::by_name(&preset).ok_or_else(|| {
        format!("unknown preset {preset:?}, expected one of {PRESET_NAMES:?}")
    })?;
    println!("Running {} simulations for {preset}...", parameter_sets.len());

    let artifacts = run_parallel_artifacts(&parameter_sets, None, true)?;
    let results: Vec<SimulationResult> = artifacts.iter().map(|a| a.metrics.clone()).collect();

    println!(
        "\n{:>5} {:>7} {:>8} {:>9} {:>9} {:>9} {:>8} {:>8} {:>10}",
        "run", "doctors", "arrival", "wait_hi", "wait_med", "wait_low", "queue", "util", "per_hour"
    );
    for result in &results {
        println!(
            "{:>5} {:>7} {:>8} {:>9} {:>9} {:>9} {:>8} {:>8} {:>10}",
            result.run_id,
            result.num_doctors,
            result.arrival_rate,
            fmt_opt(result.avg_wait_high),
            fmt_opt(result.avg_wait_medium),
            fmt_opt(result.avg_wait_low),
            fmt_opt(result.avg_queue_length),
            fmt_opt(result.resource_utilization),
            fmt_opt(result.throughput),
        );
    }

    export_to_csv(&results, &parameter_sets, out_dir.join("summary_all_runs.csv"))?;
    export_to_json(&results, out_dir.join("results.json"))?;
    let written = write_run_artifacts(&artifacts, out_dir.join("runs"))?;

    println!(
        "\nSummary saved to {} ({} per-run files)",
        out_dir.join("summary_all_runs.csv").display(),
        written.len()
    );
    Ok(())
}
