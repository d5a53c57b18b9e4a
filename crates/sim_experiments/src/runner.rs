//! Parallel simulation execution using rayon.
//!
//! This module provides functions to run single simulations and execute
//! multiple simulations in parallel for parameter sweeps. Every run owns its
//! own world, so runs share nothing.

use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use sim_core::simulation::{run_scenario, RunOutput};
use tracing::{info, warn};

use crate::error::ExperimentError;
use crate::metrics::{extract_metrics, SimulationResult};
use crate::parameters::ParameterSet;

/// Metrics of one run together with its raw telemetry.
#[derive(Debug, Clone)]
pub struct SimulationArtifacts {
    pub metrics: SimulationResult,
    pub output: RunOutput,
}

/// Runs one parameter set to its horizon and keeps the raw telemetry.
///
/// Used when per-run reports or parquet files are written afterwards.
pub fn run_single_simulation_with_artifacts(
    param_set: &ParameterSet,
) -> Result<SimulationArtifacts, ExperimentError> {
    let params = param_set.scenario_params();
    let output = run_scenario(&params).map_err(|source| {
        warn!(
            run_id = params.run_id,
            experiment_id = %param_set.experiment_id,
            error = %source,
            "simulation run failed"
        );
        ExperimentError::Run {
            run_id: params.run_id,
            experiment_id: param_set.experiment_id.clone(),
            source,
        }
    })?;
    let metrics = extract_metrics(&output, param_set);

    Ok(SimulationArtifacts { metrics, output })
}

/// Run a single simulation with the given parameter set.
///
/// Creates a new world, builds the scenario, runs the simulation to its
/// horizon, and extracts metrics from the results.
pub fn run_single_simulation(param_set: &ParameterSet) -> Result<SimulationResult, ExperimentError> {
    run_single_simulation_with_artifacts(param_set).map(|artifacts| artifacts.metrics)
}

/// Run multiple simulations in parallel.
///
/// Uses rayon to execute simulations concurrently across available CPU cores.
/// Results come back in the same order as the input parameter sets.
///
/// # Arguments
///
/// * `parameter_sets` - Parameter sets to run
/// * `num_threads` - Optional number of threads to use. If None, uses rayon's default.
pub fn run_parallel_experiments(
    parameter_sets: Vec<ParameterSet>,
    num_threads: Option<usize>,
) -> Result<Vec<SimulationResult>, ExperimentError> {
    run_parallel_experiments_with_progress(parameter_sets, num_threads, true)
}

/// Run multiple simulations in parallel with optional progress bar.
///
/// The first failing run aborts the batch and is returned as the error.
pub fn run_parallel_experiments_with_progress(
    parameter_sets: Vec<ParameterSet>,
    num_threads: Option<usize>,
    show_progress: bool,
) -> Result<Vec<SimulationResult>, ExperimentError> {
    run_parallel(&parameter_sets, num_threads, show_progress, run_single_simulation)
}

/// Like [run_parallel_experiments_with_progress], keeping each run's telemetry.
pub fn run_parallel_artifacts(
    parameter_sets: &[ParameterSet],
    num_threads: Option<usize>,
    show_progress: bool,
) -> Result<Vec<SimulationArtifacts>, ExperimentError> {
    run_parallel(
        parameter_sets,
        num_threads,
        show_progress,
        run_single_simulation_with_artifacts,
    )
}

fn run_parallel<T, F>(
    parameter_sets: &[ParameterSet],
    num_threads: Option<usize>,
    show_progress: bool,
    run: F,
) -> Result<Vec<T>, ExperimentError>
where
    T: Send,
    F: Fn(&ParameterSet) -> Result<T, ExperimentError> + Sync,
{
    let total = parameter_sets.len();
    info!(runs = total, threads = ?num_threads, "starting experiment batch");

    let pb = if show_progress && total > 0 {
        let bar = ProgressBar::new(total as u64);
        let style = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")
            .map(|style| style.progress_chars("#>-"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        bar.set_style(style);
        Some(bar)
    } else {
        None
    };

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(threads) = num_threads {
        builder = builder.num_threads(threads);
    }
    let pool = builder.build()?;

    let pb_clone = pb.clone();
    let results = pool.install(|| {
        parameter_sets
            .par_iter()
            .map(|param_set| {
                let result = run(param_set);
                if let Some(ref progress_bar) = pb_clone {
                    progress_bar.inc(1);
                }
                result
            })
            .collect::<Result<Vec<_>, _>>()
    });

    if let Some(ref progress_bar) = pb {
        progress_bar.finish_with_message("Completed");
    }
    if results.is_ok() {
        info!(runs = total, "experiment batch finished");
    }

    results
}
