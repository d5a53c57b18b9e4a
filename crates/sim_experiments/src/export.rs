//! Result export utilities.
//!
//! Comparison tables go to CSV, JSON or Parquet. Individual runs can also be
//! written out as a three-block report CSV plus raw patient and snapshot
//! Parquet files.

use std::path::{Path, PathBuf};

use sim_core::simulation::RunOutput;
use sim_core::telemetry_export::{write_patients_parquet, write_queue_snapshots_parquet};
use tracing::debug;

use crate::metrics::SimulationResult;
use crate::parameters::ParameterSet;
use crate::runner::SimulationArtifacts;

#[path = "export/csv.rs"]
mod csv;
#[path = "export/json.rs"]
mod json;
#[path = "export/parquet.rs"]
mod parquet;
#[path = "export/report.rs"]
mod report;
#[path = "export/writer_utils.rs"]
mod writer_utils;

/// Export simulation results to Parquet format.
///
/// Creates a Parquet file with one row per run. Metrics without data are null.
///
/// # Errors
///
/// Returns an error if `results` is empty, or if file creation or Parquet writing fails.
pub fn export_to_parquet(
    results: &[SimulationResult],
    path: impl AsRef<Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    writer_utils::ensure_not_empty(results)?;
    let file = writer_utils::create_output_file(path)?;
    parquet::export_to_parquet_impl(results, file)
}

/// Export simulation results to JSON format.
///
/// Creates a JSON file with an array of all results (serialized as JSON objects).
///
/// # Errors
///
/// Returns an error if file creation or JSON serialization fails.
pub fn export_to_json(
    results: &[SimulationResult],
    path: impl AsRef<Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let file = writer_utils::create_output_file(path)?;
    json::export_to_json_impl(results, file)
}

/// Read results previously written by [export_to_json].
pub fn import_from_json(
    path: impl AsRef<Path>,
) -> Result<Vec<SimulationResult>, Box<dyn std::error::Error>> {
    let file = std::fs::File::open(path)?;
    json::import_from_json_impl(file)
}

/// Export simulation results with parameters to CSV format.
///
/// The first columns follow the `summary_all_runs.csv` layout (RunID,
/// NumDoctors, ArrivalRate, ServiceRate, per-severity average waits, queue
/// length, system time, utilization, throughput). Missing metrics are empty
/// cells. Parameters and results are paired by index.
///
/// # Errors
///
/// Returns an error if file creation or CSV writing fails, or if results and parameter_sets lengths don't match.
pub fn export_to_csv(
    results: &[SimulationResult],
    parameter_sets: &[ParameterSet],
    path: impl AsRef<Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    writer_utils::ensure_not_empty(results)?;
    let file = writer_utils::create_output_file(path)?;
    csv::export_to_csv_impl(results, parameter_sets, file)
}

/// Write `run_XXX.csv` for one run into `dir` and return its path.
pub fn write_run_report(
    output: &RunOutput,
    dir: impl AsRef<Path>,
) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let path = dir
        .as_ref()
        .join(report::report_file_name(output.params.run_id));
    let file = writer_utils::create_output_file(&path)?;
    report::write_run_report_impl(output, file)?;
    Ok(path)
}

/// Write the report plus patient and snapshot Parquet files for every run.
///
/// Returns the paths written, three per run.
pub fn write_run_artifacts(
    artifacts: &[SimulationArtifacts],
    dir: impl AsRef<Path>,
) -> Result<Vec<PathBuf>, Box<dyn std::error::Error>> {
    let dir = dir.as_ref();
    std::fs::create_dir_all(dir)?;

    let mut written = Vec::with_capacity(artifacts.len() * 3);
    for artifact in artifacts {
        let output = &artifact.output;
        let run_id = output.params.run_id;

        written.push(write_run_report(output, dir)?);

        let patients_path = dir.join(format!("run_{run_id:03}_patients.parquet"));
        write_patients_parquet(&patients_path, &output.patients)?;
        written.push(patients_path);

        let snapshots_path = dir.join(format!("run_{run_id:03}_snapshots.parquet"));
        write_queue_snapshots_parquet(&snapshots_path, &output.snapshots)?;
        written.push(snapshots_path);

        debug!(run_id, dir = %dir.display(), "run artifacts written");
    }

    Ok(written)
}
