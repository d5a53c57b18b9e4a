use std::sync::Arc;

use arrow::array::{ArrayRef, Float64Array, StringArray, UInt64Array};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use parquet::file::properties::WriterProperties;

use crate::metrics::SimulationResult;

pub(crate) fn export_to_parquet_impl(
    results: &[SimulationResult],
    file: std::fs::File,
) -> Result<(), Box<dyn std::error::Error>> {
    let batch = build_record_batch(results)?;
    let props = WriterProperties::builder().build();
    let mut writer = ArrowWriter::try_new(file, batch.schema(), Some(props))?;
    writer.write(&batch)?;
    writer.close()?;

    Ok(())
}

fn build_record_batch(
    results: &[SimulationResult],
) -> Result<RecordBatch, arrow::error::ArrowError> {
    let schema = Arc::new(parquet_schema());
    let arrays = build_arrays(results);

    RecordBatch::try_new(schema, arrays)
}

/// Metrics that may be missing are nullable.
fn parquet_schema() -> Schema {
    Schema::new(vec![
        Field::new("experiment_id", DataType::Utf8, false),
        Field::new("run_id", DataType::UInt64, false),
        Field::new("replication", DataType::UInt64, false),
        Field::new("seed", DataType::UInt64, false),
        Field::new("num_doctors", DataType::UInt64, false),
        Field::new("arrival_rate", DataType::Float64, false),
        Field::new("service_rate", DataType::Float64, false),
        Field::new("service_distribution", DataType::Utf8, false),
        Field::new("simulation_duration", DataType::Float64, false),
        Field::new("patients_arrived", DataType::UInt64, false),
        Field::new("patients_completed", DataType::UInt64, false),
        Field::new("avg_wait_high", DataType::Float64, true),
        Field::new("avg_wait_medium", DataType::Float64, true),
        Field::new("avg_wait_low", DataType::Float64, true),
        Field::new("max_wait_high", DataType::Float64, true),
        Field::new("max_wait_medium", DataType::Float64, true),
        Field::new("max_wait_low", DataType::Float64, true),
        Field::new("median_wait", DataType::Float64, true),
        Field::new("p90_wait", DataType::Float64, true),
        Field::new("avg_queue_length", DataType::Float64, true),
        Field::new("avg_system_time", DataType::Float64, true),
        Field::new("resource_utilization", DataType::Float64, true),
        Field::new("throughput", DataType::Float64, true),
        Field::new("offered_load", DataType::Float64, false),
    ])
}

fn u64_column<F>(results: &[SimulationResult], f: F) -> ArrayRef
where
    F: Fn(&SimulationResult) -> u64,
{
    Arc::new(UInt64Array::from(results.iter().map(f).collect::<Vec<_>>()))
}

fn f64_column<F>(results: &[SimulationResult], f: F) -> ArrayRef
where
    F: Fn(&SimulationResult) -> f64,
{
    Arc::new(Float64Array::from(results.iter().map(f).collect::<Vec<_>>()))
}

fn nullable_f64_column<F>(results: &[SimulationResult], f: F) -> ArrayRef
where
    F: Fn(&SimulationResult) -> Option<f64>,
{
    Arc::new(Float64Array::from(results.iter().map(f).collect::<Vec<_>>()))
}

fn string_column<F>(results: &[SimulationResult], f: F) -> ArrayRef
where
    F: Fn(&SimulationResult) -> &str,
{
    Arc::new(StringArray::from(results.iter().map(f).collect::<Vec<_>>()))
}

fn build_arrays(results: &[SimulationResult]) -> Vec<ArrayRef> {
    vec![
        string_column(results, |r| r.experiment_id.as_str()),
        u64_column(results, |r| r.run_id),
        u64_column(results, |r| r.replication as u64),
        u64_column(results, |r| r.seed),
        u64_column(results, |r| r.num_doctors as u64),
        f64_column(results, |r| r.arrival_rate),
        f64_column(results, |r| r.service_rate),
        string_column(results, |r| r.service_distribution.as_str()),
        f64_column(results, |r| r.simulation_duration),
        u64_column(results, |r| r.patients_arrived),
        u64_column(results, |r| r.patients_completed),
        nullable_f64_column(results, |r| r.avg_wait_high),
        nullable_f64_column(results, |r| r.avg_wait_medium),
        nullable_f64_column(results, |r| r.avg_wait_low),
        nullable_f64_column(results, |r| r.max_wait_high),
        nullable_f64_column(results, |r| r.max_wait_medium),
        nullable_f64_column(results, |r| r.max_wait_low),
        nullable_f64_column(results, |r| r.median_wait),
        nullable_f64_column(results, |r| r.p90_wait),
        nullable_f64_column(results, |r| r.avg_queue_length),
        nullable_f64_column(results, |r| r.avg_system_time),
        nullable_f64_column(results, |r| r.resource_utilization),
        nullable_f64_column(results, |r| r.throughput),
        f64_column(results, |r| r.offered_load),
    ]
}
