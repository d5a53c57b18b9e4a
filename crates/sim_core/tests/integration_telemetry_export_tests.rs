mod support;

use std::fs::File;
use std::path::Path;

use arrow::array::{Array, Float64Array, UInt8Array};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use sim_core::distributions::ServiceTimeKind;
use sim_core::scenario::ScenarioParams;
use sim_core::simulation::run_scenario;
use sim_core::telemetry_export::{write_patients_parquet, write_queue_snapshots_parquet};

fn parquet_field_specs(path: &Path) -> Vec<(String, String, bool)> {
    let file = File::open(path).expect("parquet file should exist");
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).expect("parquet reader should build");
    builder
        .schema()
        .fields()
        .iter()
        .map(|field| {
            (
                field.name().to_string(),
                field.data_type().to_string(),
                field.is_nullable(),
            )
        })
        .collect()
}

fn parquet_row_count(path: &Path) -> usize {
    let file = File::open(path).expect("parquet file should exist");
    ParquetRecordBatchReaderBuilder::try_new(file)
        .expect("parquet reader should build")
        .build()
        .expect("reader")
        .map(|batch| batch.expect("batch").num_rows())
        .sum()
}

fn short_run_params() -> ScenarioParams {
    ScenarioParams::default()
        .with_run_id(11)
        .with_horizon(600.0)
        .with_service_time(ServiceTimeKind::Uniform {
            min: 2.0,
            max: 6.0,
        })
}

#[test]
fn patients_parquet_has_expected_schema_and_rows() {
    let output = run_scenario(&short_run_params()).expect("run");
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("patients.parquet");

    write_patients_parquet(&path, &output.patients).expect("write patients");

    assert_eq!(
        parquet_field_specs(&path),
        vec![
            ("patient_id".to_string(), "UInt64".to_string(), false),
            ("severity".to_string(), "UInt8".to_string(), false),
            ("arrival_time".to_string(), "Float64".to_string(), false),
            ("wait_time".to_string(), "Float64".to_string(), false),
            ("service_time".to_string(), "Float64".to_string(), false),
            ("depart_time".to_string(), "Float64".to_string(), false),
        ]
    );
    assert_eq!(parquet_row_count(&path), output.patients.len());
}

#[test]
fn patients_parquet_round_trips_values() {
    let output = run_scenario(&short_run_params()).expect("run");
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("patients.parquet");
    write_patients_parquet(&path, &output.patients).expect("write patients");

    let file = File::open(&path).expect("file");
    let batch = ParquetRecordBatchReaderBuilder::try_new(file)
        .expect("builder")
        .build()
        .expect("reader")
        .next()
        .expect("one batch")
        .expect("batch");
    let severity = batch
        .column(1)
        .as_any()
        .downcast_ref::<UInt8Array>()
        .expect("severity column");
    let wait = batch
        .column(3)
        .as_any()
        .downcast_ref::<Float64Array>()
        .expect("wait column");

    let first = &output.patients[0];
    assert_eq!(severity.value(0), first.severity.priority());
    assert_eq!(wait.value(0), first.wait_time);
    assert_eq!(wait.len(), output.patients.len());
}

#[test]
fn snapshots_parquet_has_one_row_per_sample() {
    let output = run_scenario(&short_run_params()).expect("run");
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("snapshots.parquet");

    write_queue_snapshots_parquet(&path, &output.snapshots).expect("write snapshots");

    let names: Vec<String> = parquet_field_specs(&path)
        .into_iter()
        .map(|(name, _, _)| name)
        .collect();
    assert_eq!(
        names,
        vec![
            "timestamp",
            "queue_length",
            "in_use",
            "utilization",
            "arrived",
            "departed"
        ]
    );
    assert_eq!(parquet_row_count(&path), 120);
}

#[test]
fn empty_run_writes_empty_files() {
    let output = run_scenario(&short_run_params().with_horizon(0.0)).expect("run");
    let dir = tempfile::tempdir().expect("temp dir");
    let patients = dir.path().join("patients.parquet");
    let snapshots = dir.path().join("snapshots.parquet");

    write_patients_parquet(&patients, &output.patients).expect("write patients");
    write_queue_snapshots_parquet(&snapshots, &output.snapshots).expect("write snapshots");

    assert_eq!(parquet_row_count(&patients), 0);
    assert_eq!(parquet_row_count(&snapshots), 0);
}
