use std::error::Error;
use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use arrow::array::{ArrayRef, Float64Array, UInt64Array, UInt8Array};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

use crate::telemetry::{PatientRecord, QueueSnapshot};

mod validate;

pub use validate::{validate_patient_record, validate_snapshot};

/// One row per departed patient. `severity` is the priority code (0 = High).
pub fn write_patients_parquet<P: AsRef<Path>>(
    path: P,
    patients: &[PatientRecord],
) -> Result<(), Box<dyn Error>> {
    let mut ids = Vec::with_capacity(patients.len());
    let mut severity = Vec::with_capacity(patients.len());
    let mut arrival_time = Vec::with_capacity(patients.len());
    let mut wait_time = Vec::with_capacity(patients.len());
    let mut service_time = Vec::with_capacity(patients.len());
    let mut depart_time = Vec::with_capacity(patients.len());

    for record in patients {
        ids.push(record.id);
        severity.push(record.severity.priority());
        arrival_time.push(record.arrival_time);
        wait_time.push(record.wait_time);
        service_time.push(record.service_time);
        depart_time.push(record.depart_time);
    }

    let schema = Schema::new(vec![
        Field::new("patient_id", DataType::UInt64, false),
        Field::new("severity", DataType::UInt8, false),
        Field::new("arrival_time", DataType::Float64, false),
        Field::new("wait_time", DataType::Float64, false),
        Field::new("service_time", DataType::Float64, false),
        Field::new("depart_time", DataType::Float64, false),
    ]);

    let arrays: Vec<ArrayRef> = vec![
        Arc::new(UInt64Array::from(ids)),
        Arc::new(UInt8Array::from(severity)),
        Arc::new(Float64Array::from(arrival_time)),
        Arc::new(Float64Array::from(wait_time)),
        Arc::new(Float64Array::from(service_time)),
        Arc::new(Float64Array::from(depart_time)),
    ];

    write_record_batch(path, schema, arrays)
}

pub fn write_queue_snapshots_parquet<P: AsRef<Path>>(
    path: P,
    snapshots: &[QueueSnapshot],
) -> Result<(), Box<dyn Error>> {
    let mut timestamp = Vec::with_capacity(snapshots.len());
    let mut queue_length = Vec::with_capacity(snapshots.len());
    let mut in_use = Vec::with_capacity(snapshots.len());
    let mut utilization = Vec::with_capacity(snapshots.len());
    let mut arrived = Vec::with_capacity(snapshots.len());
    let mut departed = Vec::with_capacity(snapshots.len());

    for snapshot in snapshots {
        timestamp.push(snapshot.timestamp);
        queue_length.push(snapshot.queue_length as u64);
        in_use.push(snapshot.in_use as u64);
        utilization.push(snapshot.utilization);
        arrived.push(snapshot.counts.arrived);
        departed.push(snapshot.counts.departed);
    }

    let schema = Schema::new(vec![
        Field::new("timestamp", DataType::Float64, false),
        Field::new("queue_length", DataType::UInt64, false),
        Field::new("in_use", DataType::UInt64, false),
        Field::new("utilization", DataType::Float64, false),
        Field::new("arrived", DataType::UInt64, false),
        Field::new("departed", DataType::UInt64, false),
    ]);

    let arrays: Vec<ArrayRef> = vec![
        Arc::new(Float64Array::from(timestamp)),
        Arc::new(UInt64Array::from(queue_length)),
        Arc::new(UInt64Array::from(in_use)),
        Arc::new(Float64Array::from(utilization)),
        Arc::new(UInt64Array::from(arrived)),
        Arc::new(UInt64Array::from(departed)),
    ];

    write_record_batch(path, schema, arrays)
}

fn write_record_batch<P: AsRef<Path>>(
    path: P,
    schema: Schema,
    arrays: Vec<ArrayRef>,
) -> Result<(), Box<dyn Error>> {
    let schema = Arc::new(schema);
    let batch = RecordBatch::try_new(schema.clone(), arrays)?;
    let file = File::create(path)?;
    let mut writer = ArrowWriter::try_new(file, schema, None)?;
    writer.write(&batch)?;
    writer.close()?;
    Ok(())
}
