use crate::telemetry::{PatientRecord, QueueSnapshot};

const TIME_TOLERANCE: f64 = 1e-9;

/// Validates that a patient record's times are consistent:
/// wait_time >= 0, service_time >= 0 and depart_time = arrival + wait + service.
/// Returns an error message if validation fails, None if valid.
pub fn validate_patient_record(record: &PatientRecord) -> Option<String> {
    if record.wait_time < 0.0 {
        return Some(format!(
            "Patient {}: negative wait_time ({})",
            record.id, record.wait_time
        ));
    }
    if record.service_time < 0.0 {
        return Some(format!(
            "Patient {}: negative service_time ({})",
            record.id, record.service_time
        ));
    }
    let expected = record.service_start_time() + record.service_time;
    if (record.depart_time - expected).abs() > TIME_TOLERANCE * expected.abs().max(1.0) {
        return Some(format!(
            "Patient {}: depart_time ({}) != arrival + wait + service ({})",
            record.id, record.depart_time, expected
        ));
    }
    None
}

/// Validates a monitor sample against the doctor pool size and the population counts.
pub fn validate_snapshot(snapshot: &QueueSnapshot, capacity: usize) -> Option<String> {
    if snapshot.in_use > capacity {
        return Some(format!(
            "Snapshot at {}: in_use ({}) exceeds capacity ({})",
            snapshot.timestamp, snapshot.in_use, capacity
        ));
    }
    if !(0.0..=1.0).contains(&snapshot.utilization) {
        return Some(format!(
            "Snapshot at {}: utilization ({}) outside [0, 1]",
            snapshot.timestamp, snapshot.utilization
        ));
    }
    let counts = snapshot.counts;
    if counts.departed + counts.in_service + counts.waiting != counts.arrived {
        return Some(format!(
            "Snapshot at {}: departed ({}) + in_service ({}) + waiting ({}) != arrived ({})",
            snapshot.timestamp, counts.departed, counts.in_service, counts.waiting, counts.arrived
        ));
    }
    None
}
