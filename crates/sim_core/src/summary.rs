//! Run summary: a single streaming pass over patient records and queue snapshots.
//!
//! Means use an incremental update (`mean += (x - mean) / n`), which stays accurate
//! over long runs without accumulating a large sum. An empty input yields `None`.

use serde::{Deserialize, Serialize};

use crate::clock::SimTime;
use crate::distributions::ServiceTimeKind;
use crate::scenario::ScenarioParams;
use crate::severity::Severity;
use crate::telemetry::{PatientRecord, QueueSnapshot};

/// Incremental arithmetic mean.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RunningMean {
    count: u64,
    mean: f64,
}

impl RunningMean {
    pub fn push(&mut self, value: f64) {
        self.count += 1;
        self.mean += (value - self.mean) / self.count as f64;
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    /// `None` until at least one value has been pushed.
    pub fn mean(&self) -> Option<f64> {
        (self.count > 0).then_some(self.mean)
    }
}

impl FromIterator<f64> for RunningMean {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        let mut acc = RunningMean::default();
        for value in iter {
            acc.push(value);
        }
        acc
    }
}

/// Wait statistics for one severity class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeverityWaitStats {
    pub severity: Severity,
    pub patients: u64,
    pub mean_wait: Option<f64>,
    pub max_wait: Option<f64>,
}

#[derive(Debug, Clone, Copy, Default)]
struct WaitAccumulator {
    mean: RunningMean,
    max: Option<f64>,
}

impl WaitAccumulator {
    fn push(&mut self, wait: f64) {
        self.mean.push(wait);
        self.max = Some(self.max.map_or(wait, |max| max.max(wait)));
    }

    fn finish(self, severity: Severity) -> SeverityWaitStats {
        SeverityWaitStats {
            severity,
            patients: self.mean.count(),
            mean_wait: self.mean.mean(),
            max_wait: self.max,
        }
    }
}

/// Aggregates over one run, keyed by run id and scenario parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub run_id: u64,
    pub seed: u64,
    pub capacity: usize,
    pub arrival_rate: f64,
    pub service_time: ServiceTimeKind,
    pub horizon: SimTime,
    /// Patients that departed before the horizon.
    pub patients_completed: u64,
    /// One entry per class, most urgent first.
    pub wait_by_severity: Vec<SeverityWaitStats>,
    pub avg_system_time: Option<f64>,
    pub avg_queue_length: Option<f64>,
    pub resource_utilization: Option<f64>,
    /// Completed patients per reporting period (patients/hour by default).
    pub throughput: Option<f64>,
}

impl RunSummary {
    pub fn wait_stats(&self, severity: Severity) -> Option<&SeverityWaitStats> {
        self.wait_by_severity
            .iter()
            .find(|stats| stats.severity == severity)
    }

    pub fn avg_wait(&self, severity: Severity) -> Option<f64> {
        self.wait_stats(severity).and_then(|stats| stats.mean_wait)
    }

    pub fn max_wait(&self, severity: Severity) -> Option<f64> {
        self.wait_stats(severity).and_then(|stats| stats.max_wait)
    }
}

/// Reduces one run's records and snapshots to a [RunSummary].
pub fn summarize(
    params: &ScenarioParams,
    patients: &[PatientRecord],
    snapshots: &[QueueSnapshot],
) -> RunSummary {
    let mut waits = [WaitAccumulator::default(); 3];
    let mut system_time = RunningMean::default();
    for record in patients {
        waits[record.severity.index()].push(record.wait_time);
        system_time.push(record.system_time());
    }

    let mut queue_length = RunningMean::default();
    let mut utilization = RunningMean::default();
    for snapshot in snapshots {
        queue_length.push(snapshot.queue_length as f64);
        utilization.push(snapshot.utilization);
    }

    let throughput = (params.horizon > 0.0)
        .then(|| patients.len() as f64 / (params.horizon / params.reporting_period));

    RunSummary {
        run_id: params.run_id,
        seed: params.effective_seed(),
        capacity: params.capacity,
        arrival_rate: params.arrival_rate,
        service_time: params.service_time,
        horizon: params.horizon,
        patients_completed: patients.len() as u64,
        wait_by_severity: Severity::ALL
            .iter()
            .map(|&severity| waits[severity.index()].finish(severity))
            .collect(),
        avg_system_time: system_time.mean(),
        avg_queue_length: queue_length.mean(),
        resource_utilization: utilization.mean(),
        throughput,
    }
}
