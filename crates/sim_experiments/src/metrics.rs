//! Metrics extraction from simulation results.
//!
//! Flattens a finished run into one comparison row: parameters, per-severity
//! waits, queue and utilization means, throughput and wait percentiles.

use serde::{Deserialize, Serialize};
use sim_core::severity::Severity;
use sim_core::simulation::RunOutput;

use crate::parameters::ParameterSet;

/// Aggregated metrics from a single simulation run.
///
/// `None` marks a metric with no data (for example a severity class that had
/// no departures before the horizon).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    pub experiment_id: String,
    pub run_id: u64,
    pub replication: usize,
    pub seed: u64,
    /// Number of doctors.
    pub num_doctors: usize,
    pub arrival_rate: f64,
    /// Service completions per time unit per doctor.
    pub service_rate: f64,
    pub service_distribution: String,
    pub simulation_duration: f64,
    /// Patients that arrived before the horizon.
    pub patients_arrived: u64,
    /// Patients that departed before the horizon.
    pub patients_completed: u64,
    pub avg_wait_high: Option<f64>,
    pub avg_wait_medium: Option<f64>,
    pub avg_wait_low: Option<f64>,
    pub max_wait_high: Option<f64>,
    pub max_wait_medium: Option<f64>,
    pub max_wait_low: Option<f64>,
    /// Median wait over all departed patients.
    pub median_wait: Option<f64>,
    /// P90 wait over all departed patients.
    pub p90_wait: Option<f64>,
    pub avg_queue_length: Option<f64>,
    pub avg_system_time: Option<f64>,
    pub resource_utilization: Option<f64>,
    /// Patients per reporting period (per hour by default).
    pub throughput: Option<f64>,
    /// Arrival rate over total service capacity.
    pub offered_load: f64,
}

impl SimulationResult {
    pub fn avg_wait(&self, severity: Severity) -> Option<f64> {
        match severity {
            Severity::High => self.avg_wait_high,
            Severity::Medium => self.avg_wait_medium,
            Severity::Low => self.avg_wait_low,
        }
    }

    pub fn max_wait(&self, severity: Severity) -> Option<f64> {
        match severity {
            Severity::High => self.max_wait_high,
            Severity::Medium => self.max_wait_medium,
            Severity::Low => self.max_wait_low,
        }
    }

    /// Calculate median and p90 from a slice of values.
    ///
    /// Returns `None` for an empty slice.
    pub(crate) fn calculate_stats(values: &[f64]) -> Option<(f64, f64)> {
        if values.is_empty() {
            return None;
        }

        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);

        let median = if sorted.len() % 2 == 0 {
            (sorted[sorted.len() / 2 - 1] + sorted[sorted.len() / 2]) / 2.0
        } else {
            sorted[sorted.len() / 2]
        };
        // P90: floor(0.9 * (n-1))
        let p90_idx = ((sorted.len() - 1) as f64 * 0.9) as usize;
        let p90 = sorted[p90_idx.min(sorted.len() - 1)];

        Some((median, p90))
    }
}

/// Extract metrics from a completed run.
pub fn extract_metrics(output: &RunOutput, param_set: &ParameterSet) -> SimulationResult {
    let summary = &output.summary;
    let params = &output.params;

    let waits: Vec<f64> = output.patients.iter().map(|p| p.wait_time).collect();
    let (median_wait, p90_wait) = match SimulationResult::calculate_stats(&waits) {
        Some((median, p90)) => (Some(median), Some(p90)),
        None => (None, None),
    };

    SimulationResult {
        experiment_id: param_set.experiment_id.clone(),
        run_id: params.run_id,
        replication: param_set.replication,
        seed: summary.seed,
        num_doctors: params.capacity,
        arrival_rate: params.arrival_rate,
        service_rate: params.service_time.rate(),
        service_distribution: params.service_time.label(),
        simulation_duration: params.horizon,
        patients_arrived: output.arrived,
        patients_completed: summary.patients_completed,
        avg_wait_high: summary.avg_wait(Severity::High),
        avg_wait_medium: summary.avg_wait(Severity::Medium),
        avg_wait_low: summary.avg_wait(Severity::Low),
        max_wait_high: summary.max_wait(Severity::High),
        max_wait_medium: summary.max_wait(Severity::Medium),
        max_wait_low: summary.max_wait(Severity::Low),
        median_wait,
        p90_wait,
        avg_queue_length: summary.avg_queue_length,
        avg_system_time: summary.avg_system_time,
        resource_utilization: summary.resource_utilization,
        throughput: summary.throughput,
        offered_load: params.offered_load(),
    }
}
