//! Telemetry: completed patient trajectories and periodic queue snapshots.

use bevy_ecs::prelude::Resource;
use serde::{Deserialize, Serialize};

use crate::clock::SimTime;
use crate::severity::Severity;

/// One completed patient, recorded at departure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientRecord {
    pub id: u64,
    pub severity: Severity,
    pub arrival_time: SimTime,
    pub wait_time: SimTime,
    pub service_time: SimTime,
    pub depart_time: SimTime,
}

impl PatientRecord {
    pub fn service_start_time(&self) -> SimTime {
        self.arrival_time + self.wait_time
    }

    /// Time from arrival to departure.
    pub fn system_time(&self) -> SimTime {
        self.wait_time + self.service_time
    }
}

/// Population counts at a point in time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotCounts {
    pub arrived: u64,
    pub waiting: u64,
    pub in_service: u64,
    pub departed: u64,
}

/// Point-in-time sample taken by the monitor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueueSnapshot {
    pub timestamp: SimTime,
    pub queue_length: usize,
    pub in_use: usize,
    pub utilization: f64,
    pub counts: SnapshotCounts,
}

/// Collects per-run telemetry. Owned by one run's world; never shared.
#[derive(Debug, Default, Resource)]
pub struct SimTelemetry {
    pub patients: Vec<PatientRecord>,
    pub arrived_total: u64,
    pub departed_total: u64,
}

/// Monitor cadence.
#[derive(Debug, Clone, Copy, Resource)]
pub struct MonitorConfig {
    pub interval: SimTime,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self { interval: 5.0 }
    }
}

/// Ordered time series of monitor samples.
#[derive(Debug, Default, Resource)]
pub struct QueueSnapshots {
    pub snapshots: Vec<QueueSnapshot>,
}
