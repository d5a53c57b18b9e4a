use bevy_ecs::prelude::Resource;
use serde::{Deserialize, Serialize};

use crate::clock::SimTime;
use crate::distributions::ServiceTimeKind;
use crate::error::ConfigError;
use crate::severity::{validate_weights, DEFAULT_SEVERITY_WEIGHTS};

pub const DEFAULT_CAPACITY: usize = 3;
pub const DEFAULT_ARRIVAL_RATE: f64 = 0.4;
/// Eight hours of minutes.
pub const DEFAULT_HORIZON: SimTime = 28_800.0;
pub const DEFAULT_SAMPLING_INTERVAL: SimTime = 5.0;
/// Minutes per hour: throughput is reported in patients per hour.
pub const DEFAULT_REPORTING_PERIOD: SimTime = 60.0;

/// Simulation end time. The runner stops once the next event would be at or
/// after this time, then parks the clock exactly here.
#[derive(Debug, Clone, Copy, Resource)]
pub struct SimulationHorizon(pub SimTime);

/// Parameters for building a simulation scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Resource)]
#[serde(default)]
pub struct ScenarioParams {
    pub run_id: u64,
    /// RNG seed. If None, the run id is used.
    pub seed: Option<u64>,
    /// Number of doctors.
    pub capacity: usize,
    /// Mean arrivals per time unit (exponential inter-arrival times).
    pub arrival_rate: f64,
    pub service_time: ServiceTimeKind,
    pub horizon: SimTime,
    /// High, Medium, Low. Must sum to 1.
    pub severity_weights: Vec<f64>,
    /// Time between monitor samples.
    pub sampling_interval: SimTime,
    /// Time span throughput is expressed per (60 turns minutes into patients/hour).
    pub reporting_period: SimTime,
}

impl Default for ScenarioParams {
    fn default() -> Self {
        Self {
            run_id: 0,
            seed: None,
            capacity: DEFAULT_CAPACITY,
            arrival_rate: DEFAULT_ARRIVAL_RATE,
            service_time: ServiceTimeKind::default(),
            horizon: DEFAULT_HORIZON,
            severity_weights: DEFAULT_SEVERITY_WEIGHTS.to_vec(),
            sampling_interval: DEFAULT_SAMPLING_INTERVAL,
            reporting_period: DEFAULT_REPORTING_PERIOD,
        }
    }
}

impl ScenarioParams {
    pub fn with_run_id(mut self, run_id: u64) -> Self {
        self.run_id = run_id;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn with_arrival_rate(mut self, arrival_rate: f64) -> Self {
        self.arrival_rate = arrival_rate;
        self
    }

    pub fn with_service_time(mut self, service_time: ServiceTimeKind) -> Self {
        self.service_time = service_time;
        self
    }

    pub fn with_horizon(mut self, horizon: SimTime) -> Self {
        self.horizon = horizon;
        self
    }

    pub fn with_severity_weights(mut self, weights: impl Into<Vec<f64>>) -> Self {
        self.severity_weights = weights.into();
        self
    }

    pub fn with_sampling_interval(mut self, interval: SimTime) -> Self {
        self.sampling_interval = interval;
        self
    }

    pub fn with_reporting_period(mut self, period: SimTime) -> Self {
        self.reporting_period = period;
        self
    }

    pub fn effective_seed(&self) -> u64 {
        self.seed.unwrap_or(self.run_id)
    }

    /// Offered load per doctor: `arrival_rate * mean_service / capacity`.
    ///
    /// Below 1 the queue is stable and long-run utilization converges to this value.
    pub fn offered_load(&self) -> f64 {
        self.arrival_rate * self.service_time.mean() / self.capacity as f64
    }

    /// Rejects invalid parameters. Nothing is clamped.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.capacity == 0 {
            return Err(ConfigError::NonPositiveCapacity(self.capacity));
        }
        if !self.arrival_rate.is_finite() || self.arrival_rate <= 0.0 {
            return Err(ConfigError::NonPositiveRate {
                name: "arrival_rate",
                value: self.arrival_rate,
            });
        }
        self.service_time.build()?;
        if !self.horizon.is_finite() || self.horizon < 0.0 {
            return Err(ConfigError::InvalidHorizon(self.horizon));
        }
        validate_weights(&self.severity_weights)?;
        if !self.sampling_interval.is_finite() || self.sampling_interval <= 0.0 {
            return Err(ConfigError::NonPositiveSamplingInterval(
                self.sampling_interval,
            ));
        }
        // The monitor reschedules itself; a step lost to rounding would never reach the horizon.
        if self.horizon + self.sampling_interval <= self.horizon {
            return Err(ConfigError::SamplingIntervalTooSmall {
                interval: self.sampling_interval,
                horizon: self.horizon,
            });
        }
        if !self.reporting_period.is_finite() || self.reporting_period <= 0.0 {
            return Err(ConfigError::NonPositiveReportingPeriod(
                self.reporting_period,
            ));
        }
        Ok(())
    }
}
