//! Error types for the hospital simulation engine.
//!
//! Configuration problems are reported before a run starts. Scheduling with a
//! negative delay is a programming error; the runner stops the run and hands it
//! back to the caller instead of retrying.

use thiserror::Error;

/// Reasons a scenario is rejected by [crate::scenario::ScenarioParams::validate].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("capacity must be positive, got {0}")]
    NonPositiveCapacity(usize),

    #[error("{name} must be a positive finite number, got {value}")]
    NonPositiveRate { name: &'static str, value: f64 },

    #[error("uniform service range must satisfy 0 <= min <= max, got [{min}, {max}]")]
    InvalidServiceRange { min: f64, max: f64 },

    #[error("constant service duration must be a non-negative finite number, got {0}")]
    InvalidServiceDuration(f64),

    #[error("expected {expected} severity weights, got {actual}")]
    SeverityWeightCount { expected: usize, actual: usize },

    #[error("severity weight {index} must be a non-negative finite number, got {value}")]
    InvalidSeverityWeight { index: usize, value: f64 },

    #[error("severity weights must sum to 1.0, got {sum}")]
    SeverityWeightsNotNormalized { sum: f64 },

    #[error("sampling interval must be positive, got {0}")]
    NonPositiveSamplingInterval(f64),

    #[error("sampling interval {interval} is too small to advance time up to the horizon {horizon}")]
    SamplingIntervalTooSmall { interval: f64, horizon: f64 },

    #[error("horizon must be a non-negative finite time, got {0}")]
    InvalidHorizon(f64),

    #[error("reporting period must be positive, got {0}")]
    NonPositiveReportingPeriod(f64),
}

/// Top-level error for building and running one simulation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimError {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(#[from] ConfigError),

    /// An event was scheduled with a negative (or NaN) delay.
    #[error("invalid delay {delay} scheduled at t={now}")]
    InvalidDelay { delay: f64, now: f64 },

    /// A patient reached a lifecycle step without the timestamps earlier steps set.
    #[error("patient {patient} is missing {field} at t={now}")]
    IncompleteLifecycle {
        patient: u64,
        field: &'static str,
        now: f64,
    },

    /// A resource required by the engine was not present in the world.
    #[error("simulation world is missing the {0} resource")]
    MissingResource(&'static str),
}
