//! Severity classes and the categorical mix arrivals are drawn from.
//!
//! Lower numeric priority means more urgent: High = 0, Medium = 1, Low = 2.

use rand::distributions::WeightedIndex;
use rand::RngCore;
use rand_distr::Distribution;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Severity {
    High,
    Medium,
    Low,
}

impl Severity {
    /// All classes, most urgent first. Weight vectors follow this order.
    pub const ALL: [Severity; 3] = [Severity::High, Severity::Medium, Severity::Low];

    pub fn priority(self) -> u8 {
        match self {
            Severity::High => 0,
            Severity::Medium => 1,
            Severity::Low => 2,
        }
    }

    pub fn index(self) -> usize {
        self.priority() as usize
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Severity::High => "High",
            Severity::Medium => "Medium",
            Severity::Low => "Low",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Default mix: 20% high, 30% medium, 50% low.
pub const DEFAULT_SEVERITY_WEIGHTS: [f64; 3] = [0.2, 0.3, 0.5];

/// Checks that `weights` has one finite, non-negative entry per class and sums to 1.
pub fn validate_weights(weights: &[f64]) -> Result<(), ConfigError> {
    if weights.len() != Severity::ALL.len() {
        return Err(ConfigError::SeverityWeightCount {
            expected: Severity::ALL.len(),
            actual: weights.len(),
        });
    }
    for (index, &value) in weights.iter().enumerate() {
        if !value.is_finite() || value < 0.0 {
            return Err(ConfigError::InvalidSeverityWeight { index, value });
        }
    }
    let sum: f64 = weights.iter().sum();
    if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
        return Err(ConfigError::SeverityWeightsNotNormalized { sum });
    }
    Ok(())
}

#[derive(Debug, Clone)]
pub struct SeverityMix {
    weights: Vec<f64>,
    index: WeightedIndex<f64>,
}

impl SeverityMix {
    pub fn new(weights: &[f64]) -> Result<Self, ConfigError> {
        validate_weights(weights)?;
        let index = WeightedIndex::new(weights).map_err(|_| {
            ConfigError::SeverityWeightsNotNormalized {
                sum: weights.iter().sum(),
            }
        })?;
        Ok(Self {
            weights: weights.to_vec(),
            index,
        })
    }

    pub fn sample(&self, rng: &mut dyn RngCore) -> Severity {
        Severity::ALL[self.index.sample(rng)]
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }
}
