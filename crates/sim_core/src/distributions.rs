//! Probability distributions for inter-arrival and service durations.
//!
//! Every draw goes through the run's single [SimulationRng], so a run is fully
//! reproducible from its seed.

use bevy_ecs::prelude::Resource;
use rand::distributions::Uniform;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use rand_distr::{Distribution, Exp};
use serde::{Deserialize, Serialize};

use crate::clock::SimTime;
use crate::error::ConfigError;

/// Per-run random source. The only place randomness comes from during a run.
#[derive(Debug, Resource)]
pub struct SimulationRng(pub StdRng);

impl SimulationRng {
    pub fn from_seed(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }
}

/// Trait for sampling non-negative durations in simulation time units.
pub trait DurationDistribution: Send + Sync + std::fmt::Debug {
    fn sample(&self, rng: &mut dyn RngCore) -> SimTime;

    /// Expected value of a sample.
    fn mean(&self) -> SimTime;
}

/// Exponential distribution: Poisson process with rate `rate` per time unit.
#[derive(Debug, Clone)]
pub struct ExponentialDuration {
    pub rate: f64,
    dist: Exp<f64>,
}

impl ExponentialDuration {
    pub fn new(name: &'static str, rate: f64) -> Result<Self, ConfigError> {
        if !rate.is_finite() || rate <= 0.0 {
            return Err(ConfigError::NonPositiveRate { name, value: rate });
        }
        let dist = Exp::new(rate).map_err(|_| ConfigError::NonPositiveRate { name, value: rate })?;
        Ok(Self { rate, dist })
    }
}

impl DurationDistribution for ExponentialDuration {
    fn sample(&self, rng: &mut dyn RngCore) -> SimTime {
        self.dist.sample(rng)
    }

    fn mean(&self) -> SimTime {
        1.0 / self.rate
    }
}

/// Uniform distribution over the closed range `[min, max]`.
#[derive(Debug, Clone)]
pub struct UniformDuration {
    pub min: SimTime,
    pub max: SimTime,
    dist: Uniform<f64>,
}

impl UniformDuration {
    pub fn new(min: SimTime, max: SimTime) -> Result<Self, ConfigError> {
        if !min.is_finite() || !max.is_finite() || min < 0.0 || min > max {
            return Err(ConfigError::InvalidServiceRange { min, max });
        }
        Ok(Self {
            min,
            max,
            dist: Uniform::new_inclusive(min, max),
        })
    }
}

impl DurationDistribution for UniformDuration {
    fn sample(&self, rng: &mut dyn RngCore) -> SimTime {
        self.dist.sample(rng)
    }

    fn mean(&self) -> SimTime {
        (self.min + self.max) / 2.0
    }
}

/// Fixed duration; consumes no randomness.
#[derive(Debug, Clone)]
pub struct ConstantDuration {
    pub duration: SimTime,
}

impl DurationDistribution for ConstantDuration {
    fn sample(&self, _rng: &mut dyn RngCore) -> SimTime {
        self.duration
    }

    fn mean(&self) -> SimTime {
        self.duration
    }
}

/// Service-time distribution used by the doctors of one run.
#[derive(Debug, Resource)]
pub struct ServiceTime(pub Box<dyn DurationDistribution>);

/// Serializable description of the service-time distribution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ServiceTimeKind {
    /// Exponential service with `rate` completions per time unit.
    Exponential { rate: f64 },
    /// Uniform treatment duration in `[min, max]`.
    Uniform { min: SimTime, max: SimTime },
    Constant { duration: SimTime },
}

impl Default for ServiceTimeKind {
    fn default() -> Self {
        ServiceTimeKind::Exponential { rate: 0.2 }
    }
}

impl ServiceTimeKind {
    pub fn build(&self) -> Result<Box<dyn DurationDistribution>, ConfigError> {
        Ok(match *self {
            ServiceTimeKind::Exponential { rate } => {
                Box::new(ExponentialDuration::new("service_rate", rate)?)
            }
            ServiceTimeKind::Uniform { min, max } => Box::new(UniformDuration::new(min, max)?),
            ServiceTimeKind::Constant { duration } => {
                if !duration.is_finite() || duration < 0.0 {
                    return Err(ConfigError::InvalidServiceDuration(duration));
                }
                Box::new(ConstantDuration { duration })
            }
        })
    }

    pub fn mean(&self) -> SimTime {
        match *self {
            ServiceTimeKind::Exponential { rate } => 1.0 / rate,
            ServiceTimeKind::Uniform { min, max } => (min + max) / 2.0,
            ServiceTimeKind::Constant { duration } => duration,
        }
    }

    /// Service rate (completions per time unit per server).
    pub fn rate(&self) -> f64 {
        1.0 / self.mean()
    }

    /// Short label used in exported tables, e.g. `exp(0.2)` or `uniform(10,30)`.
    pub fn label(&self) -> String {
        match *self {
            ServiceTimeKind::Exponential { rate } => format!("exp({rate})"),
            ServiceTimeKind::Uniform { min, max } => format!("uniform({min},{max})"),
            ServiceTimeKind::Constant { duration } => format!("constant({duration})"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exponential_rejects_non_positive_rate() {
        assert!(ExponentialDuration::new("arrival_rate", 0.0).is_err());
        assert!(ExponentialDuration::new("arrival_rate", -1.0).is_err());
        assert!(ExponentialDuration::new("arrival_rate", f64::NAN).is_err());
    }

    #[test]
    fn exponential_sample_mean_matches_rate() {
        let dist = ExponentialDuration::new("service_rate", 0.2).unwrap();
        let mut rng = SimulationRng::from_seed(7);
        let n = 50_000;
        let mean = (0..n).map(|_| dist.sample(&mut rng.0)).sum::<f64>() / n as f64;
        assert!((mean - 5.0).abs() < 0.15, "mean was {mean}");
        assert_eq!(dist.mean(), 5.0);
    }

    #[test]
    fn uniform_samples_stay_in_range() {
        let dist = UniformDuration::new(10.0, 30.0).unwrap();
        let mut rng = SimulationRng::from_seed(1);
        for _ in 0..1_000 {
            let sample = dist.sample(&mut rng.0);
            assert!((10.0..=30.0).contains(&sample));
        }
        assert_eq!(dist.mean(), 20.0);
    }

    #[test]
    fn uniform_rejects_inverted_range() {
        assert_eq!(
            UniformDuration::new(30.0, 10.0).unwrap_err(),
            ConfigError::InvalidServiceRange {
                min: 30.0,
                max: 10.0
            }
        );
        assert!(UniformDuration::new(-1.0, 10.0).is_err());
    }

    #[test]
    fn same_seed_same_samples() {
        let dist = ExponentialDuration::new("arrival_rate", 0.4).unwrap();
        let mut a = SimulationRng::from_seed(42);
        let mut b = SimulationRng::from_seed(42);
        let first: Vec<f64> = (0..20).map(|_| dist.sample(&mut a.0)).collect();
        let second: Vec<f64> = (0..20).map(|_| dist.sample(&mut b.0)).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn service_kind_labels_and_means() {
        let exp = ServiceTimeKind::Exponential { rate: 0.2 };
        assert_eq!(exp.label(), "exp(0.2)");
        assert_eq!(exp.mean(), 5.0);
        let uniform = ServiceTimeKind::Uniform {
            min: 10.0,
            max: 30.0,
        };
        assert_eq!(uniform.label(), "uniform(10,30)");
        assert_eq!(uniform.rate(), 0.05);
        assert!(ServiceTimeKind::Constant { duration: -1.0 }.build().is_err());
    }
}
