//! Arrival generator: creates patients at exponential intervals.
//!
//! The generator reacts to `SimulationStarted` and then reschedules its own
//! `SpawnPatient` event after every arrival, so it runs until the clock stops.

use bevy_ecs::prelude::Resource;
use rand::RngCore;

use crate::clock::SimTime;
use crate::distributions::DurationDistribution;
use crate::ecs::Patient;
use crate::severity::SeverityMix;

#[derive(Debug)]
pub struct ArrivalConfig {
    /// Inter-arrival time distribution.
    pub inter_arrival: Box<dyn DurationDistribution>,
    /// Severity class mix for new patients.
    pub severity_mix: SeverityMix,
}

#[derive(Debug, Resource)]
pub struct ArrivalGenerator {
    pub config: ArrivalConfig,
    spawned_count: u64,
}

impl ArrivalGenerator {
    pub fn new(config: ArrivalConfig) -> Self {
        Self {
            config,
            spawned_count: 0,
        }
    }

    /// Sample the delay until the next arrival.
    pub fn next_delay(&self, rng: &mut dyn RngCore) -> SimTime {
        self.config.inter_arrival.sample(rng)
    }

    /// Create the next patient with a freshly drawn severity.
    pub fn next_patient(&mut self, rng: &mut dyn RngCore) -> Patient {
        self.spawned_count += 1;
        let severity = self.config.severity_mix.sample(rng);
        Patient::new(self.spawned_count, severity)
    }

    /// Get the number of patients spawned so far.
    pub fn spawned_count(&self) -> u64 {
        self.spawned_count
    }
}
