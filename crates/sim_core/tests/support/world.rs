#![allow(dead_code)]

use bevy_ecs::prelude::World;
use sim_core::clock::SimTime;
use sim_core::distributions::{ServiceTime, ServiceTimeKind, SimulationRng};
use sim_core::scenario::SimulationHorizon;
use sim_core::telemetry::MonitorConfig;
use sim_core::test_helpers::test_world;

/// Builder configuration for reproducible test worlds.
#[derive(Clone, Debug)]
pub struct TestWorldConfig {
    pub seed: u64,
    pub capacity: usize,
    pub service_time: ServiceTimeKind,
    pub horizon: Option<SimTime>,
    pub monitor_interval: SimTime,
}

impl Default for TestWorldConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            capacity: 1,
            service_time: ServiceTimeKind::Constant { duration: 10.0 },
            horizon: None,
            monitor_interval: 5.0,
        }
    }
}

/// Helper that populates the ECS world with the resources patient lifecycles need,
/// without an arrival generator. Patients are admitted by hand.
#[derive(Debug, Default)]
pub struct TestWorldBuilder {
    config: TestWorldConfig,
}

impl TestWorldBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.config.seed = seed;
        self
    }

    /// Number of doctors.
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.config.capacity = capacity;
        self
    }

    pub fn with_service_time(mut self, service_time: ServiceTimeKind) -> Self {
        self.config.service_time = service_time;
        self
    }

    /// Shorthand for a constant treatment duration.
    pub fn with_constant_service(self, duration: SimTime) -> Self {
        self.with_service_time(ServiceTimeKind::Constant { duration })
    }

    pub fn with_horizon(mut self, horizon: SimTime) -> Self {
        self.config.horizon = Some(horizon);
        self
    }

    pub fn with_monitor_interval(mut self, interval: SimTime) -> Self {
        self.config.monitor_interval = interval;
        self
    }

    /// Build the ECS world with the configured resources.
    pub fn build(self) -> World {
        let TestWorldConfig {
            seed,
            capacity,
            service_time,
            horizon,
            monitor_interval,
        } = self.config;

        let mut world = test_world(capacity, 0.0);
        world.insert_resource(SimulationRng::from_seed(seed));
        world.insert_resource(ServiceTime(
            service_time.build().expect("test service time should be valid"),
        ));
        world.insert_resource(MonitorConfig {
            interval: monitor_interval,
        });
        if let Some(horizon) = horizon {
            world.insert_resource(SimulationHorizon(horizon));
        }
        world
    }
}
