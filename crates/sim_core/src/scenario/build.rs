use bevy_ecs::prelude::World;
use tracing::debug;

use crate::arrivals::{ArrivalConfig, ArrivalGenerator};
use crate::clock::SimulationClock;
use crate::distributions::{ExponentialDuration, ServiceTime, SimulationRng};
use crate::error::SimError;
use crate::resource::PriorityResource;
use crate::scenario::params::{ScenarioParams, SimulationHorizon};
use crate::severity::SeverityMix;
use crate::systems::fault::SimulationFault;
use crate::telemetry::{MonitorConfig, QueueSnapshots, SimTelemetry};

/// Validates `params` and inserts every resource a run needs into `world`.
///
/// Call [crate::runner::initialize_simulation] afterwards to schedule the start event.
///
/// # Errors
///
/// [SimError::InvalidConfiguration] when the parameters fail validation; the world
/// is left untouched in that case.
pub fn build_scenario(world: &mut World, params: ScenarioParams) -> Result<(), SimError> {
    params.validate()?;

    let inter_arrival = ExponentialDuration::new("arrival_rate", params.arrival_rate)?;
    let severity_mix = SeverityMix::new(&params.severity_weights)?;
    let service_time = params.service_time.build()?;
    let seed = params.effective_seed();

    debug!(
        run_id = params.run_id,
        seed,
        capacity = params.capacity,
        arrival_rate = params.arrival_rate,
        service = %params.service_time.label(),
        horizon = params.horizon,
        "building scenario"
    );

    world.insert_resource(SimulationClock::default());
    world.insert_resource(SimulationHorizon(params.horizon));
    world.insert_resource(SimulationRng::from_seed(seed));
    world.insert_resource(PriorityResource::new(params.capacity));
    world.insert_resource(ArrivalGenerator::new(ArrivalConfig {
        inter_arrival: Box::new(inter_arrival),
        severity_mix,
    }));
    world.insert_resource(ServiceTime(service_time));
    world.insert_resource(MonitorConfig {
        interval: params.sampling_interval,
    });
    world.insert_resource(SimTelemetry::default());
    world.insert_resource(QueueSnapshots::default());
    world.insert_resource(SimulationFault::default());
    world.insert_resource(params);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfigError;

    #[test]
    fn inserts_run_resources() {
        let mut world = World::new();
        build_scenario(&mut world, ScenarioParams::default().with_capacity(5)).expect("build");

        assert_eq!(world.resource::<PriorityResource>().capacity(), 5);
        assert_eq!(world.resource::<SimulationHorizon>().0, 28_800.0);
        assert_eq!(world.resource::<MonitorConfig>().interval, 5.0);
        assert!(world.contains_resource::<ArrivalGenerator>());
        assert!(world.contains_resource::<ServiceTime>());
        assert!(world.contains_resource::<ScenarioParams>());
    }

    #[test]
    fn invalid_params_leave_world_empty() {
        let mut world = World::new();
        let err = build_scenario(&mut world, ScenarioParams::default().with_capacity(0));
        assert_eq!(
            err,
            Err(SimError::InvalidConfiguration(
                ConfigError::NonPositiveCapacity(0)
            ))
        );
        assert!(!world.contains_resource::<SimulationClock>());
    }
}
