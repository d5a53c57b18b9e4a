//! Simulation runner: advances the clock and routes events into the ECS.
//!
//! Clock progression and event routing happen here, outside systems. Each step
//! pops the next event from [SimulationClock], inserts it as [CurrentEvent],
//! then runs the schedule. Errors returned by systems are collected in
//! [SimulationFault] and end the run.

use bevy_ecs::prelude::{IntoSystem, Res, Schedule, World};
use bevy_ecs::schedule::{apply_deferred, IntoSystemConfigs};
use tracing::{debug, warn};

use crate::clock::{CurrentEvent, Event, EventKind, SimTime, SimulationClock};
use crate::error::SimError;
use crate::scenario::SimulationHorizon;
use crate::systems::{
    fault::{record_fault, SimulationFault},
    monitor::monitor_system,
    patient_arrived::patient_arrived_system,
    service_completed::service_completed_system,
    service_started::service_started_system,
    spawner::{patient_spawner_system, simulation_started_system},
};

// Condition functions for each event kind
fn is_simulation_started(event: Option<Res<CurrentEvent>>) -> bool {
    event
        .map(|e| e.0.kind == EventKind::SimulationStarted)
        .unwrap_or(false)
}

fn is_spawn_patient(event: Option<Res<CurrentEvent>>) -> bool {
    event
        .map(|e| e.0.kind == EventKind::SpawnPatient)
        .unwrap_or(false)
}

fn is_patient_arrived(event: Option<Res<CurrentEvent>>) -> bool {
    event
        .map(|e| e.0.kind == EventKind::PatientArrived)
        .unwrap_or(false)
}

fn is_service_started(event: Option<Res<CurrentEvent>>) -> bool {
    event
        .map(|e| e.0.kind == EventKind::ServiceStarted)
        .unwrap_or(false)
}

fn is_service_completed(event: Option<Res<CurrentEvent>>) -> bool {
    event
        .map(|e| e.0.kind == EventKind::ServiceCompleted)
        .unwrap_or(false)
}

fn is_monitor_sample(event: Option<Res<CurrentEvent>>) -> bool {
    event
        .map(|e| e.0.kind == EventKind::MonitorSample)
        .unwrap_or(false)
}

fn horizon(world: &World) -> SimTime {
    world
        .get_resource::<SimulationHorizon>()
        .map(|h| h.0)
        .unwrap_or(SimTime::INFINITY)
}

fn pop_due_event(world: &mut World) -> Result<Option<Event>, SimError> {
    let stop_at = horizon(world);
    let mut clock = world
        .get_resource_mut::<SimulationClock>()
        .ok_or(SimError::MissingResource("SimulationClock"))?;
    Ok(clock.pop_next_before(stop_at))
}

fn take_fault(world: &mut World) -> Result<(), SimError> {
    match world
        .get_resource_mut::<SimulationFault>()
        .and_then(|mut fault| fault.take())
    {
        Some(err) => {
            warn!(error = %err, "simulation stopped on fault");
            Err(err)
        }
        None => Ok(()),
    }
}

/// Runs one simulation step: pops the next event, inserts it as [CurrentEvent], then runs the schedule.
/// Returns `Ok(true)` if an event was processed, `Ok(false)` if the clock was empty or if the next
/// event is at or past [SimulationHorizon] (when that resource is present).
///
/// # Errors
///
/// Returns the first error a system reported during the step.
pub fn run_next_event(world: &mut World, schedule: &mut Schedule) -> Result<bool, SimError> {
    let Some(event) = pop_due_event(world)? else {
        return Ok(false);
    };
    world.insert_resource(CurrentEvent(event));
    schedule.run(world);
    take_fault(world)?;
    Ok(true)
}

/// Runs one simulation step and invokes `hook` after the schedule completes.
pub fn run_next_event_with_hook<F>(
    world: &mut World,
    schedule: &mut Schedule,
    mut hook: F,
) -> Result<bool, SimError>
where
    F: FnMut(&World, &Event),
{
    let Some(event) = pop_due_event(world)? else {
        return Ok(false);
    };
    world.insert_resource(CurrentEvent(event));
    schedule.run(world);
    take_fault(world)?;
    hook(world, &event);
    Ok(true)
}

/// Runs simulation steps until the event queue is empty, the horizon is reached or
/// `max_steps` is reached. Returns the number of steps executed.
pub fn run_steps(
    world: &mut World,
    schedule: &mut Schedule,
    max_steps: usize,
) -> Result<usize, SimError> {
    let mut steps = 0;
    while steps < max_steps && run_next_event(world, schedule)? {
        steps += 1;
    }
    Ok(steps)
}

/// Runs every event due before [SimulationHorizon], then parks the clock at the horizon.
///
/// Returns the number of events processed.
///
/// # Errors
///
/// [SimError::MissingResource] if the world has no horizon (arrivals never stop
/// on their own), or the first error a system reported.
pub fn run_until_horizon(world: &mut World, schedule: &mut Schedule) -> Result<usize, SimError> {
    run_until_horizon_with_hook(world, schedule, |_, _| {})
}

/// Same as [run_until_horizon], invoking `hook` after every step.
pub fn run_until_horizon_with_hook<F>(
    world: &mut World,
    schedule: &mut Schedule,
    mut hook: F,
) -> Result<usize, SimError>
where
    F: FnMut(&World, &Event),
{
    let stop_at = world
        .get_resource::<SimulationHorizon>()
        .map(|h| h.0)
        .ok_or(SimError::MissingResource("SimulationHorizon"))?;

    let mut steps = 0;
    while run_next_event_with_hook(world, schedule, &mut hook)? {
        steps += 1;
    }

    let mut clock = world
        .get_resource_mut::<SimulationClock>()
        .ok_or(SimError::MissingResource("SimulationClock"))?;
    clock.advance_to(stop_at);
    debug!(steps, horizon = stop_at, pending = clock.pending(), "run reached horizon");
    Ok(steps)
}

/// Builds the default simulation schedule: all event-reacting systems plus [apply_deferred]
/// so that spawned patients are applied before the next step.
///
/// Systems are conditionally executed based on event type to reduce overhead.
pub fn simulation_schedule() -> Schedule {
    let mut schedule = Schedule::default();

    schedule.add_systems(
        (
            // SimulationStarted
            simulation_started_system
                .pipe(record_fault)
                .run_if(is_simulation_started),
            // SpawnPatient
            patient_spawner_system
                .pipe(record_fault)
                .run_if(is_spawn_patient),
            // PatientArrived
            patient_arrived_system
                .pipe(record_fault)
                .run_if(is_patient_arrived),
            // ServiceStarted
            service_started_system
                .pipe(record_fault)
                .run_if(is_service_started),
            // ServiceCompleted
            service_completed_system
                .pipe(record_fault)
                .run_if(is_service_completed),
            // MonitorSample
            monitor_system.pipe(record_fault).run_if(is_monitor_sample),
            // Always run apply_deferred to ensure spawned entities are available
            apply_deferred,
        )
            .chain(),
    );

    schedule
}

/// Initializes the simulation by scheduling the SimulationStarted event at time 0.
/// Call this after building the scenario and before running events.
pub fn initialize_simulation(world: &mut World) -> Result<(), SimError> {
    let mut clock = world
        .get_resource_mut::<SimulationClock>()
        .ok_or(SimError::MissingResource("SimulationClock"))?;
    clock.schedule_at(0.0, EventKind::SimulationStarted, None)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distributions::{DurationDistribution, ServiceTime};
    use crate::severity::Severity;
    use crate::telemetry::SimTelemetry;
    use crate::test_helpers::{spawn_patient, test_world};
    use rand::RngCore;

    /// Service time that would move the clock backward.
    #[derive(Debug)]
    struct NegativeDuration;

    impl DurationDistribution for NegativeDuration {
        fn sample(&self, _rng: &mut dyn RngCore) -> SimTime {
            -1.0
        }

        fn mean(&self) -> SimTime {
            -1.0
        }
    }

    #[test]
    fn runs_one_patient_end_to_end() {
        let mut world = test_world(1, 4.0);
        world.insert_resource(SimulationHorizon(100.0));
        spawn_patient(&mut world, 1, Severity::Medium, 2.0);

        let mut schedule = simulation_schedule();
        let steps = run_until_horizon(&mut world, &mut schedule).expect("run");

        // arrival, service start, completion
        assert_eq!(steps, 3);
        let telemetry = world.resource::<SimTelemetry>();
        assert_eq!(telemetry.patients.len(), 1);
        let record = &telemetry.patients[0];
        assert_eq!(record.wait_time, 0.0);
        assert_eq!(record.depart_time, 6.0);
        assert_eq!(world.resource::<SimulationClock>().now(), 100.0);
    }

    #[test]
    fn events_at_horizon_are_not_processed() {
        let mut world = test_world(1, 4.0);
        world.insert_resource(SimulationHorizon(2.0));
        spawn_patient(&mut world, 1, Severity::Low, 2.0);

        let mut schedule = simulation_schedule();
        let steps = run_until_horizon(&mut world, &mut schedule).expect("run");

        assert_eq!(steps, 0);
        assert_eq!(world.resource::<SimTelemetry>().arrived_total, 0);
        assert_eq!(world.resource::<SimulationClock>().pending(), 1);
    }

    #[test]
    fn hook_sees_non_decreasing_time() {
        let mut world = test_world(1, 3.0);
        world.insert_resource(SimulationHorizon(50.0));
        for (id, t) in [(1, 1.0), (2, 1.5), (3, 2.0)] {
            spawn_patient(&mut world, id, Severity::Low, t);
        }

        let mut seen = Vec::new();
        let mut schedule = simulation_schedule();
        run_until_horizon_with_hook(&mut world, &mut schedule, |_, event| {
            seen.push(event.timestamp)
        })
        .expect("run");

        assert!(seen.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(world.resource::<SimTelemetry>().patients.len(), 3);
    }

    #[test]
    fn missing_horizon_is_an_error() {
        let mut world = test_world(1, 1.0);
        let mut schedule = simulation_schedule();
        assert_eq!(
            run_until_horizon(&mut world, &mut schedule),
            Err(SimError::MissingResource("SimulationHorizon"))
        );
    }

    #[test]
    fn negative_service_time_stops_the_run() {
        let mut world = test_world(1, 1.0);
        world.insert_resource(ServiceTime(Box::new(NegativeDuration)));
        world.insert_resource(SimulationHorizon(100.0));
        spawn_patient(&mut world, 1, Severity::High, 1.0);
        spawn_patient(&mut world, 2, Severity::High, 5.0);

        let mut schedule = simulation_schedule();
        let result = run_until_horizon(&mut world, &mut schedule);

        assert_eq!(
            result,
            Err(SimError::InvalidDelay {
                delay: -1.0,
                now: 1.0
            })
        );
        // The second arrival is never resumed and the clock stays where it failed.
        assert_eq!(world.resource::<SimTelemetry>().arrived_total, 1);
        assert!(world.resource::<SimTelemetry>().patients.is_empty());
        assert_eq!(world.resource::<SimulationClock>().now(), 1.0);
        assert!(world.resource_mut::<SimulationFault>().take().is_none());
    }
}
