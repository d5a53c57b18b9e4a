//! Test helpers for common test setup and utilities.
//!
//! This module provides shared test utilities to reduce duplication across test files.

use bevy_ecs::prelude::{Entity, World};

use crate::clock::{CurrentEvent, Event, EventKind, EventSubject, SimTime, SimulationClock};
use crate::distributions::{ConstantDuration, ServiceTime, SimulationRng};
use crate::ecs::Patient;
use crate::resource::PriorityResource;
use crate::severity::Severity;
use crate::systems::fault::SimulationFault;
use crate::telemetry::{MonitorConfig, QueueSnapshots, SimTelemetry};

/// Create a basic test world with essential resources and a fixed service time.
///
/// No arrival generator is inserted; patients are added with [spawn_patient].
/// For full runs, use [crate::scenario::build_scenario].
pub fn test_world(capacity: usize, service_time: SimTime) -> World {
    let mut world = World::new();
    world.insert_resource(SimulationClock::default());
    world.insert_resource(PriorityResource::new(capacity));
    world.insert_resource(SimulationRng::from_seed(0));
    world.insert_resource(ServiceTime(Box::new(ConstantDuration {
        duration: service_time,
    })));
    world.insert_resource(SimTelemetry::default());
    world.insert_resource(MonitorConfig::default());
    world.insert_resource(QueueSnapshots::default());
    world.insert_resource(SimulationFault::default());
    world
}

/// Spawn a patient and schedule its arrival at `arrive_at`.
///
/// # Panics
///
/// Panics if `arrive_at` lies before the current clock time.
pub fn spawn_patient(world: &mut World, id: u64, severity: Severity, arrive_at: SimTime) -> Entity {
    let entity = world.spawn(Patient::new(id, severity)).id();
    world
        .resource_mut::<SimulationClock>()
        .schedule_at(
            arrive_at,
            EventKind::PatientArrived,
            Some(EventSubject::Patient(entity)),
        )
        .expect("arrival time should not be in the past");
    entity
}

/// Pop the next event and make it the [CurrentEvent], as the runner does.
///
/// # Panics
///
/// Panics if the clock has no pending events.
pub fn pop_into_current(world: &mut World) -> Event {
    let event = world
        .resource_mut::<SimulationClock>()
        .pop_next()
        .expect("pending event");
    world.insert_resource(CurrentEvent(event));
    event
}
