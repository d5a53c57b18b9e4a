#![allow(dead_code)]

use bevy_ecs::prelude::{Entity, World};
use sim_core::clock::SimTime;
use sim_core::severity::Severity;
use sim_core::telemetry::{PatientRecord, SimTelemetry};
use sim_core::test_helpers::spawn_patient;

/// Admit a patient that arrives at `at`. Ids are only used to find records later.
pub fn admit(world: &mut World, id: u64, severity: Severity, at: SimTime) -> Entity {
    spawn_patient(world, id, severity, at)
}

/// Admit one patient per `(id, severity, time)` tuple.
pub fn admit_all(world: &mut World, patients: &[(u64, Severity, SimTime)]) -> Vec<Entity> {
    patients
        .iter()
        .map(|&(id, severity, at)| admit(world, id, severity, at))
        .collect()
}

/// The departure record of patient `id`.
pub fn record(world: &World, id: u64) -> PatientRecord {
    world
        .resource::<SimTelemetry>()
        .patients
        .iter()
        .find(|record| record.id == id)
        .cloned()
        .unwrap_or_else(|| panic!("patient {id} has not departed"))
}

/// Patient ids in the order their service started.
pub fn service_order(world: &World) -> Vec<u64> {
    let mut records = world.resource::<SimTelemetry>().patients.clone();
    records.sort_by(|a, b| {
        a.service_start_time()
            .total_cmp(&b.service_start_time())
            .then(a.depart_time.total_cmp(&b.depart_time))
    });
    records.into_iter().map(|record| record.id).collect()
}
