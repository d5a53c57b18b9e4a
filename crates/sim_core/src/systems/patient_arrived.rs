use bevy_ecs::prelude::{Query, Res, ResMut};
use tracing::debug;

use crate::clock::{CurrentEvent, EventKind, EventSubject, SimulationClock};
use crate::ecs::{Patient, PatientState};
use crate::error::SimError;
use crate::resource::{Acquisition, PriorityResource};
use crate::telemetry::SimTelemetry;

/// Records the arrival and requests a doctor at the patient's priority.
///
/// A granted request resumes through a zero-delay `ServiceStarted`; a queued one
/// is resumed by `ServiceCompleted` when a doctor hands over.
pub fn patient_arrived_system(
    mut clock: ResMut<SimulationClock>,
    mut doctors: ResMut<PriorityResource>,
    mut telemetry: ResMut<SimTelemetry>,
    event: Res<CurrentEvent>,
    mut patients: Query<&mut Patient>,
) -> Result<(), SimError> {
    if event.0.kind != EventKind::PatientArrived {
        return Ok(());
    }
    let Some(entity) = event.0.patient() else {
        return Ok(());
    };
    let Ok(mut patient) = patients.get_mut(entity) else {
        return Ok(());
    };
    if patient.state != PatientState::Arrived {
        return Ok(());
    }

    let now = clock.now();
    patient.arrival_time = Some(now);
    patient.state = PatientState::Waiting;
    telemetry.arrived_total += 1;

    match doctors.acquire(patient.priority(), entity) {
        Acquisition::Granted => {
            clock.schedule_in(
                0.0,
                EventKind::ServiceStarted,
                Some(EventSubject::Patient(entity)),
            )?;
        }
        Acquisition::Queued { enqueue_sequence } => {
            debug!(
                t = now,
                patient = patient.id,
                severity = %patient.severity,
                enqueue_sequence,
                queue_len = doctors.queue_len(),
                "patient queued"
            );
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy_ecs::prelude::{IntoSystem, Schedule};

    use crate::severity::Severity;
    use crate::systems::fault::record_fault;
    use crate::test_helpers::{pop_into_current, spawn_patient, test_world};

    fn run_arrival(world: &mut bevy_ecs::prelude::World) {
        let mut schedule = Schedule::default();
        schedule.add_systems(patient_arrived_system.pipe(record_fault));
        schedule.run(world);
    }

    #[test]
    fn free_doctor_grants_immediately() {
        let mut world = test_world(1, 10.0);
        let entity = spawn_patient(&mut world, 1, Severity::Low, 3.0);
        pop_into_current(&mut world);
        run_arrival(&mut world);

        let patient = *world.entity(entity).get::<Patient>().expect("patient");
        assert_eq!(patient.state, PatientState::Waiting);
        assert_eq!(patient.arrival_time, Some(3.0));
        assert_eq!(world.resource::<PriorityResource>().in_use(), 1);
        assert_eq!(world.resource::<SimTelemetry>().arrived_total, 1);

        let next = pop_into_current(&mut world);
        assert_eq!(next.kind, EventKind::ServiceStarted);
        assert_eq!(next.timestamp, 3.0);
        assert_eq!(next.patient(), Some(entity));
    }

    #[test]
    fn busy_doctor_queues_request() {
        let mut world = test_world(1, 10.0);
        world
            .resource_mut::<PriorityResource>()
            .acquire(0, bevy_ecs::prelude::Entity::from_raw(999));
        spawn_patient(&mut world, 1, Severity::High, 1.0);
        pop_into_current(&mut world);
        run_arrival(&mut world);

        let doctors = world.resource::<PriorityResource>();
        assert_eq!(doctors.in_use(), 1);
        assert_eq!(doctors.queue_len(), 1);
        assert!(world.resource::<SimulationClock>().is_empty());
    }
}
