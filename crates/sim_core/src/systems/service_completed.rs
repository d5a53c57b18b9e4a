use bevy_ecs::prelude::{Commands, Query, Res, ResMut};
use tracing::debug;

use crate::clock::{CurrentEvent, EventKind, EventSubject, SimulationClock};
use crate::ecs::{Patient, PatientState};
use crate::error::SimError;
use crate::resource::PriorityResource;
use crate::telemetry::{PatientRecord, SimTelemetry};

/// Treatment finished: free the doctor, record the patient and despawn it.
///
/// When requests are waiting, the doctor passes straight to the most urgent one
/// in the same instant, so `in_use` never dips in between.
pub fn service_completed_system(
    mut commands: Commands,
    mut clock: ResMut<SimulationClock>,
    mut doctors: ResMut<PriorityResource>,
    mut telemetry: ResMut<SimTelemetry>,
    event: Res<CurrentEvent>,
    mut patients: Query<&mut Patient>,
) -> Result<(), SimError> {
    if event.0.kind != EventKind::ServiceCompleted {
        return Ok(());
    }
    let Some(entity) = event.0.patient() else {
        return Ok(());
    };
    let Ok(mut patient) = patients.get_mut(entity) else {
        return Ok(());
    };
    if patient.state != PatientState::InService {
        return Ok(());
    }

    let now = clock.now();
    let id = patient.id;
    let missing = |field: &'static str| SimError::IncompleteLifecycle {
        patient: id,
        field,
        now,
    };
    let arrival_time = patient.arrival_time.ok_or_else(|| missing("arrival_time"))?;
    let service_start = patient
        .service_start_time
        .ok_or_else(|| missing("service_start_time"))?;
    let service_time = patient.service_time.ok_or_else(|| missing("service_time"))?;

    if let Some(next) = doctors.release() {
        debug!(
            t = now,
            priority = next.priority,
            enqueue_sequence = next.enqueue_sequence,
            "doctor handed over"
        );
        clock.schedule_in(
            0.0,
            EventKind::ServiceStarted,
            Some(EventSubject::Patient(next.waiter)),
        )?;
    }

    patient.state = PatientState::Departed;
    telemetry.departed_total += 1;
    telemetry.patients.push(PatientRecord {
        id,
        severity: patient.severity,
        arrival_time,
        wait_time: service_start - arrival_time,
        service_time,
        depart_time: now,
    });

    commands.entity(entity).despawn();
    Ok(())
}
