use bevy_ecs::prelude::{Query, Res, ResMut};

use crate::clock::{CurrentEvent, EventKind, EventSubject, SimulationClock};
use crate::distributions::{ServiceTime, SimulationRng};
use crate::ecs::{Patient, PatientState};
use crate::error::SimError;

/// A doctor has been granted: sample the treatment time and schedule completion.
pub fn service_started_system(
    mut clock: ResMut<SimulationClock>,
    mut rng: ResMut<SimulationRng>,
    service_time: Res<ServiceTime>,
    event: Res<CurrentEvent>,
    mut patients: Query<&mut Patient>,
) -> Result<(), SimError> {
    if event.0.kind != EventKind::ServiceStarted {
        return Ok(());
    }
    let Some(entity) = event.0.patient() else {
        return Ok(());
    };
    let Ok(mut patient) = patients.get_mut(entity) else {
        return Ok(());
    };
    if patient.state != PatientState::Waiting {
        return Ok(());
    }

    let duration = service_time.0.sample(&mut rng.0);
    patient.state = PatientState::InService;
    patient.service_start_time = Some(clock.now());
    patient.service_time = Some(duration);

    clock.schedule_in(
        duration,
        EventKind::ServiceCompleted,
        Some(EventSubject::Patient(entity)),
    )?;
    Ok(())
}
