//! Arrival systems: start the generator and turn `SpawnPatient` events into patients.

use bevy_ecs::prelude::{Commands, Res, ResMut};
use tracing::debug;

use crate::arrivals::ArrivalGenerator;
use crate::clock::{CurrentEvent, EventKind, EventSubject, SimulationClock};
use crate::distributions::SimulationRng;
use crate::error::SimError;
use crate::telemetry::MonitorConfig;

/// Reacts to `SimulationStarted`: schedules the first arrival and the first monitor sample.
pub fn simulation_started_system(
    mut clock: ResMut<SimulationClock>,
    generator: Res<ArrivalGenerator>,
    mut rng: ResMut<SimulationRng>,
    monitor: Option<Res<MonitorConfig>>,
    event: Res<CurrentEvent>,
) -> Result<(), SimError> {
    if event.0.kind != EventKind::SimulationStarted {
        return Ok(());
    }

    let delay = generator.next_delay(&mut rng.0);
    clock.schedule_in(delay, EventKind::SpawnPatient, None)?;

    // First sample is taken at the start time.
    if monitor.is_some() {
        clock.schedule_in(0.0, EventKind::MonitorSample, None)?;
    }
    Ok(())
}

/// Spawns one patient, hands it to the lifecycle and schedules the next arrival.
pub fn patient_spawner_system(
    mut commands: Commands,
    mut clock: ResMut<SimulationClock>,
    mut generator: ResMut<ArrivalGenerator>,
    mut rng: ResMut<SimulationRng>,
    event: Res<CurrentEvent>,
) -> Result<(), SimError> {
    if event.0.kind != EventKind::SpawnPatient {
        return Ok(());
    }

    let patient = generator.next_patient(&mut rng.0);
    debug!(
        t = clock.now(),
        patient = patient.id,
        severity = %patient.severity,
        "patient spawned"
    );
    let entity = commands.spawn(patient).id();
    clock.schedule_in(
        0.0,
        EventKind::PatientArrived,
        Some(EventSubject::Patient(entity)),
    )?;

    let delay = generator.next_delay(&mut rng.0);
    clock.schedule_in(delay, EventKind::SpawnPatient, None)?;
    Ok(())
}
