//! One complete run: build the world, drive it to the horizon, collect results.

use bevy_ecs::prelude::World;
use tracing::debug;

use crate::error::SimError;
use crate::runner::{initialize_simulation, run_until_horizon, simulation_schedule};
use crate::scenario::{build_scenario, ScenarioParams};
use crate::summary::{summarize, RunSummary};
use crate::telemetry::{PatientRecord, QueueSnapshot, QueueSnapshots, SimTelemetry};

/// Everything a finished run hands back to its caller.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub params: ScenarioParams,
    pub summary: RunSummary,
    /// Departed patients in departure order.
    pub patients: Vec<PatientRecord>,
    /// Monitor samples in time order.
    pub snapshots: Vec<QueueSnapshot>,
    pub events_processed: usize,
    /// Patients that arrived before the horizon, including those still waiting or in service.
    pub arrived: u64,
}

/// Runs `params` to its horizon in a fresh world.
///
/// # Errors
///
/// [SimError::InvalidConfiguration] for rejected parameters; any error a system
/// reported while running.
pub fn run_scenario(params: &ScenarioParams) -> Result<RunOutput, SimError> {
    let mut world = World::new();
    build_scenario(&mut world, params.clone())?;
    initialize_simulation(&mut world)?;

    let mut schedule = simulation_schedule();
    let events_processed = run_until_horizon(&mut world, &mut schedule)?;
    collect_output(&mut world, params, events_processed)
}

/// Moves telemetry out of a finished world and summarizes it.
pub fn collect_output(
    world: &mut World,
    params: &ScenarioParams,
    events_processed: usize,
) -> Result<RunOutput, SimError> {
    let (patients, arrived) = {
        let mut telemetry = world
            .get_resource_mut::<SimTelemetry>()
            .ok_or(SimError::MissingResource("SimTelemetry"))?;
        (std::mem::take(&mut telemetry.patients), telemetry.arrived_total)
    };
    let snapshots = {
        let mut snapshots = world
            .get_resource_mut::<QueueSnapshots>()
            .ok_or(SimError::MissingResource("QueueSnapshots"))?;
        std::mem::take(&mut snapshots.snapshots)
    };

    let summary = summarize(params, &patients, &snapshots);
    debug!(
        run_id = params.run_id,
        events_processed,
        arrived,
        departed = patients.len(),
        "run finished"
    );

    Ok(RunOutput {
        params: params.clone(),
        summary,
        patients,
        snapshots,
        events_processed,
        arrived,
    })
}
