use bevy_ecs::prelude::{Res, ResMut};

use crate::clock::{CurrentEvent, EventKind, SimulationClock};
use crate::error::SimError;
use crate::resource::PriorityResource;
use crate::telemetry::{MonitorConfig, QueueSnapshot, QueueSnapshots, SimTelemetry, SnapshotCounts};

/// Takes one point-in-time sample of the doctor pool, then waits one interval.
pub fn monitor_system(
    mut clock: ResMut<SimulationClock>,
    config: Res<MonitorConfig>,
    doctors: Res<PriorityResource>,
    telemetry: Res<SimTelemetry>,
    mut snapshots: ResMut<QueueSnapshots>,
    event: Res<CurrentEvent>,
) -> Result<(), SimError> {
    if event.0.kind != EventKind::MonitorSample {
        return Ok(());
    }

    snapshots.snapshots.push(QueueSnapshot {
        timestamp: clock.now(),
        queue_length: doctors.queue_len(),
        in_use: doctors.in_use(),
        utilization: doctors.utilization(),
        counts: SnapshotCounts {
            arrived: telemetry.arrived_total,
            waiting: doctors.queue_len() as u64,
            in_service: doctors.in_use() as u64,
            departed: telemetry.departed_total,
        },
    });

    clock.schedule_in(config.interval, EventKind::MonitorSample, None)?;
    Ok(())
}
