//! Collects errors returned by event systems.
//!
//! Systems return `Result<(), SimError>` and are piped into [record_fault]. The
//! runner checks [SimulationFault] after every step and stops the run on the
//! first error.

use bevy_ecs::prelude::{In, ResMut, Resource};
use tracing::error;

use crate::error::SimError;

#[derive(Debug, Default, Resource)]
pub struct SimulationFault(pub Option<SimError>);

impl SimulationFault {
    pub fn take(&mut self) -> Option<SimError> {
        self.0.take()
    }
}

/// Keeps the first error reported during a step; later ones are logged only.
pub fn record_fault(In(result): In<Result<(), SimError>>, fault: Option<ResMut<SimulationFault>>) {
    let Err(err) = result else {
        return;
    };
    match fault {
        Some(mut fault) if fault.0.is_none() => fault.0 = Some(err),
        _ => error!(error = %err, "dropping simulation fault"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy_ecs::prelude::{IntoSystem, Schedule, World};

    fn failing_system() -> Result<(), SimError> {
        Err(SimError::InvalidDelay {
            delay: -1.0,
            now: 3.0,
        })
    }

    fn ok_system() -> Result<(), SimError> {
        Ok(())
    }

    #[test]
    fn first_error_is_kept() {
        let mut world = World::new();
        world.insert_resource(SimulationFault::default());

        let mut schedule = Schedule::default();
        schedule.add_systems((ok_system.pipe(record_fault), failing_system.pipe(record_fault)));
        schedule.run(&mut world);

        let fault = world.resource_mut::<SimulationFault>().take();
        assert_eq!(
            fault,
            Some(SimError::InvalidDelay {
                delay: -1.0,
                now: 3.0
            })
        );
        assert!(world.resource_mut::<SimulationFault>().take().is_none());
    }
}
