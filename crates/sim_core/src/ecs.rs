use bevy_ecs::prelude::Component;

use crate::clock::SimTime;
use crate::severity::Severity;

/// Lifecycle of one patient. Linear; a patient never returns to `Waiting`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatientState {
    Arrived,
    Waiting,
    InService,
    Departed,
}

#[derive(Debug, Clone, Copy, PartialEq, Component)]
pub struct Patient {
    /// 1-based arrival number within the run.
    pub id: u64,
    pub severity: Severity,
    pub state: PatientState,
    /// Set when the patient requests a doctor (entering `Arrived` handling).
    pub arrival_time: Option<SimTime>,
    pub service_start_time: Option<SimTime>,
    pub service_time: Option<SimTime>,
}

impl Patient {
    pub fn new(id: u64, severity: Severity) -> Self {
        Self {
            id,
            severity,
            state: PatientState::Arrived,
            arrival_time: None,
            service_start_time: None,
            service_time: None,
        }
    }

    pub fn priority(&self) -> u8 {
        self.severity.priority()
    }
}
