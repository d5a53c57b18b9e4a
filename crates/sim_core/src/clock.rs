//! Simulated time and the pending-event schedule.
//!
//! Events are ordered by `(timestamp, sequence)`. The sequence number is handed
//! out at scheduling time, so two events due at the same instant resume in the
//! order they were scheduled.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use bevy_ecs::prelude::{Entity, Resource};

use crate::error::SimError;

/// Elapsed simulated time. Minutes by convention; the engine itself is unit-agnostic.
pub type SimTime = f64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    SimulationStarted,
    SpawnPatient,
    PatientArrived,
    ServiceStarted,
    ServiceCompleted,
    MonitorSample,
}

/// Entity the event resumes, if it belongs to a specific lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventSubject {
    Patient(Entity),
}

#[derive(Debug, Clone, Copy)]
pub struct Event {
    pub timestamp: SimTime,
    pub sequence: u64,
    pub kind: EventKind,
    pub subject: Option<EventSubject>,
}

impl Event {
    pub fn patient(&self) -> Option<Entity> {
        match self.subject {
            Some(EventSubject::Patient(entity)) => Some(entity),
            None => None,
        }
    }
}

impl Ord for Event {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering to make BinaryHeap a min-heap by (timestamp, sequence).
        other
            .timestamp
            .total_cmp(&self.timestamp)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

impl PartialOrd for Event {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Event {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Event {}

/// The event currently being processed by the schedule.
#[derive(Debug, Clone, Copy, Resource)]
pub struct CurrentEvent(pub Event);

#[derive(Debug, Default, Resource)]
pub struct SimulationClock {
    now: SimTime,
    next_sequence: u64,
    events: BinaryHeap<Event>,
}

impl SimulationClock {
    pub fn now(&self) -> SimTime {
        self.now
    }

    /// Schedule `kind` to resume `delay` time units from now.
    ///
    /// Returns the sequence number assigned to the event.
    ///
    /// # Errors
    ///
    /// [SimError::InvalidDelay] if `delay` is negative or NaN.
    pub fn schedule_in(
        &mut self,
        delay: SimTime,
        kind: EventKind,
        subject: Option<EventSubject>,
    ) -> Result<u64, SimError> {
        if delay.is_nan() || delay < 0.0 {
            return Err(SimError::InvalidDelay {
                delay,
                now: self.now,
            });
        }
        Ok(self.push(self.now + delay, kind, subject))
    }

    /// Schedule `kind` at an absolute time, which must not lie in the past.
    pub fn schedule_at(
        &mut self,
        timestamp: SimTime,
        kind: EventKind,
        subject: Option<EventSubject>,
    ) -> Result<u64, SimError> {
        if timestamp.is_nan() || timestamp < self.now {
            return Err(SimError::InvalidDelay {
                delay: timestamp - self.now,
                now: self.now,
            });
        }
        Ok(self.push(timestamp, kind, subject))
    }

    fn push(&mut self, timestamp: SimTime, kind: EventKind, subject: Option<EventSubject>) -> u64 {
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        self.events.push(Event {
            timestamp,
            sequence,
            kind,
            subject,
        });
        sequence
    }

    /// Pops the earliest event and advances `now` to its timestamp.
    pub fn pop_next(&mut self) -> Option<Event> {
        let event = self.events.pop()?;
        assert!(
            event.timestamp >= self.now,
            "clock moved backward: {} -> {}",
            self.now,
            event.timestamp
        );
        self.now = event.timestamp;
        Some(event)
    }

    /// Pops the earliest event only if it is due strictly before `horizon`.
    pub fn pop_next_before(&mut self, horizon: SimTime) -> Option<Event> {
        match self.next_event_time() {
            Some(timestamp) if timestamp < horizon => self.pop_next(),
            _ => None,
        }
    }

    /// Moves `now` forward to `horizon`. Never moves time backward.
    pub fn advance_to(&mut self, horizon: SimTime) {
        if horizon > self.now {
            self.now = horizon;
        }
    }

    /// Resumes events in `(timestamp, sequence)` order until the queue is empty or the
    /// next event is due at or after `horizon`, then leaves the clock at `horizon`.
    ///
    /// `resume` may schedule further events. Returns the number of events resumed.
    pub fn run_until<F>(&mut self, horizon: SimTime, mut resume: F) -> usize
    where
        F: FnMut(&mut SimulationClock, Event),
    {
        let mut resumed = 0;
        while let Some(event) = self.pop_next_before(horizon) {
            resume(self, event);
            resumed += 1;
        }
        self.advance_to(horizon);
        resumed
    }

    pub fn next_event_time(&self) -> Option<SimTime> {
        self.events.peek().map(|event| event.timestamp)
    }

    pub fn pending(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_pops_events_in_time_order() {
        let mut clock = SimulationClock::default();
        clock.schedule_at(10.0, EventKind::SpawnPatient, None).unwrap();
        clock.schedule_at(5.0, EventKind::SpawnPatient, None).unwrap();
        clock.schedule_at(20.0, EventKind::SpawnPatient, None).unwrap();

        let first = clock.pop_next().expect("first event");
        assert_eq!(first.timestamp, 5.0);
        assert_eq!(clock.now(), 5.0);

        let second = clock.pop_next().expect("second event");
        assert_eq!(second.timestamp, 10.0);
        assert_eq!(clock.now(), 10.0);

        let third = clock.pop_next().expect("third event");
        assert_eq!(third.timestamp, 20.0);
        assert_eq!(clock.now(), 20.0);

        assert!(clock.pop_next().is_none());
        assert!(clock.is_empty());
    }

    #[test]
    fn same_time_events_resume_in_scheduling_order() {
        let mut clock = SimulationClock::default();
        clock.schedule_at(3.0, EventKind::MonitorSample, None).unwrap();
        clock.schedule_at(3.0, EventKind::SpawnPatient, None).unwrap();
        clock.schedule_at(3.0, EventKind::PatientArrived, None).unwrap();

        let kinds: Vec<EventKind> = std::iter::from_fn(|| clock.pop_next())
            .map(|event| event.kind)
            .collect();
        assert_eq!(
            kinds,
            vec![
                EventKind::MonitorSample,
                EventKind::SpawnPatient,
                EventKind::PatientArrived
            ]
        );
    }

    #[test]
    fn negative_delay_is_rejected() {
        let mut clock = SimulationClock::default();
        let err = clock
            .schedule_in(-0.5, EventKind::SpawnPatient, None)
            .unwrap_err();
        assert_eq!(
            err,
            SimError::InvalidDelay {
                delay: -0.5,
                now: 0.0
            }
        );
        assert!(clock
            .schedule_in(f64::NAN, EventKind::SpawnPatient, None)
            .is_err());
        assert!(clock.is_empty());
    }

    #[test]
    fn run_until_stops_before_horizon_and_lands_on_it() {
        let mut clock = SimulationClock::default();
        clock.schedule_at(2.0, EventKind::SpawnPatient, None).unwrap();
        clock.schedule_at(10.0, EventKind::SpawnPatient, None).unwrap();
        clock.schedule_at(12.0, EventKind::SpawnPatient, None).unwrap();

        let mut seen = Vec::new();
        let resumed = clock.run_until(10.0, |clock, event| seen.push((clock.now(), event.kind)));

        assert_eq!(resumed, 1);
        assert_eq!(seen, vec![(2.0, EventKind::SpawnPatient)]);
        assert_eq!(clock.now(), 10.0);
        assert_eq!(clock.pending(), 2);
    }

    #[test]
    fn zero_delay_insertions_run_after_queued_same_time_events() {
        let mut clock = SimulationClock::default();
        clock.schedule_at(1.0, EventKind::SpawnPatient, None).unwrap();
        clock.schedule_at(1.0, EventKind::MonitorSample, None).unwrap();

        let mut order = Vec::new();
        clock.run_until(5.0, |clock, event| {
            order.push(event.kind);
            if event.kind == EventKind::SpawnPatient {
                clock
                    .schedule_in(0.0, EventKind::PatientArrived, None)
                    .unwrap();
            }
        });

        assert_eq!(
            order,
            vec![
                EventKind::SpawnPatient,
                EventKind::MonitorSample,
                EventKind::PatientArrived
            ]
        );
    }
}
