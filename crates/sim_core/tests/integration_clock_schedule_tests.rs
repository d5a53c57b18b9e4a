use sim_core::clock::{EventKind, SimulationClock};
use sim_core::error::SimError;

#[test]
fn clock_pops_events_in_time_order() {
    let mut clock = SimulationClock::default();
    clock.schedule_at(20.0, EventKind::SpawnPatient, None).unwrap();
    clock.schedule_at(5.0, EventKind::SpawnPatient, None).unwrap();
    clock.schedule_at(20.0, EventKind::MonitorSample, None).unwrap();
    clock.schedule_at(10.0, EventKind::SpawnPatient, None).unwrap();

    let first = clock.pop_next().expect("first event");
    assert_eq!(first.timestamp, 5.0);
    assert_eq!(clock.now(), 5.0);

    let second = clock.pop_next().expect("second event");
    assert_eq!(second.timestamp, 10.0);
    assert_eq!(clock.now(), 10.0);

    // Same instant: scheduling order decides.
    let third = clock.pop_next().expect("third event");
    assert_eq!(third.timestamp, 20.0);
    assert_eq!(third.kind, EventKind::SpawnPatient);
    let fourth = clock.pop_next().expect("fourth event");
    assert_eq!(fourth.timestamp, 20.0);
    assert_eq!(fourth.kind, EventKind::MonitorSample);

    assert!(clock.pop_next().is_none());
    assert!(clock.is_empty());
}

#[test]
fn schedule_in_is_relative_to_now() {
    let mut clock = SimulationClock::default();
    clock.schedule_at(3.0, EventKind::SpawnPatient, None).unwrap();
    clock.pop_next().expect("event");

    clock.schedule_in(2.5, EventKind::MonitorSample, None).unwrap();
    let next = clock.pop_next().expect("event");
    assert_eq!(next.timestamp, 5.5);
    assert_eq!(clock.now(), 5.5);
}

#[test]
fn past_and_negative_schedules_are_rejected() {
    let mut clock = SimulationClock::default();
    clock.schedule_at(4.0, EventKind::SpawnPatient, None).unwrap();
    clock.pop_next().expect("event");

    assert_eq!(
        clock.schedule_in(-0.5, EventKind::SpawnPatient, None),
        Err(SimError::InvalidDelay {
            delay: -0.5,
            now: 4.0
        })
    );
    assert!(clock.schedule_at(3.0, EventKind::SpawnPatient, None).is_err());
    assert!(clock.is_empty());
}

#[test]
fn run_until_resumes_chained_events_and_lands_on_horizon() {
    let mut clock = SimulationClock::default();
    clock.schedule_at(0.0, EventKind::MonitorSample, None).unwrap();

    let mut visited = Vec::new();
    let resumed = clock.run_until(12.0, |clock, event| {
        visited.push(event.timestamp);
        clock
            .schedule_in(5.0, EventKind::MonitorSample, None)
            .expect("positive delay");
    });

    assert_eq!(resumed, 3);
    assert_eq!(visited, vec![0.0, 5.0, 10.0]);
    assert_eq!(clock.now(), 12.0);
    assert_eq!(clock.next_event_time(), Some(15.0));
}

#[test]
fn empty_queue_still_advances_to_horizon() {
    let mut clock = SimulationClock::default();
    assert_eq!(clock.run_until(7.0, |_, _| {}), 0);
    assert_eq!(clock.now(), 7.0);
}
