//! Load tests for sim_core: validate performance under realistic load conditions.

use sim_core::distributions::ServiceTimeKind;
use sim_core::scenario::ScenarioParams;
use sim_core::simulation::run_scenario;
use std::time::Instant;

#[test]
#[ignore] // Only run explicitly: cargo test --package sim_core --test load_tests -- --ignored
fn test_sustained_load() {
    // A week of minutes at a busy emergency department.
    let params = ScenarioParams::default()
        .with_run_id(1)
        .with_capacity(10)
        .with_arrival_rate(1.6)
        .with_service_time(ServiceTimeKind::Exponential { rate: 0.2 })
        .with_horizon(7.0 * 24.0 * 60.0);

    let start = Instant::now();
    let output = run_scenario(&params).expect("run");
    let duration = start.elapsed();

    let events_per_sec = output.events_processed as f64 / duration.as_secs_f64();
    println!(
        "Sustained load test: {} events, {} patients in {:.2}s ({:.0} events/sec)",
        output.events_processed,
        output.patients.len(),
        duration.as_secs_f64(),
        events_per_sec
    );

    assert!(
        events_per_sec > 10_000.0,
        "Should process >10000 events/sec, got {:.0}",
        events_per_sec
    );
}

#[test]
#[ignore]
fn test_overloaded_queue() {
    // Arrivals outpace service, so the waiting queue keeps growing.
    let params = ScenarioParams::default()
        .with_run_id(2)
        .with_capacity(2)
        .with_arrival_rate(1.0)
        .with_service_time(ServiceTimeKind::Exponential { rate: 0.2 })
        .with_horizon(28_800.0);

    let start = Instant::now();
    let output = run_scenario(&params).expect("run");
    let duration = start.elapsed();

    let final_queue = output
        .snapshots
        .last()
        .map(|s| s.queue_length)
        .unwrap_or(0);
    println!(
        "Overloaded queue test: {} arrivals, final queue {} in {:.2}s",
        output.arrived,
        final_queue,
        duration.as_secs_f64()
    );

    assert!(final_queue > 10_000, "queue should keep growing, got {final_queue}");
    assert!(
        duration.as_secs_f64() < 30.0,
        "Should complete in <30s, got {:.2}s",
        duration.as_secs_f64()
    );
}
