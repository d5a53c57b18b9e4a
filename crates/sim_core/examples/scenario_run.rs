//! Run the default three-doctor scenario and print the summary.
//!
//! Run with: cargo run -p sim_core --example scenario_run
//! Set RUST_LOG=sim_core=debug to see per-run logging.

use sim_core::distributions::ServiceTimeKind;
use sim_core::scenario::ScenarioParams;
use sim_core::severity::Severity;
use sim_core::simulation::run_scenario;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    const NUM_DOCTORS: usize = 3;
    const SIMULATION_MINUTES: f64 = 28_800.0;

    let params = ScenarioParams::default()
        .with_run_id(1)
        .with_capacity(NUM_DOCTORS)
        .with_arrival_rate(0.4)
        .with_service_time(ServiceTimeKind::Exponential { rate: 0.2 })
        .with_horizon(SIMULATION_MINUTES);

    let output = match run_scenario(&params) {
        Ok(output) => output,
        Err(err) => {
            eprintln!("Simulation failed: {err}");
            std::process::exit(1);
        }
    };
    let summary = &output.summary;

    println!(
        "--- Scenario run ({} doctors, arrival rate {}, service {}, seed {}) ---",
        NUM_DOCTORS,
        params.arrival_rate,
        params.service_time.label(),
        summary.seed
    );
    println!("Events processed: {}", output.events_processed);
    println!("Patients arrived: {}", output.arrived);
    println!("Patients completed: {}", summary.patients_completed);

    let fmt = |value: Option<f64>| value.map_or_else(|| "n/a".to_string(), |v| format!("{v:.2}"));
    for severity in Severity::ALL {
        println!(
            "  {:<6} avg wait {:>8}  max wait {:>8}",
            severity,
            fmt(summary.avg_wait(severity)),
            fmt(summary.max_wait(severity))
        );
    }
    println!("Avg system time: {}", fmt(summary.avg_system_time));
    println!("Avg queue length: {}", fmt(summary.avg_queue_length));
    println!("Utilization: {} (offered load {:.2})", fmt(summary.resource_utilization), params.offered_load());
    println!("Throughput: {} patients/hour", fmt(summary.throughput));
}
