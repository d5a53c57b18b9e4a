//! Scenario setup: validate parameters and insert one run's resources into a world.
//!
//! Every run gets its own clock, doctor pool, RNG and telemetry; nothing is shared
//! between worlds, so independent runs can execute on separate threads.

mod build;
mod params;

pub use build::build_scenario;
pub use params::{
    ScenarioParams, SimulationHorizon, DEFAULT_ARRIVAL_RATE, DEFAULT_CAPACITY, DEFAULT_HORIZON,
    DEFAULT_REPORTING_PERIOD, DEFAULT_SAMPLING_INTERVAL,
};
