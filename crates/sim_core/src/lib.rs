pub mod arrivals;
pub mod clock;
pub mod distributions;
pub mod ecs;
pub mod error;
pub mod resource;
pub mod runner;
pub mod scenario;
pub mod severity;
pub mod simulation;
pub mod summary;
pub mod systems;
pub mod telemetry;
pub mod telemetry_export;
#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers;
