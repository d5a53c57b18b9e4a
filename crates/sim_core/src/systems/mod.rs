pub mod fault;
pub mod monitor;
pub mod patient_arrived;
pub mod service_completed;
pub mod service_started;
pub mod spawner;
