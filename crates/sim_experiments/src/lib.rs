//! Parallel experimentation framework for hospital queue simulation sweeps.
//!
//! This crate runs many independent simulations in parallel with varying
//! parameters, flattens each run into a comparison row, and exports the rows
//! together with per-run reports.
//!
//! # Quick Start
//!
//! ```no_run
//! use sim_experiments::{export_to_csv, run_parallel_experiments, ParameterSpace};
//!
//! // Define parameter space (grid search)
//! let space = ParameterSpace::grid()
//!     .capacity(vec![2, 3, 4, 5])
//!     .arrival_rate(vec![0.2, 0.4, 0.6])
//!     .replications(3);
//!
//! // Generate parameter sets
//! let parameter_sets = space.generate();
//!
//! // Run experiments in parallel
//! let results = run_parallel_experiments(parameter_sets.clone(), None).unwrap();
//!
//! export_to_csv(&results, &parameter_sets, "summary_all_runs.csv").unwrap();
//! ```
//!
//! # Architecture
//!
//! - [`parameters`]: Parameter variation framework (grid search, random sampling)
//! - [`parameter_spaces`]: Ready-made experiments
//! - [`runner`]: Parallel simulation execution using rayon
//! - [`metrics`]: Metrics extraction from finished runs
//! - [`export`]: Result export to CSV/JSON/Parquet and per-run reports

pub mod error;
pub mod export;
pub mod metrics;
pub mod parameter_spaces;
pub mod parameters;
pub mod runner;

pub use error::ExperimentError;
pub use export::{
    export_to_csv, export_to_json, export_to_parquet, import_from_json, write_run_artifacts,
    write_run_report,
};
pub use metrics::SimulationResult;
pub use parameters::{ParameterSet, ParameterSpace};
pub use runner::{run_parallel_experiments, run_single_simulation};
