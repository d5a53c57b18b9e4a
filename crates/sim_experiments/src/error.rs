use sim_core::error::SimError;
use thiserror::Error;

/// Failure of a batch of runs.
#[derive(Debug, Error)]
pub enum ExperimentError {
    #[error("run {run_id} ({experiment_id}) failed: {source}")]
    Run {
        run_id: u64,
        experiment_id: String,
        #[source]
        source: SimError,
    },

    #[error("failed to build thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}
