//! Parameter variation framework for exploring simulation parameter space.
//!
//! This module provides tools for defining parameter spaces and generating
//! parameter sets for parallel experimentation. Supports grid search and
//! random sampling strategies.

use sim_core::clock::SimTime;
use sim_core::distributions::ServiceTimeKind;
use sim_core::scenario::ScenarioParams;

mod combinations;
mod sampling;

use combinations::ParameterVariations;

/// Multiplier used to spread seeds of neighbouring runs.
pub(crate) const SEED_MULTIPLIER: u64 = 0x9e37_79b9;

/// A single parameter configuration for a simulation run.
///
/// Wraps `ScenarioParams` with additional experiment metadata for tracking
/// and reproducibility.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterSet {
    /// Base scenario parameters. `params.run_id` numbers the run across the whole sweep.
    pub params: ScenarioParams,
    /// Experiment ID shared by all replications of one parameter combination.
    pub experiment_id: String,
    /// Replication index within the experiment.
    pub replication: usize,
    /// Seed used for this run (ensures reproducibility).
    pub seed: u64,
}

impl ParameterSet {
    pub fn new(params: ScenarioParams, experiment_id: String, replication: usize, seed: u64) -> Self {
        Self {
            params,
            experiment_id,
            replication,
            seed,
        }
    }

    /// Get the scenario params with seed applied.
    pub fn scenario_params(&self) -> ScenarioParams {
        let mut params = self.params.clone();
        params.seed = Some(self.seed);
        params
    }

    pub fn run_id(&self) -> u64 {
        self.params.run_id
    }
}

/// Defines a parameter space for exploration.
///
/// Supports grid search (Cartesian product) and random sampling strategies.
/// Dimensions left empty take their value from the base parameters.
#[derive(Debug, Clone)]
pub struct ParameterSpace {
    /// Base parameters (used as defaults for unspecified parameters).
    base: ScenarioParams,
    /// Doctor counts to explore.
    capacities: Vec<usize>,
    /// Arrival rates to explore.
    arrival_rates: Vec<f64>,
    /// Service-time distributions to explore.
    service_times: Vec<ServiceTimeKind>,
    /// Horizons to explore.
    horizons: Vec<SimTime>,
    /// Runs per combination, each with its own seed.
    replications: usize,
}

impl ParameterSpace {
    /// Create a new parameter space with default base parameters.
    pub fn new() -> Self {
        Self {
            base: ScenarioParams::default(),
            capacities: vec![],
            arrival_rates: vec![],
            service_times: vec![],
            horizons: vec![],
            replications: 1,
        }
    }

    /// Create a new parameter space for grid search.
    pub fn grid() -> Self {
        Self::new()
    }

    /// Set doctor counts to explore.
    pub fn capacity(mut self, capacities: Vec<usize>) -> Self {
        self.capacities = capacities;
        self
    }

    /// Set arrival rates to explore.
    pub fn arrival_rate(mut self, rates: Vec<f64>) -> Self {
        self.arrival_rates = rates;
        self
    }

    /// Set service-time distributions to explore.
    pub fn service_time(mut self, kinds: Vec<ServiceTimeKind>) -> Self {
        self.service_times = kinds;
        self
    }

    /// Set horizons to explore.
    pub fn horizon(mut self, horizons: Vec<SimTime>) -> Self {
        self.horizons = horizons;
        self
    }

    /// Set the number of replications per combination (at least one).
    pub fn replications(mut self, replications: usize) -> Self {
        self.replications = replications.max(1);
        self
    }

    /// Set base parameters (used as defaults).
    pub fn with_base(mut self, base: ScenarioParams) -> Self {
        self.base = base;
        self
    }

    pub fn base(&self) -> &ScenarioParams {
        &self.base
    }

    /// Number of parameter sets [ParameterSpace::generate] will produce.
    pub fn len(&self) -> usize {
        ParameterVariations::from_space(self).combination_count() * self.replications
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Generate all parameter sets using grid search (Cartesian product).
    ///
    /// Each combination of specified parameters will be generated, once per
    /// replication. Run ids are assigned sequentially from 1.
    pub fn generate(&self) -> Vec<ParameterSet> {
        let variations = ParameterVariations::from_space(self);
        let replications = self.replications;

        variations
            .generate_combinations()
            .enumerate()
            .flat_map(|(experiment_id, combo)| {
                (0..replications).map(move |replication| (experiment_id, combo.clone(), replication))
            })
            .enumerate()
            .map(|(index, (experiment_id, combo, replication))| {
                let mut params = combo.apply(&self.base);
                params.run_id = index as u64 + 1;
                let seed = (index as u64).wrapping_mul(SEED_MULTIPLIER);
                ParameterSet::new(params, format!("exp_{experiment_id}"), replication, seed)
            })
            .collect()
    }
}

impl Default for ParameterSpace {
    fn default() -> Self {
        Self::new()
    }
}
