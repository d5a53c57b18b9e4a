use sim_core::clock::SimTime;
use sim_core::distributions::ServiceTimeKind;
use sim_core::scenario::ScenarioParams;

use super::ParameterSpace;

/// Represents a single parameter combination.
#[derive(Debug, Clone, PartialEq)]
pub(super) struct ParameterCombination {
    pub capacity: usize,
    pub arrival_rate: f64,
    pub service_time: ServiceTimeKind,
    pub horizon: SimTime,
}

impl ParameterCombination {
    pub fn apply(&self, base: &ScenarioParams) -> ScenarioParams {
        base.clone()
            .with_capacity(self.capacity)
            .with_arrival_rate(self.arrival_rate)
            .with_service_time(self.service_time)
            .with_horizon(self.horizon)
    }
}

/// Holds all parameter variations to explore.
pub(super) struct ParameterVariations {
    pub capacities: Vec<usize>,
    pub arrival_rates: Vec<f64>,
    pub service_times: Vec<ServiceTimeKind>,
    pub horizons: Vec<SimTime>,
}

fn or_base<T: Clone>(values: &[T], base: T) -> Vec<T> {
    if values.is_empty() {
        vec![base]
    } else {
        values.to_vec()
    }
}

impl ParameterVariations {
    pub fn from_space(space: &ParameterSpace) -> Self {
        Self {
            capacities: or_base(&space.capacities, space.base.capacity),
            arrival_rates: or_base(&space.arrival_rates, space.base.arrival_rate),
            service_times: or_base(&space.service_times, space.base.service_time),
            horizons: or_base(&space.horizons, space.base.horizon),
        }
    }

    pub fn combination_count(&self) -> usize {
        self.capacities.len()
            * self.arrival_rates.len()
            * self.service_times.len()
            * self.horizons.len()
    }

    /// Generate all combinations using Cartesian product, capacity varying slowest.
    pub fn generate_combinations(&self) -> impl Iterator<Item = ParameterCombination> + '_ {
        self.capacities.iter().flat_map(move |&capacity| {
            self.arrival_rates.iter().flat_map(move |&arrival_rate| {
                self.service_times.iter().flat_map(move |&service_time| {
                    self.horizons.iter().map(move |&horizon| ParameterCombination {
                        capacity,
                        arrival_rate,
                        service_time,
                        horizon,
                    })
                })
            })
        })
    }
}
