//! Pre-defined parameter space configurations for experimentation.
//!
//! This module provides ready-to-use experiment definitions that can be
//! easily selected from the sweep example or the `xtask` runner.

use sim_core::distributions::ServiceTimeKind;
use sim_core::scenario::ScenarioParams;

use crate::parameters::{ParameterSet, ParameterSpace};

/// Service rate of one doctor in the hospital comparison (mean 5 time units).
const COMPARISON_SERVICE_RATE: f64 = 0.2;

/// (doctors, arrival rate) of the five comparison scenarios, in run order.
const COMPARISON_SCENARIOS: [(usize, f64); 5] =
    [(3, 0.4), (3, 0.6), (3, 0.2), (5, 0.6), (5, 0.2)];

/// Names accepted by [by_name].
pub const PRESET_NAMES: [&str; 4] = ["hospital_comparison", "single_ward", "capacity_sweep", "minimal"];

/// Five-scenario hospital comparison over an eight-hour shift (28 800 time units).
///
/// Run ids are 1..=5 and each run is seeded with its run id.
pub fn hospital_comparison() -> Vec<ParameterSet> {
    COMPARISON_SCENARIOS
        .iter()
        .enumerate()
        .map(|(index, &(capacity, arrival_rate))| {
            let run_id = index as u64 + 1;
            let params = ScenarioParams::default()
                .with_run_id(run_id)
                .with_capacity(capacity)
                .with_arrival_rate(arrival_rate)
                .with_service_time(ServiceTimeKind::Exponential {
                    rate: COMPARISON_SERVICE_RATE,
                })
                .with_horizon(28_800.0);
            ParameterSet::new(params, format!("scenario_{run_id}"), 0, run_id)
        })
        .collect()
}

/// Base parameters of the single-ward scenario: three doctors, a patient every
/// 5 time units on average, treatment uniform in [10, 30], sampled every unit.
pub fn single_ward_params() -> ScenarioParams {
    ScenarioParams::default()
        .with_run_id(1)
        .with_capacity(3)
        .with_arrival_rate(0.2)
        .with_service_time(ServiceTimeKind::Uniform {
            min: 10.0,
            max: 30.0,
        })
        .with_horizon(1_000.0)
        .with_sampling_interval(1.0)
}

/// Single-ward scenario as a one-point space.
pub fn single_ward() -> ParameterSpace {
    ParameterSpace::grid().with_base(single_ward_params())
}

/// Doctor counts 1..=8 at the default arrival rate, five replications each.
pub fn capacity_sweep() -> ParameterSpace {
    ParameterSpace::grid()
        .capacity((1..=8).collect())
        .replications(5)
}

/// Quick testing: two capacities over a short horizon.
pub fn minimal() -> ParameterSpace {
    ParameterSpace::grid()
        .with_base(ScenarioParams::default().with_horizon(2_000.0))
        .capacity(vec![2, 3])
}

/// Parameter sets of a preset by name, or `None` for an unknown name.
pub fn by_name(name: &str) -> Option<Vec<ParameterSet>> {
    match name {
        "hospital_comparison" => Some(hospital_comparison()),
        "single_ward" => Some(single_ward().generate()),
        "capacity_sweep" => Some(capacity_sweep().generate()),
        "minimal" => Some(minimal().generate()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hospital_comparison_scenarios() {
        let sets = hospital_comparison();
        assert_eq!(sets.len(), 5);

        let shape: Vec<(u64, usize, f64, u64)> = sets
            .iter()
            .map(|set| (set.run_id(), set.params.capacity, set.params.arrival_rate, set.seed))
            .collect();
        assert_eq!(
            shape,
            vec![(1, 3, 0.4, 1), (2, 3, 0.6, 2), (3, 3, 0.2, 3), (4, 5, 0.6, 4), (5, 5, 0.2, 5)]
        );
        assert!(sets.iter().all(|set| set.params.horizon == 28_800.0));
        assert!(sets.iter().all(|set| set.params.validate().is_ok()));
    }

    #[test]
    fn single_ward_is_one_run() {
        let sets = single_ward().generate();
        assert_eq!(sets.len(), 1);
        assert_eq!(sets[0].params.sampling_interval, 1.0);
        assert_eq!(sets[0].params.service_time.mean(), 20.0);
    }

    #[test]
    fn capacity_sweep_size() {
        assert_eq!(capacity_sweep().len(), 40);
    }

    #[test]
    fn presets_by_name() {
        for name in PRESET_NAMES {
            assert!(by_name(name).is_some_and(|sets| !sets.is_empty()), "{name}");
        }
        assert!(by_name("nope").is_none());
    }
}
