use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;

use super::{ParameterSet, ParameterSpace, SEED_MULTIPLIER};

/// Pick one value from `values`, or `base` when the dimension is not varied.
fn pick<T: Copy>(rng: &mut StdRng, values: &[T], base: T) -> T {
    if values.is_empty() {
        base
    } else {
        values[rng.gen_range(0..values.len())]
    }
}

impl ParameterSpace {
    /// Generate random parameter sets (Monte Carlo sampling).
    ///
    /// Samples `count` parameter sets randomly from the defined space.
    /// Duplicate combinations are skipped, so fewer than `count` sets come back
    /// when the space is smaller than requested.
    pub fn sample_random(&self, count: usize, seed: u64) -> Vec<ParameterSet> {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut parameter_sets: Vec<ParameterSet> = Vec::new();
        let mut attempts = 0;
        const MAX_ATTEMPTS: usize = 10000;

        while parameter_sets.len() < count && attempts < MAX_ATTEMPTS {
            attempts += 1;

            let params = self
                .base
                .clone()
                .with_capacity(pick(&mut rng, &self.capacities, self.base.capacity))
                .with_arrival_rate(pick(&mut rng, &self.arrival_rates, self.base.arrival_rate))
                .with_service_time(pick(&mut rng, &self.service_times, self.base.service_time))
                .with_horizon(pick(&mut rng, &self.horizons, self.base.horizon));

            if parameter_sets.iter().any(|existing| {
                existing.params.capacity == params.capacity
                    && existing.params.arrival_rate == params.arrival_rate
                    && existing.params.service_time == params.service_time
                    && existing.params.horizon == params.horizon
            }) {
                continue;
            }

            let index = parameter_sets.len();
            let seed_value = seed
                .wrapping_add(index as u64)
                .wrapping_mul(SEED_MULTIPLIER);
            parameter_sets.push(ParameterSet::new(
                params.with_run_id(index as u64 + 1),
                format!("random_{index}"),
                0,
                seed_value,
            ));
        }

        parameter_sets
    }
}
