use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Uniform};

use crate::services::simulation_settings::{SampleRange, SimulationSettings};

/// Source of the two random draws made for every simulated step.
pub trait StepSampler {
    fn variability(&mut self) -> f64;
    fn utilization(&mut self) -> f64;
}

pub struct UniformStepSampler<R: Rng> {
    rng: R,
    variability: Uniform<f64>,
    utilization: Uniform<f64>,
}

impl<R: Rng> UniformStepSampler<R> {
    /// `settings` must have passed [`SimulationSettings::validate`].
    pub fn new(rng: R, settings: &SimulationSettings) -> Self {
        Self {
            rng,
            variability: uniform(settings.variability_range),
            utilization: uniform(settings.utilization_range),
        }
    }
}

/// Seeded sampler when `seed` is given, otherwise seeded from system entropy.
pub fn sampler_from_seed(
    seed: Option<u64>,
    settings: &SimulationSettings,
) -> UniformStepSampler<StdRng> {
    let rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    UniformStepSampler::new(rng, settings)
}

fn uniform(range: SampleRange) -> Uniform<f64> {
    Uniform::new_inclusive(range.min, range.max)
}

impl<R: Rng> StepSampler for UniformStepSampler<R> {
    fn variability(&mut self) -> f64 {
        self.variability.sample(&mut self.rng)
    }

    fn utilization(&mut self) -> f64 {
        self.utilization.sample(&mut self.rng)
    }
}
