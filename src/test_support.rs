use crate::domain::scenario::{Scenario, ScenarioSet};
use crate::domain::step::StepDefinition;
use crate::services::step_sampler::StepSampler;

// A sampler that always returns the same draws
pub struct FixedSampler {
    pub variability: f64,
    pub utilization: f64,
}

impl StepSampler for FixedSampler {
    fn variability(&mut self) -> f64 {
        self.variability
    }

    fn utilization(&mut self) -> f64 {
        self.utilization
    }
}

// Replays the given utilizations in order, variability stays at 1.0
pub struct SequenceSampler {
    pub utilizations: Vec<f64>,
    pub next: usize,
}

impl SequenceSampler {
    pub fn new(utilizations: &[f64]) -> Self {
        Self {
            utilizations: utilizations.to_vec(),
            next: 0,
        }
    }
}

impl StepSampler for SequenceSampler {
    fn variability(&mut self) -> f64 {
        1.0
    }

    fn utilization(&mut self) -> f64 {
        let value = self.utilizations[self.next % self.utilizations.len()];
        self.next += 1;
        value
    }
}

pub fn build_step(id: &str, minutes: f64, resources: u32, rate: f64, complexity: f64) -> StepDefinition {
    let mut step = StepDefinition::new(id, &format!("Step {id}"));
    step.base_duration_minutes = minutes;
    step.resource_count = resources;
    step.hourly_rate = rate;
    step.complexity_factor = complexity;
    step
}

pub fn build_scenario(name: &str, steps: Vec<StepDefinition>) -> Scenario {
    Scenario {
        name: name.to_string(),
        steps,
    }
}

pub fn build_scenario_set(scenarios: Vec<Scenario>) -> ScenarioSet {
    ScenarioSet { scenarios }
}
