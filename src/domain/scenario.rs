use crate::domain::step::StepDefinition;

pub const CURRENT_SCENARIO: &str = "current";
pub const OPTIMIZED_SCENARIO: &str = "optimized";
pub const FUTURE_SCENARIO: &str = "future";

/// A named configuration of all steps of a process. Steps keep the order in
/// which they were first added; step ids are unique.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Scenario {
    pub name: String,
    pub steps: Vec<StepDefinition>,
}

impl Scenario {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            steps: Vec::new(),
        }
    }

    pub fn step(&self, id: &str) -> Option<&StepDefinition> {
        self.steps.iter().find(|step| step.id == id)
    }

    /// Replaces the step with the same id in place, or appends it.
    pub fn upsert_step(&mut self, step: StepDefinition) {
        match self.steps.iter_mut().find(|existing| existing.id == step.id) {
            Some(existing) => *existing = step,
            None => self.steps.push(step),
        }
    }
}

/// Ordered collection of scenarios with unique names.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ScenarioSet {
    pub scenarios: Vec<Scenario>,
}

impl ScenarioSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.scenarios.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&Scenario> {
        self.scenarios.iter().find(|scenario| scenario.name == name)
    }

    pub fn names(&self) -> Vec<&str> {
        self.scenarios.iter().map(|s| s.name.as_str()).collect()
    }

    pub fn scenario_mut(&mut self, name: &str) -> &mut Scenario {
        let position = match self.scenarios.iter().position(|s| s.name == name) {
            Some(position) => position,
            None => {
                self.scenarios.push(Scenario::new(name));
                self.scenarios.len() - 1
            }
        };
        &mut self.scenarios[position]
    }
}
