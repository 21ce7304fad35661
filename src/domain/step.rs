use std::fmt;
use std::str::FromStr;

use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
#[error("invalid skill level: {0} (expected beginner, intermediate, expert or specialist)")]
pub struct ParseSkillLevelError(pub String);

/// Skill level of the people performing a step. Carried along for display,
/// it does not influence the simulated duration or cost.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SkillLevel {
    Beginner,
    #[default]
    Intermediate,
    Expert,
    Specialist,
}

impl SkillLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            SkillLevel::Beginner => "beginner",
            SkillLevel::Intermediate => "intermediate",
            SkillLevel::Expert => "expert",
            SkillLevel::Specialist => "specialist",
        }
    }
}

impl fmt::Display for SkillLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SkillLevel {
    type Err = ParseSkillLevelError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "beginner" => Ok(SkillLevel::Beginner),
            "intermediate" => Ok(SkillLevel::Intermediate),
            "expert" => Ok(SkillLevel::Expert),
            "specialist" => Ok(SkillLevel::Specialist),
            _ => Err(ParseSkillLevelError(value.to_string())),
        }
    }
}

/// Simulation inputs of one BPMN task within one scenario.
#[derive(Debug, Clone, PartialEq)]
pub struct StepDefinition {
    /// Id of the diagram element this step belongs to.
    pub id: String,
    pub name: String,
    pub base_duration_minutes: f64,
    pub resource_count: u32,
    pub hourly_rate: f64,
    pub complexity_factor: f64,
    pub skill_level: SkillLevel,
    pub equipment: Option<String>,
}

impl StepDefinition {
    pub fn new(id: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            base_duration_minutes: 60.0,
            resource_count: 1,
            hourly_rate: 0.0,
            complexity_factor: 1.0,
            skill_level: SkillLevel::default(),
            equipment: None,
        }
    }
}
