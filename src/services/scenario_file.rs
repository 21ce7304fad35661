use std::fmt;
use std::io::{self, Write};
use std::marker::PhantomData;
use std::path::Path;

use serde::de::{self, Deserializer, MapAccess, Visitor};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::scenario::{Scenario, ScenarioSet};
use crate::domain::step::{ParseSkillLevelError, SkillLevel, StepDefinition};

#[derive(Error, Debug)]
pub enum ScenarioFileError {
    #[error("failed to read scenario file: {0}")]
    Read(#[from] io::Error),
    #[error("failed to parse scenario json: {0}")]
    ParseJson(#[from] serde_json::Error),
    #[error("failed to parse scenario yaml: {0}")]
    ParseYaml(#[from] serde_yaml::Error),
    #[error("empty step id in scenario {0}")]
    EmptyStepId(String),
    #[error("empty scenario name")]
    EmptyScenarioName,
    #[error("step {step}: {source}")]
    InvalidSkillLevel {
        step: String,
        #[source]
        source: ParseSkillLevelError,
    },
}

/// Map that keeps document order and rejects duplicate keys.
struct OrderedMap<V>(Vec<(String, V)>);

impl<'de, V: Deserialize<'de>> Deserialize<'de> for OrderedMap<V> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(OrderedMapVisitor(PhantomData))
    }
}

struct OrderedMapVisitor<V>(PhantomData<V>);

impl<'de, V: Deserialize<'de>> Visitor<'de> for OrderedMapVisitor<V> {
    type Value = OrderedMap<V>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a map with unique keys")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut entries: Vec<(String, V)> = Vec::with_capacity(access.size_hint().unwrap_or(0));
        while let Some((key, value)) = access.next_entry::<String, V>()? {
            if entries.iter().any(|(existing, _)| *existing == key) {
                return Err(de::Error::custom(format!("duplicate key: {key}")));
            }
            entries.push((key, value));
        }
        Ok(OrderedMap(entries))
    }
}

impl<V: Serialize> Serialize for OrderedMap<V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, value) in &self.0 {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

#[derive(Serialize, Deserialize)]
struct ScenarioRecord {
    #[serde(default = "empty_steps")]
    steps: OrderedMap<StepRecord>,
}

fn empty_steps() -> OrderedMap<StepRecord> {
    OrderedMap(Vec::new())
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StepRecord {
    #[serde(default)]
    name: Option<String>,
    duration: f64,
    #[serde(default = "default_resources")]
    resources: u32,
    #[serde(default)]
    hourly_rate: f64,
    #[serde(default = "default_complexity")]
    complexity: f64,
    #[serde(default)]
    skill_level: Option<String>,
    #[serde(default)]
    equipment: Option<String>,
}

fn default_resources() -> u32 {
    1
}

fn default_complexity() -> f64 {
    1.0
}

pub fn load_scenario_set_from_file(path: &str) -> Result<ScenarioSet, ScenarioFileError> {
    let contents = std::fs::read_to_string(path)?;
    if is_yaml_path(path) {
        deserialize_scenario_set_from_yaml_str(&contents)
    } else {
        deserialize_scenario_set_from_json_str(&contents)
    }
}

pub fn deserialize_scenario_set_from_json_str(input: &str) -> Result<ScenarioSet, ScenarioFileError> {
    let record: OrderedMap<ScenarioRecord> = serde_json::from_str(input)?;
    scenario_set_from_record(record)
}

pub fn deserialize_scenario_set_from_yaml_str(input: &str) -> Result<ScenarioSet, ScenarioFileError> {
    let record: OrderedMap<ScenarioRecord> = serde_yaml::from_str(input)?;
    scenario_set_from_record(record)
}

/// JSON text of the scenario set in the input format, as stored with a run.
pub fn scenario_set_to_json_string(scenarios: &ScenarioSet) -> Result<String, serde_json::Error> {
    serde_json::to_string(&scenario_set_to_record(scenarios))
}

pub fn serialize_scenario_set_to_json<W: Write>(
    writer: &mut W,
    scenarios: &ScenarioSet,
) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *writer, &scenario_set_to_record(scenarios))
        .map_err(io::Error::other)?;
    writer.write_all(b"\n")
}

pub fn serialize_scenario_set_to_yaml<W: Write>(
    writer: &mut W,
    scenarios: &ScenarioSet,
) -> io::Result<()> {
    let yaml = serde_yaml::to_string(&scenario_set_to_record(scenarios))
        .map_err(io::Error::other)?;
    writer.write_all(yaml.as_bytes())
}

/// Writes YAML for `.yaml`/`.yml` paths and JSON otherwise.
pub fn write_scenario_set_file(path: &str, scenarios: &ScenarioSet) -> io::Result<()> {
    let mut buffer = Vec::new();
    if is_yaml_path(path) {
        serialize_scenario_set_to_yaml(&mut buffer, scenarios)?;
    } else {
        serialize_scenario_set_to_json(&mut buffer, scenarios)?;
    }
    std::fs::write(path, buffer)
}

pub(crate) fn step_to_json_string(step: &StepDefinition) -> Result<String, serde_json::Error> {
    serde_json::to_string(&step_to_record(step))
}

pub(crate) fn step_from_json_str(id: &str, input: &str) -> Result<StepDefinition, ScenarioFileError> {
    let record: StepRecord = serde_json::from_str(input)?;
    step_from_record(id.to_string(), record)
}

fn is_yaml_path(path: &str) -> bool {
    matches!(
        Path::new(path).extension().and_then(|ext| ext.to_str()),
        Some("yaml") | Some("yml")
    )
}

fn scenario_set_from_record(
    record: OrderedMap<ScenarioRecord>,
) -> Result<ScenarioSet, ScenarioFileError> {
    let mut scenarios = Vec::with_capacity(record.0.len());
    for (name, scenario_record) in record.0 {
        if name.trim().is_empty() {
            return Err(ScenarioFileError::EmptyScenarioName);
        }
        let mut steps = Vec::with_capacity(scenario_record.steps.0.len());
        for (id, step_record) in scenario_record.steps.0 {
            if id.trim().is_empty() {
                return Err(ScenarioFileError::EmptyStepId(name));
            }
            steps.push(step_from_record(id, step_record)?);
        }
        scenarios.push(Scenario { name, steps });
    }
    Ok(ScenarioSet { scenarios })
}

fn step_from_record(id: String, record: StepRecord) -> Result<StepDefinition, ScenarioFileError> {
    let skill_level = match record.skill_level.as_deref() {
        None | Some("") => SkillLevel::default(),
        Some(value) => value
            .parse()
            .map_err(|source| ScenarioFileError::InvalidSkillLevel {
                step: id.clone(),
                source,
            })?,
    };
    Ok(StepDefinition {
        name: record.name.unwrap_or_else(|| id.clone()),
        id,
        base_duration_minutes: record.duration,
        resource_count: record.resources,
        hourly_rate: record.hourly_rate,
        complexity_factor: record.complexity,
        skill_level,
        equipment: record.equipment.filter(|value| !value.is_empty()),
    })
}

fn scenario_set_to_record(scenarios: &ScenarioSet) -> OrderedMap<ScenarioRecord> {
    OrderedMap(
        scenarios
            .scenarios
            .iter()
            .map(|scenario| {
                let steps = scenario
                    .steps
                    .iter()
                    .map(|step| (step.id.clone(), step_to_record(step)))
                    .collect();
                (
                    scenario.name.clone(),
                    ScenarioRecord {
                        steps: OrderedMap(steps),
                    },
                )
            })
            .collect(),
    )
}

fn step_to_record(step: &StepDefinition) -> StepRecord {
    StepRecord {
        name: Some(step.name.clone()),
        duration: step.base_duration_minutes,
        resources: step.resource_count,
        hourly_rate: step.hourly_rate,
        complexity: step.complexity_factor,
        skill_level: Some(step.skill_level.to_string()),
        equipment: step.equipment.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCENARIOS_JSON: &str = r#"{
        "optimized": {
            "steps": {
                "Task_2": { "name": "Review", "duration": 45, "resources": 2, "hourlyRate": 60, "complexity": 0.8, "skillLevel": "expert", "equipment": "Laptop" },
                "Task_1": { "name": "Intake", "duration": 20, "resources": 1, "hourlyRate": 35, "complexity": 1.0, "skillLevel": "beginner", "equipment": "" }
            }
        },
        "current": {
            "steps": {
                "Task_2": { "name": "Review", "duration": 60, "resources": 2, "hourlyRate": 60, "complexity": 1.0, "skillLevel": "Intermediate" }
            }
        }
    }"#;

    #[test]
    fn json_input_keeps_document_order() {
        let set = deserialize_scenario_set_from_json_str(SCENARIOS_JSON).unwrap();

        assert_eq!(set.names(), vec!["optimized", "current"]);
        let optimized = set.get("optimized").unwrap();
        let ids: Vec<&str> = optimized.steps.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["Task_2", "Task_1"]);

        let review = optimized.step("Task_2").unwrap();
        assert_eq!(review.name, "Review");
        assert_eq!(review.base_duration_minutes, 45.0);
        assert_eq!(review.resource_count, 2);
        assert_eq!(review.hourly_rate, 60.0);
        assert_eq!(review.complexity_factor, 0.8);
        assert_eq!(review.skill_level, SkillLevel::Expert);
        assert_eq!(review.equipment.as_deref(), Some("Laptop"));

        let intake = optimized.step("Task_1").unwrap();
        assert_eq!(intake.equipment, None);
        assert_eq!(
            set.get("current").unwrap().steps[0].skill_level,
            SkillLevel::Intermediate
        );
    }

    #[test]
    fn missing_optional_fields_use_defaults() {
        let set = deserialize_scenario_set_from_json_str(
            r#"{ "current": { "steps": { "Task_9": { "duration": 10 } } } }"#,
        )
        .unwrap();
        let step = &set.scenarios[0].steps[0];
        assert_eq!(step.name, "Task_9");
        assert_eq!(step.resource_count, 1);
        assert_eq!(step.hourly_rate, 0.0);
        assert_eq!(step.complexity_factor, 1.0);
        assert_eq!(step.skill_level, SkillLevel::Intermediate);
    }

    #[test]
    fn scenario_without_steps_is_empty() {
        let set = deserialize_scenario_set_from_json_str(r#"{ "future": {} }"#).unwrap();
        assert_eq!(set.names(), vec!["future"]);
        assert!(set.scenarios[0].steps.is_empty());
    }

    #[test]
    fn duplicate_step_ids_are_rejected() {
        let err = deserialize_scenario_set_from_json_str(
            r#"{ "current": { "steps": { "A": { "duration": 1 }, "A": { "duration": 2 } } } }"#,
        )
        .unwrap_err();
        assert!(matches!(err, ScenarioFileError::ParseJson(_)));
        assert!(err.to_string().contains("duplicate key: A"));
    }

    #[test]
    fn unknown_skill_level_is_rejected() {
        let err = deserialize_scenario_set_from_json_str(
            r#"{ "current": { "steps": { "A": { "duration": 1, "skillLevel": "wizard" } } } }"#,
        )
        .unwrap_err();
        assert!(matches!(err, ScenarioFileError::InvalidSkillLevel { ref step, .. } if step == "A"));
    }

    #[test]
    fn negative_resource_count_fails_to_parse() {
        let err = deserialize_scenario_set_from_json_str(
            r#"{ "current": { "steps": { "A": { "duration": 1, "resources": -2 } } } }"#,
        )
        .unwrap_err();
        assert!(matches!(err, ScenarioFileError::ParseJson(_)));
    }

    #[test]
    fn yaml_input_is_supported() {
        let yaml = "current:\n  steps:\n    Task_1:\n      name: Intake\n      duration: 30\n      hourlyRate: 40\n    Task_0:\n      duration: 5\n";
        let set = deserialize_scenario_set_from_yaml_str(yaml).unwrap();
        let ids: Vec<&str> = set.scenarios[0].steps.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["Task_1", "Task_0"]);
        assert_eq!(set.scenarios[0].steps[0].hourly_rate, 40.0);
    }

    #[test]
    fn json_text_reads_back_into_the_same_set() {
        let set = deserialize_scenario_set_from_json_str(SCENARIOS_JSON).unwrap();
        let json = scenario_set_to_json_string(&set).unwrap();
        assert!(json.contains("\"hourlyRate\":60.0"));
        assert!(json.contains("\"skillLevel\":\"expert\""));
        assert_eq!(deserialize_scenario_set_from_json_str(&json).unwrap(), set);
    }

    #[test]
    fn yaml_export_lists_scenarios_in_order() {
        let set = deserialize_scenario_set_from_json_str(SCENARIOS_JSON).unwrap();
        let mut buffer = Vec::new();
        serialize_scenario_set_to_yaml(&mut buffer, &set).unwrap();
        let output = String::from_utf8(buffer).unwrap();

        let optimized = output.find("optimized:").unwrap();
        let current = output.find("current:").unwrap();
        assert!(optimized < current);
        assert!(output.contains("hourlyRate: 60.0"));
    }
}
