use std::io;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("failed to read settings file: {0}")]
    Read(#[from] io::Error),
    #[error("failed to parse settings yaml: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("invalid {name} range: [{min}, {max}]")]
    InvalidRange { name: &'static str, min: f64, max: f64 },
    #[error("invalid {name}: {value}")]
    InvalidValue { name: &'static str, value: f64 },
}

/// Inclusive range a uniform sample is drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SampleRange {
    pub min: f64,
    pub max: f64,
}

impl SampleRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    fn validate(&self, name: &'static str) -> Result<(), SettingsError> {
        if !self.min.is_finite() || !self.max.is_finite() || self.min > self.max {
            return Err(SettingsError::InvalidRange {
                name,
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }
}

/// Knobs of the step perturbation. The defaults reproduce the
/// variability/utilization model used by the scenario pages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationSettings {
    pub variability_range: SampleRange,
    pub utilization_range: SampleRange,
    /// Utilization above which a step waits and is flagged as a bottleneck.
    pub bottleneck_threshold: f64,
    /// Utilization above which a bottleneck has high impact.
    pub high_impact_threshold: f64,
    /// Share of the step duration spent waiting when over the threshold.
    pub wait_time_factor: f64,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            variability_range: SampleRange::new(0.8, 1.2),
            utilization_range: SampleRange::new(0.6, 1.0),
            bottleneck_threshold: 0.8,
            high_impact_threshold: 0.9,
            wait_time_factor: 0.2,
        }
    }
}

impl SimulationSettings {
    pub fn from_yaml_file(path: &str) -> Result<Self, SettingsError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    pub fn from_yaml_str(input: &str) -> Result<Self, SettingsError> {
        let settings: SimulationSettings = serde_yaml::from_str(input)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Loads settings from `path` when given, falls back to the defaults.
    pub fn load(path: Option<&str>) -> Result<Self, SettingsError> {
        match path {
            Some(path) => Self::from_yaml_file(path),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        self.variability_range.validate("variability")?;
        if self.variability_range.min <= 0.0 {
            return Err(SettingsError::InvalidRange {
                name: "variability",
                min: self.variability_range.min,
                max: self.variability_range.max,
            });
        }
        self.utilization_range.validate("utilization")?;
        if self.utilization_range.min < 0.0 || self.utilization_range.max > 1.0 {
            return Err(SettingsError::InvalidRange {
                name: "utilization",
                min: self.utilization_range.min,
                max: self.utilization_range.max,
            });
        }
        check_unit_interval("bottleneck threshold", self.bottleneck_threshold)?;
        check_unit_interval("high impact threshold", self.high_impact_threshold)?;
        if self.high_impact_threshold < self.bottleneck_threshold {
            return Err(SettingsError::InvalidValue {
                name: "high impact threshold (below bottleneck threshold)",
                value: self.high_impact_threshold,
            });
        }
        if !(0.0..1.0).contains(&self.wait_time_factor) {
            return Err(SettingsError::InvalidValue {
                name: "wait time factor",
                value: self.wait_time_factor,
            });
        }
        Ok(())
    }
}

fn check_unit_interval(name: &'static str, value: f64) -> Result<(), SettingsError> {
    if !(0.0..=1.0).contains(&value) {
        return Err(SettingsError::InvalidValue { name, value });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_yaml_keeps_remaining_defaults() {
        let settings = SimulationSettings::from_yaml_str(
            "variability_range:\n  min: 0.9\n  max: 1.1\nbottleneck_threshold: 0.75\n",
        )
        .unwrap();

        assert_eq!(settings.variability_range, SampleRange::new(0.9, 1.1));
        assert_eq!(settings.bottleneck_threshold, 0.75);
        assert_eq!(settings.utilization_range, SampleRange::new(0.6, 1.0));
        assert_eq!(settings.high_impact_threshold, 0.9);
        assert_eq!(settings.wait_time_factor, 0.2);
    }

    #[test]
    fn rejects_inverted_range() {
        let err = SimulationSettings::from_yaml_str(
            "utilization_range:\n  min: 0.9\n  max: 0.7\n",
        )
        .unwrap_err();
        assert!(matches!(
            err,
            SettingsError::InvalidRange {
                name: "utilization",
                ..
            }
        ));
    }

    #[test]
    fn rejects_utilization_above_one() {
        let err = SimulationSettings::from_yaml_str(
            "utilization_range:\n  min: 0.6\n  max: 1.5\n",
        )
        .unwrap_err();
        assert!(matches!(err, SettingsError::InvalidRange { .. }));
    }

    #[test]
    fn rejects_wait_time_factor_out_of_range() {
        let err = SimulationSettings::from_yaml_str("wait_time_factor: 1.0\n").unwrap_err();
        assert!(matches!(
            err,
            SettingsError::InvalidValue {
                name: "wait time factor",
                ..
            }
        ));
    }

    #[test]
    fn rejects_high_impact_threshold_below_bottleneck_threshold() {
        let err = SimulationSettings::from_yaml_str(
            "bottleneck_threshold: 0.85\nhigh_impact_threshold: 0.7\n",
        )
        .unwrap_err();
        assert!(matches!(
            err,
            SettingsError::InvalidValue { value, .. } if value == 0.7
        ));

        let equal = SimulationSettings::from_yaml_str(
            "bottleneck_threshold: 0.85\nhigh_impact_threshold: 0.85\n",
        );
        assert!(equal.is_ok());
    }

    #[test]
    fn load_without_path_returns_defaults() {
        let settings = SimulationSettings::load(None).unwrap();
        assert_eq!(settings, SimulationSettings::default());
    }
}
