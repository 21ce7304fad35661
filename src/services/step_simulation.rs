use thiserror::Error;

use crate::domain::step::StepDefinition;
use crate::services::simulation_settings::SimulationSettings;
use crate::services::simulation_types::StepResult;
use crate::services::step_sampler::StepSampler;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum InvalidStepInput {
    #[error("base duration must be a positive number of minutes, got {0}")]
    Duration(f64),
    #[error("complexity factor must be positive, got {0}")]
    Complexity(f64),
    #[error("resource count must be at least 1")]
    ResourceCount,
    #[error("hourly rate must not be negative, got {0}")]
    HourlyRate(f64),
    #[error("simulated duration {duration} min and cost {cost} are out of range")]
    OutOfRange { duration: f64, cost: f64 },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum StepSimulationError {
    #[error("invalid input for step {step}: {reason}")]
    InvalidInput {
        step: String,
        #[source]
        reason: InvalidStepInput,
    },
}

/// Perturbs one step: scales the base duration by complexity and a sampled
/// variability, prices it, and applies a wait-time penalty when the sampled
/// utilization exceeds the bottleneck threshold.
///
/// Variability is drawn before utilization, so a seeded sampler reproduces
/// a run exactly.
pub fn simulate_step<S: StepSampler + ?Sized>(
    step: &StepDefinition,
    settings: &SimulationSettings,
    sampler: &mut S,
) -> Result<StepResult, StepSimulationError> {
    validate_step(step).map_err(|reason| StepSimulationError::InvalidInput {
        step: step.id.clone(),
        reason,
    })?;

    let variability = sampler.variability();
    let duration_minutes = step.base_duration_minutes * step.complexity_factor * variability;
    let cost = step.hourly_rate * (duration_minutes / 60.0) * step.resource_count as f64;
    // Finite inputs can still overflow to infinity or underflow to zero.
    if !is_positive(duration_minutes) || !cost.is_finite() {
        return Err(StepSimulationError::InvalidInput {
            step: step.id.clone(),
            reason: InvalidStepInput::OutOfRange {
                duration: duration_minutes,
                cost,
            },
        });
    }

    let utilization = sampler.utilization();
    let wait_time_minutes = if utilization > settings.bottleneck_threshold {
        duration_minutes * settings.wait_time_factor
    } else {
        0.0
    };
    let efficiency_percent = (1.0 - wait_time_minutes / duration_minutes) * 100.0;

    log::debug!(
        "step {}: variability {variability:.3}, duration {duration_minutes:.2} min, utilization {utilization:.3}",
        step.id
    );

    Ok(StepResult {
        step_id: step.id.clone(),
        name: step.name.clone(),
        duration_minutes,
        cost,
        utilization,
        wait_time_minutes,
        efficiency_percent,
    })
}

/// Checks the configured values of a step without drawing anything.
pub fn validate_step(step: &StepDefinition) -> Result<(), InvalidStepInput> {
    if !is_positive(step.base_duration_minutes) {
        return Err(InvalidStepInput::Duration(step.base_duration_minutes));
    }
    if !is_positive(step.complexity_factor) {
        return Err(InvalidStepInput::Complexity(step.complexity_factor));
    }
    if step.resource_count == 0 {
        return Err(InvalidStepInput::ResourceCount);
    }
    if !step.hourly_rate.is_finite() || step.hourly_rate < 0.0 {
        return Err(InvalidStepInput::HourlyRate(step.hourly_rate));
    }
    Ok(())
}

fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}
