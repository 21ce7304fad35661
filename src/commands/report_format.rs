use crate::services::comparison::{ScenarioComparison, compare_to_baseline};
use crate::services::simulation_types::{
    Impact, PercentileSummary, RepeatedSimulationReport, ScenarioResult,
};

pub fn format_scenario_results(results: &[ScenarioResult]) -> String {
    let mut lines = Vec::new();
    lines.push("Simulation Results".to_string());

    for result in results {
        lines.push(String::new());
        lines.push(format!("Scenario: {}", result.name));
        lines.push(format!("Total time: {:.1} min", result.total_time_minutes));
        lines.push(format!("Total cost: {:.2}", result.total_cost));
        lines.push("Step | Duration (min) | Cost | Utilization | Wait (min) | Efficiency".to_string());
        lines.push("-----|----------------|------|-------------|------------|-----------".to_string());
        for step in &result.steps {
            lines.push(format!(
                "{} | {:.1} | {:.2} | {:.0}% | {:.1} | {:.1}%",
                step.name,
                step.duration_minutes,
                step.cost,
                step.utilization * 100.0,
                step.wait_time_minutes,
                step.efficiency_percent
            ));
        }
        if result.bottlenecks.is_empty() {
            lines.push("Bottlenecks: none".to_string());
        } else {
            lines.push("Bottlenecks:".to_string());
            for bottleneck in &result.bottlenecks {
                lines.push(format!(
                    "- {} ({}): utilization {:.0}%, wait {:.1} min, impact {}",
                    bottleneck.name,
                    bottleneck.step_id,
                    bottleneck.utilization * 100.0,
                    bottleneck.wait_time_minutes,
                    impact_label(bottleneck.impact)
                ));
            }
        }
    }

    let comparisons = compare_to_baseline(results);
    if !comparisons.is_empty() {
        lines.push(String::new());
        lines.push(format!("Compared to {}:", comparisons[0].baseline));
        lines.push("Scenario | Time change | Cost change".to_string());
        lines.push("---------|-------------|------------".to_string());
        for comparison in &comparisons {
            lines.push(format_comparison_row(comparison));
        }
    }

    lines.join("\n")
}

pub fn format_repeated_report(report: &RepeatedSimulationReport) -> String {
    let mut lines = Vec::new();
    lines.push("Repeated Simulation Report".to_string());
    lines.push(format!("Data source: {}", report.data_source));
    lines.push(format!("Iterations: {}", report.iterations));

    for scenario in &report.scenarios {
        lines.push(String::new());
        lines.push(format!("Scenario: {}", scenario.name));
        lines.push(format!(
            "Mean time: {:.1} min, mean cost: {:.2}",
            scenario.mean_time_minutes, scenario.mean_cost
        ));
        lines.push("Percentile | Time (min) | Cost".to_string());
        lines.push("-----------|------------|-----".to_string());
        lines.extend(format_percentile_rows(&scenario.time_minutes, &scenario.cost));
    }

    lines.join("\n")
}

fn format_percentile_rows(time: &PercentileSummary, cost: &PercentileSummary) -> Vec<String> {
    [
        ("P0", time.p0, cost.p0),
        ("P50", time.p50, cost.p50),
        ("P85", time.p85, cost.p85),
        ("P100", time.p100, cost.p100),
    ]
    .iter()
    .map(|(label, time, cost)| format!("{label} | {time:.1} | {cost:.2}"))
    .collect()
}

fn format_comparison_row(comparison: &ScenarioComparison) -> String {
    format!(
        "{} | {} | {}",
        comparison.name,
        format_change(comparison.time_change_percent),
        format_change(comparison.cost_change_percent)
    )
}

fn format_change(change: Option<f64>) -> String {
    match change {
        Some(value) => format!("{value:+.1}%"),
        None => "n/a".to_string(),
    }
}

fn impact_label(impact: Impact) -> &'static str {
    match impact {
        Impact::High => "High",
        Impact::Medium => "Medium",
    }
}
