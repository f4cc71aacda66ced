//! The scenario-testing workflow: repeated runs of one preset plus summary
//! statistics.

use std::path::Path;

use anyhow::Result;

use fitcheck_core::{FitnessRunner, Scenario, ScenarioDriver};

use crate::cli::OutputFormat;
use crate::config::CliConfig;
use crate::output;

/// Minimum healthy rate for the workflow to pass.
const MIN_HEALTHY_RATE: f64 = 0.6;

pub async fn execute(
    config: &CliConfig,
    out_dir: &Path,
    format: OutputFormat,
    scenario: Scenario,
    iterations: usize,
) -> Result<bool> {
    output::print_header(&format!("Scenario Testing - {scenario}"));
    println!("{}", scenario.describe());
    println!("🔄 Iterations: {iterations}");

    let runner = FitnessRunner::new(config.registry(), config.thresholds());
    let mut driver =
        ScenarioDriver::new(runner).with_pinned_failure_rate(config.pinned_failure_rate());
    let summary = driver.run(scenario, iterations).await?;

    let path = out_dir
        .join("scenario-results")
        .join(format!("{scenario}_results.json"));
    super::write_json(&path, &summary).await?;
    println!("📄 Results written to {}", path.display());

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&summary)?),
        OutputFormat::Table => output::print_scenario_summary(&summary),
    }

    Ok(summary.summary.healthy_rate >= MIN_HEALTHY_RATE)
}
