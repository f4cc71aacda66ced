//! The main fitness-functions workflow: one deterministic availability pass.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use fitcheck_core::FitnessRunner;

use crate::cli::OutputFormat;
use crate::config::CliConfig;
use crate::output;

pub async fn execute(config: &CliConfig, out_dir: &Path, format: OutputFormat) -> Result<bool> {
    output::print_header("Availability Fitness Functions");

    // pin failure rates so CI runs are consistent
    let mut registry = config.registry();
    registry.set_all_failure_rates(config.pinned_failure_rate());
    info!(rate = config.pinned_failure_rate(), "pinned failure rates");

    let runner = FitnessRunner::new(registry, config.thresholds());
    let report = runner.run().await;

    let path = out_dir.join("test-results").join("availability-report.json");
    report
        .write_to(&path)
        .await
        .context("writing availability report")?;
    println!("📄 Report written to {}", path.display());

    output::print_report(&report, format);

    if report.healthy {
        println!("\n{} System is healthy", output::status(true));
    } else {
        println!("\n{} System is unhealthy", output::status(false));
    }
    Ok(report.healthy)
}
