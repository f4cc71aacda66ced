//! The monitoring workflow: one health check judged against an alert
//! threshold.

use std::path::Path;

use anyhow::{Context, Result};

use fitcheck_core::FitnessRunner;

use crate::cli::OutputFormat;
use crate::config::CliConfig;
use crate::output;

pub async fn execute(
    config: &CliConfig,
    out_dir: &Path,
    format: OutputFormat,
    alert_threshold: u8,
) -> Result<bool> {
    output::print_header("Continuous Monitoring");
    println!("🏥 Running health check...");

    let runner = FitnessRunner::new(config.registry(), config.thresholds());
    let report = runner.run().await;

    let path = out_dir.join("monitoring-results").join("health_report.json");
    report
        .write_to(&path)
        .await
        .context("writing health report")?;
    println!("📄 Report written to {}", path.display());

    output::print_report(&report, format);

    if report.score < alert_threshold {
        println!(
            "\n🚨 ALERT: score {} below threshold {alert_threshold}",
            report.score
        );
        Ok(false)
    } else {
        println!("\n{} Health within acceptable range", output::status(true));
        Ok(true)
    }
}
