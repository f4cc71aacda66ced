//! Shared formatting for workflow output
//!
//! Human-readable tables and pass/fail markers on stdout; JSON when the user
//! asks for machine-readable output. Diagnostics go through `tracing`, never
//! here.

use std::time::Duration;

use colored::{ColoredString, Colorize};
use comfy_table::{presets::UTF8_FULL, Table};
use tracing::error;

use fitcheck_core::{AvailabilityReport, LoadReport, ScenarioSummary};

use crate::cli::OutputFormat;

pub fn print_header(title: &str) {
    println!("\n{}", "=".repeat(60));
    println!("🎯 {title}");
    println!("{}", "=".repeat(60));
}

pub fn status(ok: bool) -> ColoredString {
    if ok {
        "✅ PASS".green()
    } else {
        "❌ FAIL".red()
    }
}

pub fn format_secs(duration: Duration) -> String {
    format!("{:.3}s", duration.as_secs_f64())
}

/// Print a full availability report in the requested format.
pub fn print_report(report: &AvailabilityReport, format: OutputFormat) {
    match format {
        OutputFormat::Json => match report.to_json() {
            Ok(json) => println!("{json}"),
            Err(e) => error!("failed to render report: {e}"),
        },
        OutputFormat::Table => {
            let mut table = Table::new();
            table.load_preset(UTF8_FULL).set_header(vec![
                "Service",
                "Healthy",
                "Response time",
                "Error",
            ]);
            for (name, health) in &report.services {
                table.add_row(vec![
                    name.clone(),
                    if health.healthy { "✅" } else { "❌" }.to_string(),
                    format_secs(health.latency),
                    health.error.clone().unwrap_or_default(),
                ]);
            }
            println!("{table}");

            println!("\n📊 Results:");
            println!("   Overall score:  {}/100", report.score);
            println!("   System healthy: {}", status(report.healthy));
            println!("   Critical path:  {}", status(report.critical_path_ok));
            if report.issues.is_empty() {
                println!("   No issues detected");
            } else {
                println!("   Issues found: {}", report.issues.len());
                for issue in &report.issues {
                    println!("     - {issue}");
                }
            }
        }
    }
}

/// Print load-test figures.
pub fn print_load(load: &LoadReport) {
    println!("\n👥 Load test ({} requests):", load.requests);
    println!("   Success rate:    {:.1}%", load.success_rate * 100.0);
    println!("   Total time:      {}", format_secs(load.elapsed));
    println!("   Requests/second: {:.1}", load.requests_per_second);
}

/// Print a scenario run's summary statistics.
pub fn print_scenario_summary(summary: &ScenarioSummary) {
    println!("\n📊 Scenario summary ({}):", summary.scenario);
    println!("   Average score:      {:.1}/100", summary.summary.average_score);
    println!(
        "   Score range:        {}..={}",
        summary.summary.min_score, summary.summary.max_score
    );
    println!("   Healthy rate:       {:.1}%", summary.summary.healthy_rate * 100.0);
    println!(
        "   Critical path rate: {:.1}%",
        summary.summary.critical_path_rate * 100.0
    );
    println!("   Total issues:       {}", summary.summary.total_issues);
}

/// Print the final per-workflow pass/fail summary.
pub fn print_workflow_summary(results: &[(&str, bool)]) {
    print_header("TESTING SUMMARY");
    for (workflow, passed) in results {
        println!("   {workflow}: {}", status(*passed));
    }
}
