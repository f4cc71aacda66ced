//! The deployment workflow: pre-deployment validation across scenarios, a
//! simulated deploy, then post-deployment verification.

use std::path::Path;
use std::time::Duration;

use anyhow::Result;
use chrono::Utc;
use serde_json::json;
use tracing::info;

use fitcheck_core::{
    AvailabilityReport, FitnessError, FitnessRunner, IterationResult, LoadReport, Scenario,
    ServiceRegistry,
};

use crate::cli::Environment;
use crate::config::CliConfig;
use crate::output;

/// Scenarios exercised before a deploy is allowed.
const PRE_DEPLOY_SCENARIOS: [Scenario; 3] = [
    Scenario::HealthySystem,
    Scenario::DegradedSystem,
    Scenario::HighLoad,
];

/// Degraded latencies used for pre-deployment validation. Milder than the
/// scenario-testing preset: these leave the critical path inside the latency
/// budget, so a well-behaved system can still clear the gate.
const DEPLOY_DEGRADED_PAYMENT_LATENCY: Duration = Duration::from_millis(2000);
const DEPLOY_DEGRADED_LOGISTICS_LATENCY: Duration = Duration::from_millis(1500);

/// Load batch size for the high-load validation scenario.
const DEPLOY_LOAD_REQUESTS: usize = 100;

/// Average-score gates for the two validation phases.
const PRE_DEPLOY_MIN_AVERAGE: f64 = 80.0;
const POST_DEPLOY_MIN_AVERAGE: f64 = 85.0;

/// Post-deployment verification passes.
const POST_DEPLOY_RUNS: usize = 3;

pub async fn execute(config: &CliConfig, out_dir: &Path, environment: Environment) -> Result<bool> {
    output::print_header(&format!("Deployment Validation - {}", environment.name()));
    let dir = out_dir.join("deployment-validation");

    let mut runner = FitnessRunner::new(config.registry(), config.thresholds());
    let rate = config.pinned_failure_rate();

    // pre-deployment: every gate scenario must hold up
    println!("🔍 Running pre-deployment validation...");
    let mut results: Vec<(Scenario, IterationResult)> = Vec::new();
    for scenario in PRE_DEPLOY_SCENARIOS {
        println!("\n--- Testing {scenario} ---");
        runner.registry_mut().reset(rate);
        apply_deploy_conditions(scenario, runner.registry_mut())?;

        let report = runner.run().await;
        let load = match scenario {
            Scenario::HighLoad => Some(runner.load(DEPLOY_LOAD_REQUESTS).await),
            _ => None,
        };
        let result = iteration_result(1, report, load.as_ref());
        println!(
            "   score {}/100, healthy {}",
            result.overall_score,
            output::status(result.is_healthy)
        );
        results.push((scenario, result));
    }

    let (average, all_healthy, critical_ok) = aggregate(results.iter().map(|(_, r)| r));
    let pre_passed = average >= PRE_DEPLOY_MIN_AVERAGE && all_healthy && critical_ok;

    let pre_report = json!({
        "timestamp": Utc::now(),
        "scenarios_tested": results.iter().map(|(s, _)| s.name()).collect::<Vec<_>>(),
        "average_score": average,
        "all_scenarios_healthy": all_healthy,
        "critical_path_available": critical_ok,
        "validation_passed": pre_passed,
        "detailed_results": results
            .iter()
            .map(|(s, r)| (s.name(), r))
            .collect::<std::collections::BTreeMap<_, _>>(),
    });
    super::write_json(&dir.join("pre_deployment_validation.json"), &pre_report).await?;

    println!(
        "\n📊 Pre-deployment: average {average:.1}/100, validation {}",
        output::status(pre_passed)
    );
    if !pre_passed {
        return Ok(false);
    }

    // the deploy itself is pretend; the validation around it is the point
    println!("\n🚀 Deploying to {}...", environment.name());
    tokio::time::sleep(Duration::from_secs(2)).await;
    println!("✅ Deployment completed");
    info!(environment = environment.name(), "simulated deployment");

    println!("\n🔍 Running post-deployment validation...");
    let mut post_results = Vec::new();
    for i in 1..=POST_DEPLOY_RUNS {
        println!("\n--- Post-deployment test {i}/{POST_DEPLOY_RUNS} ---");
        runner.registry_mut().reset(rate);
        let report = runner.run().await;
        let result = iteration_result(i, report, None);
        println!(
            "   score {}/100, healthy {}",
            result.overall_score,
            output::status(result.is_healthy)
        );
        post_results.push(result);
    }

    let (average, all_healthy, critical_ok) = aggregate(post_results.iter());
    let post_passed = average >= POST_DEPLOY_MIN_AVERAGE && all_healthy && critical_ok;

    let post_report = json!({
        "timestamp": Utc::now(),
        "deployment_environment": environment.name(),
        "tests_run": post_results.len(),
        "average_score": average,
        "all_tests_healthy": all_healthy,
        "critical_path_available": critical_ok,
        "validation_passed": post_passed,
        "test_results": post_results,
    });
    super::write_json(&dir.join("post_deployment_validation.json"), &post_report).await?;

    println!(
        "\n📊 Post-deployment: average {average:.1}/100, validation {}",
        output::status(post_passed)
    );
    Ok(post_passed)
}

/// Deployment-specific conditions for each gate scenario. The degraded case
/// uses its own latencies rather than the scenario-testing preset, whose
/// heavier degradation pushes the critical path past the budget outright.
fn apply_deploy_conditions(
    scenario: Scenario,
    registry: &mut ServiceRegistry,
) -> Result<(), FitnessError> {
    match scenario {
        Scenario::DegradedSystem => {
            registry.set_base_latency("payment_service", DEPLOY_DEGRADED_PAYMENT_LATENCY)?;
            registry.set_base_latency("logistics_service", DEPLOY_DEGRADED_LOGISTICS_LATENCY)
        }
        _ => Ok(()),
    }
}

fn iteration_result(
    iteration: usize,
    report: AvailabilityReport,
    load: Option<&LoadReport>,
) -> IterationResult {
    IterationResult {
        iteration,
        timestamp: Utc::now(),
        overall_score: report.score,
        is_healthy: report.healthy,
        critical_path_available: report.critical_path_ok,
        issues: report.issues,
        concurrent_success_rate: load.map(|l| l.success_rate),
        concurrent_requests_per_second: load.map(|l| l.requests_per_second),
    }
}

fn aggregate<'a>(results: impl Iterator<Item = &'a IterationResult>) -> (f64, bool, bool) {
    let mut count = 0usize;
    let mut total = 0.0;
    let mut all_healthy = true;
    let mut critical_ok = true;
    for result in results {
        count += 1;
        total += result.overall_score as f64;
        all_healthy &= result.is_healthy;
        critical_ok &= result.critical_path_available;
    }
    let average = if count == 0 { 0.0 } else { total / count as f64 };
    (average, all_healthy, critical_ok)
}
