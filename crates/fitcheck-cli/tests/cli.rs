//! Binary-level workflow tests: exit codes and report artifacts.

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;

/// Fully deterministic config: always-healthy services, no random failures.
const IDEAL_CONFIG: &str = r#"
profile = "ideal"
seed = 7
pinned_failure_rate = 0.0
"#;

fn fitcheck() -> Command {
    Command::cargo_bin("fitcheck").expect("binary builds")
}

fn write_config(dir: &std::path::Path) -> std::path::PathBuf {
    let path = dir.join("fitcheck.toml");
    fs::write(&path, IDEAL_CONFIG).unwrap();
    path
}

#[test]
fn fitness_functions_passes_and_writes_report() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path());

    fitcheck()
        .args(["fitness-functions", "--config"])
        .arg(&config)
        .arg("--output-dir")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Availability Fitness Functions"));

    let report_path = dir.path().join("test-results/availability-report.json");
    let report: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(report_path).unwrap()).unwrap();
    assert_eq!(report["overall_score"], 100);
    assert_eq!(report["is_healthy"], true);
    assert_eq!(report["critical_path_available"], true);
    assert_eq!(report["issues"].as_array().unwrap().len(), 0);
}

#[test]
fn monitoring_alerts_when_threshold_is_unreachable() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path());

    fitcheck()
        .args(["monitoring", "--alert-threshold", "101", "--config"])
        .arg(&config)
        .arg("--output-dir")
        .arg(dir.path())
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::contains("ALERT"));

    assert!(dir
        .path()
        .join("monitoring-results/health_report.json")
        .exists());
}

#[test]
fn critical_failure_scenario_fails_the_workflow() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path());

    fitcheck()
        .args([
            "scenario",
            "--scenario",
            "critical_failure",
            "--iterations",
            "1",
            "--config",
        ])
        .arg(&config)
        .arg("--output-dir")
        .arg(dir.path())
        .assert()
        .failure()
        .code(1);

    let results_path = dir
        .path()
        .join("scenario-results/critical_failure_results.json");
    let results: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(results_path).unwrap()).unwrap();
    assert_eq!(results["scenario"], "critical_failure");
    assert_eq!(results["summary"]["healthy_rate"], 0.0);
}

#[test]
fn deployment_workflow_passes_and_writes_validation_reports() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path());

    fitcheck()
        .args(["deployment", "--environment", "staging", "--config"])
        .arg(&config)
        .arg("--output-dir")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Deployment completed"));

    let validation_dir = dir.path().join("deployment-validation");
    let pre: serde_json::Value = serde_json::from_str(
        &fs::read_to_string(validation_dir.join("pre_deployment_validation.json")).unwrap(),
    )
    .unwrap();
    assert_eq!(pre["validation_passed"], true);
    assert_eq!(pre["critical_path_available"], true);
    assert_eq!(pre["scenarios_tested"].as_array().unwrap().len(), 3);

    let post: serde_json::Value = serde_json::from_str(
        &fs::read_to_string(validation_dir.join("post_deployment_validation.json")).unwrap(),
    )
    .unwrap();
    assert_eq!(post["validation_passed"], true);
    assert_eq!(post["deployment_environment"], "staging");
    assert_eq!(post["tests_run"], 3);
}

#[test]
fn all_workflows_pass_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path());

    fitcheck()
        .args(["all", "--config"])
        .arg(&config)
        .arg("--output-dir")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("All workflows passed"));

    for artifact in [
        "test-results/availability-report.json",
        "scenario-results/healthy_system_results.json",
        "monitoring-results/health_report.json",
        "deployment-validation/post_deployment_validation.json",
    ] {
        assert!(dir.path().join(artifact).exists(), "missing {artifact}");
    }
}

#[test]
fn unknown_scenario_is_rejected_by_clap() {
    fitcheck()
        .args(["scenario", "--scenario", "meltdown"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}

#[test]
fn json_format_emits_machine_readable_report() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path());

    let output = fitcheck()
        .args(["fitness-functions", "--format", "json", "--config"])
        .arg(&config)
        .arg("--output-dir")
        .arg(dir.path())
        .output()
        .unwrap();
    assert!(output.status.success());

    // the JSON body is embedded in stdout after the header lines
    let stdout = String::from_utf8(output.stdout).unwrap();
    let start = stdout.find('{').expect("json object in output");
    let end = stdout.rfind('}').expect("json object in output");
    let report: serde_json::Value = serde_json::from_str(&stdout[start..=end]).unwrap();
    assert_eq!(report["overall_score"], 100);
}
