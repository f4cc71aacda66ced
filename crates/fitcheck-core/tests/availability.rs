//! End-to-end properties of the availability fitness functions.

use std::time::Duration;

use fitcheck_core::{
    FitnessRunner, Scenario, ScenarioDriver, ServiceRegistry, SharedRng, Thresholds,
};

fn runner(registry: ServiceRegistry) -> FitnessRunner {
    FitnessRunner::new(registry, Thresholds::lenient())
}

#[tokio::test(start_paused = true)]
async fn score_is_always_in_range() {
    for seed in 0..5 {
        let mut registry = ServiceRegistry::platform_with(SharedRng::seeded(seed));
        // exaggerate failures so the penalties actually fire
        registry.set_all_failure_rates(0.5);
        let report = runner(registry).run().await;
        assert!(report.score <= 100, "seed {seed}: score {}", report.score);
    }
}

#[tokio::test(start_paused = true)]
async fn all_healthy_and_fast_scores_100() {
    let registry = ServiceRegistry::ideal_with(SharedRng::seeded(100));
    let report = runner(registry).run().await;
    assert_eq!(report.score, 100);
    assert!(report.healthy);
    assert!(report.critical_path_ok);
    assert!(report.issues.is_empty());
}

#[tokio::test(start_paused = true)]
async fn single_forced_failure_is_named_in_issues() {
    let mut registry = ServiceRegistry::ideal_with(SharedRng::seeded(101));
    registry.set_available("logistics_service", false).unwrap();

    let report = runner(registry).run().await;
    assert!(!report.services["logistics_service"].healthy);
    assert!(report
        .issues
        .iter()
        .any(|i| i.contains("logistics_service is unhealthy")));
}

#[tokio::test(start_paused = true)]
async fn first_critical_path_service_down_fails_overall_health() {
    let mut registry = ServiceRegistry::ideal_with(SharedRng::seeded(102));
    registry.set_available("group_buying_service", false).unwrap();

    let report = runner(registry).run().await;
    assert!(!report.critical_path_ok);
    assert!(!report.healthy);
}

#[tokio::test(start_paused = true)]
async fn load_batch_of_n_returns_n_samples_with_bounded_success_rate() {
    let mut registry = ServiceRegistry::platform_with(SharedRng::seeded(103));
    registry.set_all_failure_rates(0.3);
    let r = runner(registry);

    for n in [1usize, 10, 50] {
        let load = r.load(n).await;
        assert_eq!(load.samples.len(), n);
        assert!((0.0..=1.0).contains(&load.success_rate));
    }
}

#[tokio::test(start_paused = true)]
async fn reset_reproduces_the_all_healthy_scenario() {
    let mut registry = ServiceRegistry::ideal_with(SharedRng::seeded(104));
    registry.set_available("payment_service", false).unwrap();
    registry.set_available("database", false).unwrap();
    registry
        .set_base_latency("order_service", Duration::from_secs(9))
        .unwrap();

    registry.reset(0.0);

    let report = runner(registry).run().await;
    assert_eq!(report.score, 100);
    assert!(report.healthy);
    assert!(report.issues.is_empty());
}

#[tokio::test(start_paused = true)]
async fn seeded_runs_are_reproducible() {
    let mut outcomes = Vec::new();
    for _ in 0..2 {
        let mut registry = ServiceRegistry::platform_with(SharedRng::seeded(7));
        registry.set_all_failure_rates(0.5);
        let r = runner(registry);
        let samples = r.check_all().await;
        let digest: Vec<(String, bool)> = samples
            .into_iter()
            .map(|(name, health)| (name, health.healthy))
            .collect();
        outcomes.push(digest);
    }
    assert_eq!(outcomes[0], outcomes[1]);
}

#[tokio::test(start_paused = true)]
async fn scenario_sweep_stays_in_range_and_resets() {
    let r = runner(ServiceRegistry::ideal_with(SharedRng::seeded(105)));
    let mut driver = ScenarioDriver::new(r).with_pinned_failure_rate(0.0);

    for scenario in Scenario::ALL {
        let summary = driver.run(scenario, 1).await.unwrap();
        assert!(summary.summary.average_score <= 100.0, "{scenario}");
    }

    // after the sweep, a healthy run still comes back perfect
    let summary = driver.run(Scenario::HealthySystem, 1).await.unwrap();
    assert_eq!(summary.summary.average_score, 100.0);
}
