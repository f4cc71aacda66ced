//! Fitness runner
//!
//! One full availability pass: sample every service, walk the critical path,
//! fire a small load batch, then fold everything into an
//! [`AvailabilityReport`]. Simulated failures become issue entries, never
//! errors — the runner is infallible once configured.

use std::collections::BTreeMap;

use chrono::Utc;
use tracing::info;

use crate::health::ServiceHealth;
use crate::load::{run_load, LoadReport};
use crate::path::{run_critical_path, CriticalPathResult};
use crate::registry::ServiceRegistry;
use crate::report::AvailabilityReport;
use crate::score::{availability_score, Thresholds};

/// Batch size of the load check embedded in a full pass.
const EMBEDDED_LOAD_REQUESTS: usize = 10;

/// Penalty applied when the critical path is unavailable.
const CRITICAL_PATH_PENALTY: i32 = 30;

/// Penalty applied when the load batch's success rate misses the threshold.
const LOAD_PENALTY: i32 = 20;

/// Drives availability fitness functions against one registry.
#[derive(Debug)]
pub struct FitnessRunner {
    registry: ServiceRegistry,
    thresholds: Thresholds,
}

impl FitnessRunner {
    pub fn new(registry: ServiceRegistry, thresholds: Thresholds) -> Self {
        Self {
            registry,
            thresholds,
        }
    }

    pub fn registry(&self) -> &ServiceRegistry {
        &self.registry
    }

    /// Mutable registry access for scenario code.
    pub fn registry_mut(&mut self) -> &mut ServiceRegistry {
        &mut self.registry
    }

    pub fn thresholds(&self) -> &Thresholds {
        &self.thresholds
    }

    /// Sample every registered service once, sequentially.
    pub async fn check_all(&self) -> BTreeMap<String, ServiceHealth> {
        let names: Vec<String> = self.registry.names().map(str::to_string).collect();
        let mut results = BTreeMap::new();
        for name in names {
            let health = self.registry.check(&name).await;
            results.insert(name, health);
        }
        results
    }

    /// Walk the ordered critical path.
    pub async fn critical_path(&self) -> CriticalPathResult {
        run_critical_path(&self.registry, &self.thresholds).await
    }

    /// Fire a concurrent load batch of the given size.
    pub async fn load(&self, requests: usize) -> LoadReport {
        run_load(&self.registry, requests).await
    }

    /// Run the full pass and aggregate the result.
    pub async fn run(&self) -> AvailabilityReport {
        info!("running availability fitness functions");

        let services = self.check_all().await;
        let path = self.critical_path().await;
        let load = self.load(EMBEDDED_LOAD_REQUESTS).await;

        self.evaluate(services, &path, &load)
    }

    fn evaluate(
        &self,
        services: BTreeMap<String, ServiceHealth>,
        path: &CriticalPathResult,
        load: &LoadReport,
    ) -> AvailabilityReport {
        let mut issues = Vec::new();
        let mut score = availability_score(&services, &self.thresholds) as i32;

        if !path.available {
            issues.push("Critical path is not available".to_string());
            score -= CRITICAL_PATH_PENALTY;
        }

        if load.success_rate < 1.0 - self.thresholds.max_failure_rate {
            issues.push(format!(
                "Concurrent success rate too low: {:.1}%",
                load.success_rate * 100.0
            ));
            score -= LOAD_PENALTY;
        }

        for (name, health) in &services {
            if !health.healthy {
                issues.push(format!(
                    "Service {name} is unhealthy: {}",
                    health.error.as_deref().unwrap_or("unknown error")
                ));
            } else if health.is_slow(self.thresholds.max_latency) {
                issues.push(format!(
                    "Service {name} is too slow: {:.3}s",
                    health.latency.as_secs_f64()
                ));
            }
        }

        let score = score.clamp(0, 100) as u8;
        let healthy = score >= self.thresholds.min_score;

        info!(
            score,
            healthy,
            critical_path = path.available,
            issues = issues.len(),
            "fitness pass complete"
        );

        AvailabilityReport {
            score,
            healthy,
            services,
            critical_path_ok: path.available,
            issues,
            timestamp: Utc::now(),
        }
    }
}
