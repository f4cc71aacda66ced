//! Critical-path simulation
//!
//! The minimal ordered sequence of operations a group buy needs to complete:
//! cart creation through member notification. Every step runs and is timed
//! even after a failure, so latency accounting always reflects a full pass.

use std::time::Duration;

use serde::Serialize;
use tracing::debug;

use crate::health::ServiceHealth;
use crate::registry::ServiceRegistry;
use crate::score::Thresholds;

/// The business transaction, in order: (step label, backing service).
pub const CRITICAL_PATH: &[(&str, &str)] = &[
    ("Create group cart", "group_buying_service"),
    ("Add products to cart", "group_buying_service"),
    ("Check minimum participants", "database"),
    ("Generate consolidated order", "order_service"),
    ("Process group payment", "payment_service"),
    ("Coordinate logistics", "logistics_service"),
    ("Send notifications", "notification_service"),
];

/// One executed step of the critical path.
#[derive(Debug, Clone, Serialize)]
pub struct CriticalPathStep {
    pub label: String,
    #[serde(flatten)]
    pub health: ServiceHealth,
}

/// Outcome of a full critical-path pass.
#[derive(Debug, Clone, Serialize)]
pub struct CriticalPathResult {
    /// Every step healthy and the total under the latency budget
    pub available: bool,
    /// Sum of per-step latencies
    #[serde(rename = "total_response_time", with = "crate::health::duration_secs")]
    pub total_latency: Duration,
    pub steps: Vec<CriticalPathStep>,
}

impl CriticalPathResult {
    /// Steps whose samples came back unhealthy.
    pub fn failed_steps(&self) -> impl Iterator<Item = &CriticalPathStep> {
        self.steps.iter().filter(|s| !s.health.healthy)
    }
}

/// Run the critical path against a registry. Any unhealthy step breaks the
/// `available` flag, but the walk never short-circuits.
pub async fn run_critical_path(
    registry: &ServiceRegistry,
    thresholds: &Thresholds,
) -> CriticalPathResult {
    let mut steps = Vec::with_capacity(CRITICAL_PATH.len());
    let mut total_latency = Duration::ZERO;
    let mut successful = true;

    for &(label, service) in CRITICAL_PATH {
        let health = registry.check(service).await;
        total_latency += health.latency;

        if health.healthy {
            debug!(step = label, latency = ?health.latency, "critical path step ok");
        } else {
            debug!(step = label, error = ?health.error, "critical path step failed");
            successful = false;
        }

        steps.push(CriticalPathStep {
            label: label.to_string(),
            health,
        });
    }

    let available = successful && total_latency < thresholds.max_latency;
    debug!(?total_latency, available, "critical path complete");

    CriticalPathResult {
        available,
        total_latency,
        steps,
    }
}
