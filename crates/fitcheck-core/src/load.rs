//! Concurrent load simulation
//!
//! Fires a fixed-size batch of simulated calls against randomly chosen
//! services and joins them all before reporting. No streaming, no partial
//! results, no ordering guarantee among the samples.

use std::time::Duration;

use futures::future::join_all;
use serde::Serialize;
use tokio::time::Instant;
use tracing::debug;

use crate::health::ServiceHealth;
use crate::registry::ServiceRegistry;

/// Small stagger before each simulated call, standing in for request fan-out.
const RAMP_DELAY: Duration = Duration::from_millis(10);

/// Outcome of one load batch.
#[derive(Debug, Clone, Serialize)]
pub struct LoadReport {
    /// Batch size
    pub requests: usize,
    /// Healthy fraction of the batch, in `[0, 1]`
    pub success_rate: f64,
    /// Wall-clock duration of the whole batch
    #[serde(rename = "total_time", with = "crate::health::duration_secs")]
    pub elapsed: Duration,
    pub requests_per_second: f64,
    /// The individual samples, exactly `requests` of them
    #[serde(skip)]
    pub samples: Vec<ServiceHealth>,
}

/// Run `requests` concurrent simulated calls and gather the results.
pub async fn run_load(registry: &ServiceRegistry, requests: usize) -> LoadReport {
    let started = Instant::now();

    let calls = (0..requests).map(|_| async {
        tokio::time::sleep(RAMP_DELAY).await;
        registry.check_random().await
    });
    let samples = join_all(calls).await;

    let elapsed = started.elapsed();
    let healthy = samples.iter().filter(|s| s.healthy).count();
    // a zero-request batch is vacuously successful
    let success_rate = if requests == 0 {
        1.0
    } else {
        healthy as f64 / requests as f64
    };
    let requests_per_second = if elapsed.is_zero() {
        0.0
    } else {
        requests as f64 / elapsed.as_secs_f64()
    };

    debug!(requests, success_rate, ?elapsed, "load batch complete");

    LoadReport {
        requests,
        success_rate,
        elapsed,
        requests_per_second,
        samples,
    }
}
