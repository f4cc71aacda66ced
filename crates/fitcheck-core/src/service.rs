//! Mock services
//!
//! A [`MockService`] simulates one dependency: it sleeps for its base latency
//! plus random jitter, then rolls against its failure rate. Forcing a service
//! unavailable overrides the roll. Randomness comes from an injected
//! [`SharedRng`] so runs are reproducible when seeded.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tokio::time::Instant;
use tracing::trace;

use crate::health::ServiceHealth;

/// Upper bound on the uniform jitter added to each simulated call.
pub const MAX_JITTER: Duration = Duration::from_millis(200);

/// Seedable random source shared across every mock service in a registry.
///
/// A single `StdRng` behind a mutex keeps draw order well-defined for
/// sequential runs, which is what makes seeded runs reproducible.
#[derive(Debug, Clone)]
pub struct SharedRng(Arc<Mutex<StdRng>>);

impl SharedRng {
    /// Deterministic source for reproducible runs
    pub fn seeded(seed: u64) -> Self {
        Self(Arc::new(Mutex::new(StdRng::seed_from_u64(seed))))
    }

    /// OS-entropy source
    pub fn from_entropy() -> Self {
        Self(Arc::new(Mutex::new(StdRng::from_os_rng())))
    }

    /// Uniform draw in `[0, 1)`
    pub(crate) fn roll(&self) -> f64 {
        self.0.lock().random_range(0.0..1.0)
    }

    /// Uniform jitter in `[0, MAX_JITTER)`
    pub(crate) fn jitter(&self) -> Duration {
        let secs = self.0.lock().random_range(0.0..MAX_JITTER.as_secs_f64());
        Duration::from_secs_f64(secs)
    }

    /// Uniform index in `[0, len)`
    pub(crate) fn index(&self, len: usize) -> usize {
        self.0.lock().random_range(0..len)
    }
}

impl Default for SharedRng {
    fn default() -> Self {
        Self::from_entropy()
    }
}

/// One simulated dependency. Mutable test fixture: scenario code adjusts
/// latency, failure rate, and availability between runs.
#[derive(Debug, Clone)]
pub struct MockService {
    name: String,
    base_latency: Duration,
    failure_rate: f64,
    available: bool,
    rng: SharedRng,
}

impl MockService {
    pub fn new(
        name: impl Into<String>,
        base_latency: Duration,
        failure_rate: f64,
        rng: SharedRng,
    ) -> Self {
        Self {
            name: name.into(),
            base_latency,
            failure_rate,
            available: true,
            rng,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn base_latency(&self) -> Duration {
        self.base_latency
    }

    pub fn failure_rate(&self) -> f64 {
        self.failure_rate
    }

    pub fn is_available(&self) -> bool {
        self.available
    }

    /// Adjust the simulated base latency
    pub fn set_base_latency(&mut self, latency: Duration) {
        self.base_latency = latency;
    }

    /// Adjust the probability of a random failure, clamped to `[0, 1]`
    pub fn set_failure_rate(&mut self, rate: f64) {
        self.failure_rate = rate.clamp(0.0, 1.0);
    }

    /// Force the service down (or back up), overriding the random roll
    pub fn set_available(&mut self, available: bool) {
        self.available = available;
    }

    /// Simulate one call: sleep base latency plus jitter, then report health.
    ///
    /// The sample is unhealthy when the service is forced unavailable or a
    /// uniform draw lands below the failure rate; final health is
    /// `available && !(roll < failure_rate)`.
    pub async fn simulate(&self) -> ServiceHealth {
        let started = Instant::now();
        let delay = self.base_latency + self.rng.jitter();
        tokio::time::sleep(delay).await;
        let latency = started.elapsed();

        let failed = !self.available || self.rng.roll() < self.failure_rate;
        trace!(service = %self.name, ?latency, failed, "simulated call");

        if failed {
            ServiceHealth::unhealthy(
                &self.name,
                latency,
                format!("Service {} is unavailable", self.name),
            )
        } else {
            ServiceHealth::healthy(&self.name, latency)
        }
    }
}
