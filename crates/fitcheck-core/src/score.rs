//! Availability scoring
//!
//! Pure reduction of a sample set into a 0–100 score: the healthy fraction
//! (rounded to a percentage) minus a penalty of 20 points scaled by the
//! fraction of slow services, rounded down after the subtraction and floored
//! at zero.

use std::collections::BTreeMap;
use std::time::Duration;

use crate::health::ServiceHealth;

/// Static availability thresholds.
///
/// Two presets exist because the project historically carried two variants
/// with different figures; they are kept as alternate configurations rather
/// than reconciled.
#[derive(Debug, Clone, PartialEq)]
pub struct Thresholds {
    /// Budget for a single response and for the critical path as a whole
    pub max_latency: Duration,
    /// Tolerated failure fraction under concurrent load
    pub max_failure_rate: f64,
    /// Minimum score for the system to count as healthy
    pub min_score: u8,
}

impl Thresholds {
    /// The lenient figures used by the full mock variant (default).
    pub fn lenient() -> Self {
        Self {
            max_latency: Duration::from_secs(5),
            max_failure_rate: 0.10,
            min_score: 70,
        }
    }

    /// The stricter figures from the minimal variant.
    pub fn strict() -> Self {
        Self {
            max_latency: Duration::from_secs(3),
            max_failure_rate: 0.05,
            min_score: 80,
        }
    }
}

impl Default for Thresholds {
    fn default() -> Self {
        Self::lenient()
    }
}

/// Compute the availability score for a set of samples. Empty input scores 0.
pub fn availability_score(
    samples: &BTreeMap<String, ServiceHealth>,
    thresholds: &Thresholds,
) -> u8 {
    if samples.is_empty() {
        return 0;
    }

    let total = samples.len() as f64;
    let healthy = samples.values().filter(|s| s.healthy).count() as f64;
    let slow = samples
        .values()
        .filter(|s| s.is_slow(thresholds.max_latency))
        .count() as f64;

    let base = (100.0 * healthy / total).round();
    let penalty = 20.0 * slow / total;

    (base - penalty).floor().clamp(0.0, 100.0) as u8
}
