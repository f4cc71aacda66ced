//! Health samples
//!
//! A [`ServiceHealth`] is the immutable record of one simulated call. The
//! serde field names (`is_healthy`, `response_time`, `error_message`) match
//! the JSON report format consumed by the CI workflows, with `response_time`
//! serialized as fractional seconds.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Outcome of a single simulated service call. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceHealth {
    /// Service that produced the sample
    pub name: String,
    /// Whether the call succeeded
    #[serde(rename = "is_healthy")]
    pub healthy: bool,
    /// Observed latency, serialized as fractional seconds
    #[serde(rename = "response_time", with = "duration_secs")]
    pub latency: Duration,
    /// Failure description for unhealthy samples
    #[serde(rename = "error_message", default)]
    pub error: Option<String>,
    /// When the sample was taken
    pub timestamp: DateTime<Utc>,
}

impl ServiceHealth {
    /// A successful sample
    pub fn healthy(name: impl Into<String>, latency: Duration) -> Self {
        Self {
            name: name.into(),
            healthy: true,
            latency,
            error: None,
            timestamp: Utc::now(),
        }
    }

    /// A failed sample with a textual error
    pub fn unhealthy(name: impl Into<String>, latency: Duration, error: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            healthy: false,
            latency,
            error: Some(error.into()),
            timestamp: Utc::now(),
        }
    }

    /// Whether the sample exceeds the given latency budget
    pub fn is_slow(&self, max_latency: Duration) -> bool {
        self.latency > max_latency
    }
}

/// Serialize a `Duration` as fractional seconds, the way the report format
/// expects response times.
pub(crate) mod duration_secs {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(value.as_secs_f64())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let secs = f64::deserialize(deserializer)?;
        Duration::try_from_secs_f64(secs)
            .map_err(|_| serde::de::Error::custom(format!("invalid response_time: {secs}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn healthy_sample_has_no_error() {
        let sample = ServiceHealth::healthy("cache", Duration::from_millis(20));
        assert!(sample.healthy);
        assert_eq!(sample.name, "cache");
        assert!(sample.error.is_none());
    }

    #[test]
    fn unhealthy_sample_carries_error() {
        let sample = ServiceHealth::unhealthy(
            "payment_service",
            Duration::from_millis(300),
            "Service payment_service is unavailable",
        );
        assert!(!sample.healthy);
        assert_eq!(
            sample.error.as_deref(),
            Some("Service payment_service is unavailable")
        );
    }

    #[test]
    fn slow_check_uses_strict_inequality() {
        let sample = ServiceHealth::healthy("database", Duration::from_secs(5));
        assert!(!sample.is_slow(Duration::from_secs(5)));
        assert!(sample.is_slow(Duration::from_millis(4999)));
    }

    #[test]
    fn serializes_latency_as_fractional_seconds() {
        let sample = ServiceHealth::healthy("cache", Duration::from_millis(250));
        let json = serde_json::to_value(&sample).unwrap();
        assert_eq!(json["is_healthy"], true);
        assert!((json["response_time"].as_f64().unwrap() - 0.25).abs() < 1e-9);
        assert!(json["error_message"].is_null());
    }

    #[test]
    fn round_trips_through_json() {
        let sample = ServiceHealth::unhealthy("order_service", Duration::from_millis(125), "boom");
        let json = serde_json::to_string(&sample).unwrap();
        let back: ServiceHealth = serde_json::from_str(&json).unwrap();
        assert_eq!(back, sample);
    }

    #[test]
    fn rejects_negative_response_time() {
        let result = serde_json::from_str::<ServiceHealth>(
            r#"{"name":"x","is_healthy":true,"response_time":-1.0,"timestamp":"2026-01-01T00:00:00Z"}"#,
        );
        assert!(result.is_err());
    }
}
