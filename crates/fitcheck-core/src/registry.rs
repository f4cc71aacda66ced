//! Service registry
//!
//! An explicit, owned collection of mock services passed into each run.
//! Scenario code mutates it between runs; nothing here is global, and a
//! fresh registry (or a [`reset`](ServiceRegistry::reset)) restores the
//! profile it was built from.

use std::collections::BTreeMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::FitnessError;
use crate::health::ServiceHealth;
use crate::service::{MockService, SharedRng};

/// Default simulated behavior for one service: its name, base latency, and
/// random failure rate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceProfile {
    pub name: String,
    #[serde(rename = "base_latency_ms", with = "duration_ms")]
    pub base_latency: Duration,
    pub failure_rate: f64,
}

impl ServiceProfile {
    pub fn new(name: impl Into<String>, base_latency: Duration, failure_rate: f64) -> Self {
        Self {
            name: name.into(),
            base_latency,
            failure_rate,
        }
    }
}

mod duration_ms {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        Ok(Duration::from_millis(u64::deserialize(deserializer)?))
    }
}

/// The mock dependencies backing a fitness run, keyed by service name.
#[derive(Debug, Clone)]
pub struct ServiceRegistry {
    services: BTreeMap<String, MockService>,
    profiles: Vec<ServiceProfile>,
    rng: SharedRng,
}

impl ServiceRegistry {
    /// Build a registry from explicit profiles and a random source.
    pub fn from_profiles(profiles: Vec<ServiceProfile>, rng: SharedRng) -> Self {
        let services = profiles
            .iter()
            .map(|p| {
                (
                    p.name.clone(),
                    MockService::new(&p.name, p.base_latency, p.failure_rate, rng.clone()),
                )
            })
            .collect();
        Self {
            services,
            profiles,
            rng,
        }
    }

    /// The group-buying platform's default dependency set.
    pub fn platform() -> Self {
        Self::platform_with(SharedRng::from_entropy())
    }

    /// Platform defaults with an explicit random source (seed for tests).
    pub fn platform_with(rng: SharedRng) -> Self {
        Self::from_profiles(platform_profiles(), rng)
    }

    /// The profiles this registry was built from.
    pub fn profiles(&self) -> &[ServiceProfile] {
        &self.profiles
    }

    /// Minimal always-healthy variant: every service answers in ~1ms and
    /// never rolls a random failure.
    pub fn ideal() -> Self {
        Self::ideal_with(SharedRng::from_entropy())
    }

    /// Ideal profile with an explicit random source.
    pub fn ideal_with(rng: SharedRng) -> Self {
        Self::from_profiles(ideal_profiles(), rng)
    }

    pub fn len(&self) -> usize {
        self.services.len()
    }

    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&MockService> {
        self.services.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut MockService> {
        self.services.get_mut(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.services.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &MockService)> {
        self.services.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Simulate one call against a named service. A lookup miss yields an
    /// unhealthy zero-latency sample instead of an error, so missing
    /// services surface in the issues list like any other failure.
    pub async fn check(&self, name: &str) -> ServiceHealth {
        match self.services.get(name) {
            Some(service) => service.simulate().await,
            None => ServiceHealth::unhealthy(
                name,
                Duration::ZERO,
                format!("Service {name} not found"),
            ),
        }
    }

    /// Simulate one call against a uniformly random service.
    pub async fn check_random(&self) -> ServiceHealth {
        let names: Vec<&str> = self.names().collect();
        if names.is_empty() {
            return ServiceHealth::unhealthy(
                "registry",
                Duration::ZERO,
                "Service registry is empty",
            );
        }
        let name = names[self.rng.index(names.len())];
        self.check(name).await
    }

    /// Force a named service down or back up.
    pub fn set_available(&mut self, name: &str, available: bool) -> Result<(), FitnessError> {
        self.services
            .get_mut(name)
            .map(|s| s.set_available(available))
            .ok_or_else(|| FitnessError::ServiceNotFound(name.to_string()))
    }

    /// Override a named service's base latency.
    pub fn set_base_latency(&mut self, name: &str, latency: Duration) -> Result<(), FitnessError> {
        self.services
            .get_mut(name)
            .map(|s| s.set_base_latency(latency))
            .ok_or_else(|| FitnessError::ServiceNotFound(name.to_string()))
    }

    /// Pin every service's failure rate to the same value. CI workflows use
    /// this to keep runs deterministic.
    pub fn set_all_failure_rates(&mut self, rate: f64) {
        for service in self.services.values_mut() {
            service.set_failure_rate(rate);
        }
    }

    /// Restore every service to its profile latency, mark it available, and
    /// pin the given failure rate. Keeps scenario iterations independent.
    pub fn reset(&mut self, failure_rate: f64) {
        for profile in &self.profiles {
            if let Some(service) = self.services.get_mut(&profile.name) {
                service.set_base_latency(profile.base_latency);
                service.set_failure_rate(failure_rate);
                service.set_available(true);
            }
        }
    }
}

impl Default for ServiceRegistry {
    fn default() -> Self {
        Self::platform()
    }
}

/// Platform defaults: the services the critical path depends on, with
/// latency/failure figures loosely modeled on production behavior.
pub fn platform_profiles() -> Vec<ServiceProfile> {
    vec![
        ServiceProfile::new("group_buying_service", Duration::from_millis(150), 0.02),
        ServiceProfile::new("order_service", Duration::from_millis(200), 0.03),
        ServiceProfile::new("payment_service", Duration::from_millis(300), 0.05),
        ServiceProfile::new("logistics_service", Duration::from_millis(250), 0.04),
        ServiceProfile::new("notification_service", Duration::from_millis(100), 0.01),
        ServiceProfile::new("database", Duration::from_millis(50), 0.01),
        ServiceProfile::new("cache", Duration::from_millis(20), 0.005),
    ]
}

/// The minimal always-healthy variant: same services, ~1ms latency, no
/// random failures.
pub fn ideal_profiles() -> Vec<ServiceProfile> {
    platform_profiles()
        .into_iter()
        .map(|p| ServiceProfile::new(p.name, Duration::from_millis(1), 0.0))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn platform_registry_has_all_critical_path_services() {
        let registry = ServiceRegistry::platform();
        assert_eq!(registry.len(), 7);
        for name in [
            "group_buying_service",
            "order_service",
            "payment_service",
            "logistics_service",
            "notification_service",
            "database",
            "cache",
        ] {
            assert!(registry.get(name).is_some(), "missing {name}");
        }
    }

    #[tokio::test(start_paused = true)]
    async fn lookup_miss_yields_unhealthy_sample() {
        let registry = ServiceRegistry::platform_with(SharedRng::seeded(1));
        let health = registry.check("inventory_service").await;
        assert!(!health.healthy);
        assert_eq!(health.latency, Duration::ZERO);
        assert_eq!(
            health.error.as_deref(),
            Some("Service inventory_service not found")
        );
    }

    #[test]
    fn unknown_service_mutation_is_an_error() {
        let mut registry = ServiceRegistry::platform();
        let err = registry.set_available("nope", false).unwrap_err();
        assert!(matches!(err, FitnessError::ServiceNotFound(ref name) if name == "nope"));
    }

    #[test]
    fn reset_restores_profile_state() {
        let mut registry = ServiceRegistry::platform_with(SharedRng::seeded(1));
        registry
            .set_base_latency("payment_service", Duration::from_secs(3))
            .unwrap();
        registry.set_available("cache", false).unwrap();

        registry.reset(0.001);

        let payment = registry.get("payment_service").unwrap();
        assert_eq!(payment.base_latency(), Duration::from_millis(300));
        assert_eq!(payment.failure_rate(), 0.001);
        assert!(registry.get("cache").unwrap().is_available());
    }

    #[tokio::test(start_paused = true)]
    async fn ideal_registry_is_always_healthy() {
        let registry = ServiceRegistry::ideal_with(SharedRng::seeded(9));
        for name in registry.names().map(str::to_string).collect::<Vec<_>>() {
            let health = registry.check(&name).await;
            assert!(health.healthy, "{name} should be healthy");
        }
    }

    #[test]
    fn profile_round_trips_with_millisecond_latency() {
        let profile = ServiceProfile::new("database", Duration::from_millis(50), 0.01);
        let json = serde_json::to_value(&profile).unwrap();
        assert_eq!(json["base_latency_ms"], 50);
        let back: ServiceProfile = serde_json::from_value(json).unwrap();
        assert_eq!(back, profile);
    }
}
