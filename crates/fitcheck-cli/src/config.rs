//! CLI configuration
//!
//! Optional TOML file selecting a service profile, thresholds, a seed, and
//! per-service overrides. Flags passed on the command line win over file
//! values; everything has a sensible default so no file is required.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::warn;

use fitcheck_core::{
    ideal_profiles, platform_profiles, scenario::PINNED_FAILURE_RATE, ServiceRegistry, SharedRng,
    Thresholds,
};

/// Which alternate configuration of the system to exercise.
///
/// The project historically carried a full mock variant and a minimal
/// always-healthy one; both are kept selectable instead of reconciled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Profile {
    /// Platform service mix with lenient thresholds (default)
    #[default]
    Platform,
    /// Always-healthy 1ms services, lenient thresholds
    Ideal,
    /// Platform service mix judged against the stricter thresholds
    Strict,
}

/// Per-field threshold overrides on top of the profile's preset.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ThresholdOverrides {
    pub max_latency_ms: Option<u64>,
    pub max_failure_rate: Option<f64>,
    pub min_score: Option<u8>,
}

/// Overrides for one named service.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceOverride {
    pub base_latency_ms: Option<u64>,
    pub failure_rate: Option<f64>,
    pub available: Option<bool>,
}

/// CLI configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Service/threshold profile to run against
    pub profile: Profile,

    /// Seed for the simulation RNG; unseeded runs use OS entropy
    pub seed: Option<u64>,

    /// Failure rate pinned by workflows that want deterministic runs
    pub pinned_failure_rate: Option<f64>,

    /// Directory report files are written under
    pub output_dir: Option<PathBuf>,

    /// Threshold overrides
    pub thresholds: ThresholdOverrides,

    /// Per-service overrides, keyed by service name
    pub services: BTreeMap<String, ServiceOverride>,
}

impl CliConfig {
    /// Load configuration from an explicit TOML file, or defaults when no
    /// path is given.
    pub fn load(path: Option<PathBuf>) -> Result<Self> {
        match path {
            Some(path) => {
                let contents = std::fs::read_to_string(&path)
                    .with_context(|| format!("reading config file {}", path.display()))?;
                toml::from_str(&contents)
                    .with_context(|| format!("parsing config file {}", path.display()))
            }
            None => Ok(Self::default()),
        }
    }

    /// Effective thresholds: the profile's preset plus any overrides.
    pub fn thresholds(&self) -> Thresholds {
        let mut thresholds = match self.profile {
            Profile::Platform | Profile::Ideal => Thresholds::lenient(),
            Profile::Strict => Thresholds::strict(),
        };
        if let Some(ms) = self.thresholds.max_latency_ms {
            thresholds.max_latency = Duration::from_millis(ms);
        }
        if let Some(rate) = self.thresholds.max_failure_rate {
            thresholds.max_failure_rate = rate;
        }
        if let Some(score) = self.thresholds.min_score {
            thresholds.min_score = score;
        }
        thresholds
    }

    /// The failure rate workflows pin before deterministic runs.
    pub fn pinned_failure_rate(&self) -> f64 {
        self.pinned_failure_rate.unwrap_or(PINNED_FAILURE_RATE)
    }

    /// Build the service registry for this configuration. Overridden
    /// latencies and failure rates are baked into the profile so scenario
    /// resets preserve them; `available` overrides apply to the initial
    /// state only, since resets mark everything available by design.
    pub fn registry(&self) -> ServiceRegistry {
        let rng = match self.seed {
            Some(seed) => SharedRng::seeded(seed),
            None => SharedRng::from_entropy(),
        };

        let mut profiles = match self.profile {
            Profile::Platform | Profile::Strict => platform_profiles(),
            Profile::Ideal => ideal_profiles(),
        };

        for (name, over) in &self.services {
            let Some(profile) = profiles.iter_mut().find(|p| &p.name == name) else {
                warn!(service = %name, "config overrides unknown service, ignoring");
                continue;
            };
            if let Some(ms) = over.base_latency_ms {
                profile.base_latency = Duration::from_millis(ms);
            }
            if let Some(rate) = over.failure_rate {
                profile.failure_rate = rate;
            }
        }

        let mut registry = ServiceRegistry::from_profiles(profiles, rng);
        for (name, over) in &self.services {
            if let (Some(available), Some(service)) = (over.available, registry.get_mut(name)) {
                service.set_available(available);
            }
        }
        registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_platform_profile() {
        let config = CliConfig::default();
        assert_eq!(config.profile, Profile::Platform);
        assert_eq!(config.thresholds(), Thresholds::lenient());
        assert_eq!(config.registry().len(), 7);
    }

    #[test]
    fn parses_profile_and_overrides_from_toml() {
        let config: CliConfig = toml::from_str(
            r#"
            profile = "strict"
            seed = 42
            pinned_failure_rate = 0.0

            [thresholds]
            min_score = 90

            [services.payment_service]
            base_latency_ms = 10
            failure_rate = 0.0
            "#,
        )
        .unwrap();

        assert_eq!(config.profile, Profile::Strict);
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.pinned_failure_rate(), 0.0);

        let thresholds = config.thresholds();
        assert_eq!(thresholds.min_score, 90);
        assert_eq!(thresholds.max_latency, Thresholds::strict().max_latency);

        let registry = config.registry();
        let payment = registry.get("payment_service").unwrap();
        assert_eq!(payment.base_latency(), Duration::from_millis(10));
        assert_eq!(payment.failure_rate(), 0.0);
    }

    #[test]
    fn unknown_service_overrides_are_ignored() {
        let config: CliConfig = toml::from_str(
            r#"
            [services.inventory_service]
            available = false
            "#,
        )
        .unwrap();
        // still builds the full platform registry
        assert_eq!(config.registry().len(), 7);
    }

    #[test]
    fn missing_explicit_config_file_is_an_error() {
        let result = CliConfig::load(Some(PathBuf::from("/nonexistent/fitcheck.toml")));
        assert!(result.is_err());
    }
}
