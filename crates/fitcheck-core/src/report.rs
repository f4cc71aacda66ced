//! Availability reports
//!
//! The JSON artifact a fitness pass leaves behind. Field names follow the
//! format the CI workflows already consume (`overall_score`, `is_healthy`,
//! `critical_path_available`, ...).

use std::collections::BTreeMap;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::FitnessError;
use crate::health::ServiceHealth;

/// Aggregated outcome of one fitness pass. Derived entirely from samples
/// plus static thresholds; it has no lifecycle beyond the run that built it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvailabilityReport {
    /// Composite availability score, always in `[0, 100]`
    #[serde(rename = "overall_score")]
    pub score: u8,
    /// Whether the score met the minimum threshold
    #[serde(rename = "is_healthy")]
    pub healthy: bool,
    /// Per-service samples from this pass
    pub services: BTreeMap<String, ServiceHealth>,
    /// Independently computed critical-path verdict
    #[serde(rename = "critical_path_available")]
    pub critical_path_ok: bool,
    /// Human-readable problems found during the pass
    pub issues: Vec<String>,
    pub timestamp: DateTime<Utc>,
}

impl AvailabilityReport {
    /// Pretty-printed JSON, the format written to report files.
    pub fn to_json(&self) -> Result<String, FitnessError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write the report to `path`, creating parent directories as needed.
    pub async fn write_to(&self, path: &Path) -> Result<(), FitnessError> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(path, self.to_json()?).await?;
        debug!(path = %path.display(), "wrote availability report");
        Ok(())
    }
}
