//! Workflow command implementations
//!
//! Each command returns `Ok(true)` on an overall pass; `main` turns a false
//! into exit code 1. Real faults (config, I/O) bubble up as errors.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

pub mod demo;
pub mod deployment;
pub mod fitness;
pub mod monitoring;
pub mod scenario;

/// Write a pretty-printed JSON artifact, creating parent directories.
pub(crate) async fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .with_context(|| format!("creating report directory {}", parent.display()))?;
    }
    let json = serde_json::to_string_pretty(value).context("serializing report")?;
    tokio::fs::write(path, json)
        .await
        .with_context(|| format!("writing report {}", path.display()))?;
    Ok(())
}
