//! Error types for fitness-function runs
//!
//! Simulated failures (a service rolling unhealthy, a slow response, a broken
//! critical path) are never errors — they land in the issues list of an
//! [`AvailabilityReport`](crate::AvailabilityReport). This enum covers real
//! faults only: bad input and report I/O.

use thiserror::Error;

/// Errors raised by the fitness layer itself, as opposed to simulated
/// service failures.
#[derive(Error, Debug)]
pub enum FitnessError {
    #[error("Unknown scenario: {0}")]
    UnknownScenario(String),

    #[error("Service not found: {0}")]
    ServiceNotFound(String),

    #[error("Report serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Report I/O error: {0}")]
    Io(#[from] std::io::Error),
}
