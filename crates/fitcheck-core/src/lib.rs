//! # Availability fitness functions
//!
//! Mocked services with randomized latency and failure behavior, an
//! aggregate 0–100 availability score, a simulated business-critical path,
//! and named scenario presets that drive everything through canned failure
//! profiles.
//!
//! Nothing here touches a network. Services are in-process simulations with
//! cooperative delays, so a full fitness pass is safe to run anywhere a CI
//! job can run.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use fitcheck_core::{FitnessRunner, ServiceRegistry, Thresholds};
//!
//! #[tokio::main]
//! async fn main() {
//!     let runner = FitnessRunner::new(ServiceRegistry::platform(), Thresholds::lenient());
//!     let report = runner.run().await;
//!     assert!(report.score <= 100);
//! }
//! ```

pub mod error;
pub mod health;
pub mod load;
pub mod path;
pub mod registry;
pub mod report;
pub mod runner;
pub mod scenario;
pub mod score;
pub mod service;

pub use error::FitnessError;
pub use health::ServiceHealth;
pub use load::LoadReport;
pub use path::{CriticalPathResult, CriticalPathStep, CRITICAL_PATH};
pub use registry::{ideal_profiles, platform_profiles, ServiceProfile, ServiceRegistry};
pub use report::AvailabilityReport;
pub use runner::FitnessRunner;
pub use scenario::{IterationResult, Scenario, ScenarioDriver, ScenarioStats, ScenarioSummary};
pub use score::{availability_score, Thresholds};
pub use service::{MockService, SharedRng};
