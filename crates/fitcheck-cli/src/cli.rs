use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::filter::LevelFilter;

use fitcheck_core::Scenario;

/// Log level options for CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    /// No logging output
    Off,
    /// Error messages only
    Error,
    /// Warnings and errors
    Warn,
    /// Informational messages (default for verbose)
    Info,
    /// Debug messages
    Debug,
    /// Trace-level messages (most verbose)
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::OFF,
            LogLevel::Error => LevelFilter::ERROR,
            LogLevel::Warn => LevelFilter::WARN,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Trace => LevelFilter::TRACE,
        }
    }
}

/// Output format for reports printed to stdout
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable tables
    Table,
    /// JSON for programmatic consumption
    Json,
}

/// Scenario presets, as named by the CI workflows
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ScenarioName {
    #[value(name = "healthy_system")]
    HealthySystem,
    #[value(name = "degraded_system")]
    DegradedSystem,
    #[value(name = "critical_failure")]
    CriticalFailure,
    #[value(name = "partial_failure")]
    PartialFailure,
    #[value(name = "high_load")]
    HighLoad,
    #[value(name = "stress_test")]
    StressTest,
}

impl From<ScenarioName> for Scenario {
    fn from(name: ScenarioName) -> Self {
        match name {
            ScenarioName::HealthySystem => Scenario::HealthySystem,
            ScenarioName::DegradedSystem => Scenario::DegradedSystem,
            ScenarioName::CriticalFailure => Scenario::CriticalFailure,
            ScenarioName::PartialFailure => Scenario::PartialFailure,
            ScenarioName::HighLoad => Scenario::HighLoad,
            ScenarioName::StressTest => Scenario::StressTest,
        }
    }
}

/// Target environment for deployment validation
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Environment {
    Staging,
    Production,
}

impl Environment {
    pub fn name(&self) -> &'static str {
        match self {
            Environment::Staging => "staging",
            Environment::Production => "production",
        }
    }
}

#[derive(Parser)]
#[command(name = "fitcheck")]
#[command(about = "fitcheck - availability fitness functions for the group-buying platform")]
#[command(version)]
pub struct Cli {
    /// Workflow to run (defaults to `all` if not provided)
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Set log level (off, error, warn, info, debug, trace)
    #[arg(short = 'l', long, global = true, value_enum)]
    pub log_level: Option<LogLevel>,

    /// Enable verbose logging (shortcut for --log-level=debug)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file path (TOML)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory report files are written under (overrides config file)
    #[arg(short = 'o', long, global = true)]
    pub output_dir: Option<PathBuf>,

    /// Seed for the simulation's random source (overrides config file)
    #[arg(long, global = true)]
    pub seed: Option<u64>,

    /// Set output format for stdout
    #[arg(short = 'f', long, global = true, value_enum, default_value = "table")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// One deterministic availability pass, as the main CI workflow runs it
    #[command(name = "fitness-functions")]
    FitnessFunctions,

    /// Run a named scenario preset for several iterations and summarize
    Scenario {
        /// Scenario preset to apply
        #[arg(short, long, value_enum, default_value = "healthy_system")]
        scenario: ScenarioName,

        /// Number of iterations
        #[arg(short, long, default_value = "3")]
        iterations: usize,
    },

    /// Single health check against an alert threshold
    Monitoring {
        /// Minimum score before the check alerts
        #[arg(short, long, default_value = "70")]
        alert_threshold: u8,
    },

    /// Pre- and post-deployment validation for an environment
    Deployment {
        /// Deployment environment
        #[arg(short, long, value_enum, default_value = "production")]
        environment: Environment,
    },

    /// Run every workflow in order and summarize
    All {
        /// Scenario preset for the scenario workflow
        #[arg(short, long, value_enum, default_value = "healthy_system")]
        scenario: ScenarioName,

        /// Iterations for the scenario workflow
        #[arg(short, long, default_value = "3")]
        iterations: usize,

        /// Alert threshold for the monitoring workflow
        #[arg(short, long, default_value = "70")]
        alert_threshold: u8,

        /// Environment for the deployment workflow
        #[arg(short, long, value_enum, default_value = "production")]
        environment: Environment,
    },

    /// Walk the demo scenarios with formatted output
    Demo {
        /// Open an interactive menu for toggling services
        #[arg(long)]
        interactive: bool,
    },
}
