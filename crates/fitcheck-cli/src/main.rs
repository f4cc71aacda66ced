use anyhow::Result;
use clap::Parser;
use tracing_subscriber::filter::LevelFilter;

use fitcheck_cli::{
    cli::{Cli, Commands, LogLevel},
    commands,
    config::CliConfig,
    output,
};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging; workflow results go to stdout, diagnostics here
    let level: LevelFilter = match (cli.log_level, cli.verbose) {
        (Some(level), _) => level.into(),
        (None, true) => LogLevel::Debug.into(),
        (None, false) => LogLevel::Warn.into(),
    };
    let env_filter = format!("fitcheck_cli={level},fitcheck_core={level}");
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(env_filter))
        .with_writer(std::io::stderr)
        .init();

    // Load configuration with CLI overrides
    let mut config = CliConfig::load(cli.config)?;
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }
    if cli.output_dir.is_some() {
        config.output_dir = cli.output_dir;
    }
    let out_dir = config
        .output_dir
        .clone()
        .unwrap_or_else(|| std::path::PathBuf::from("."));
    let format = cli.format;

    let passed = match cli.command {
        Some(Commands::FitnessFunctions) => {
            commands::fitness::execute(&config, &out_dir, format).await?
        }

        Some(Commands::Scenario {
            scenario,
            iterations,
        }) => {
            commands::scenario::execute(&config, &out_dir, format, scenario.into(), iterations)
                .await?
        }

        Some(Commands::Monitoring { alert_threshold }) => {
            commands::monitoring::execute(&config, &out_dir, format, alert_threshold).await?
        }

        Some(Commands::Deployment { environment }) => {
            commands::deployment::execute(&config, &out_dir, environment).await?
        }

        Some(Commands::Demo { interactive }) => {
            commands::demo::execute(&config, format, interactive).await?
        }

        // default workflow: everything, in CI order
        Some(Commands::All {
            scenario,
            iterations,
            alert_threshold,
            environment,
        }) => {
            run_all(
                &config,
                &out_dir,
                format,
                scenario.into(),
                iterations,
                alert_threshold,
                environment,
            )
            .await?
        }

        None => {
            run_all(
                &config,
                &out_dir,
                format,
                fitcheck_core::Scenario::HealthySystem,
                3,
                70,
                fitcheck_cli::cli::Environment::Production,
            )
            .await?
        }
    };

    if !passed {
        std::process::exit(1);
    }
    Ok(())
}

#[allow(clippy::too_many_arguments)]
async fn run_all(
    config: &CliConfig,
    out_dir: &std::path::Path,
    format: fitcheck_cli::cli::OutputFormat,
    scenario: fitcheck_core::Scenario,
    iterations: usize,
    alert_threshold: u8,
    environment: fitcheck_cli::cli::Environment,
) -> Result<bool> {
    let mut results: Vec<(&str, bool)> = Vec::new();

    results.push((
        "fitness-functions",
        commands::fitness::execute(config, out_dir, format).await?,
    ));
    results.push((
        "scenario",
        commands::scenario::execute(config, out_dir, format, scenario, iterations).await?,
    ));
    results.push((
        "monitoring",
        commands::monitoring::execute(config, out_dir, format, alert_threshold).await?,
    ));
    results.push((
        "deployment",
        commands::deployment::execute(config, out_dir, environment).await?,
    ));

    output::print_workflow_summary(&results);
    let all_passed = results.iter().all(|(_, passed)| *passed);
    if all_passed {
        println!("\n🎉 All workflows passed");
    } else {
        println!("\n⚠️ Some workflows failed");
    }
    Ok(all_passed)
}
