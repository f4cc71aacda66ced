//! Demo walkthrough of the canned scenarios, plus an interactive mode for
//! poking individual services.

use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Select};

use fitcheck_core::{FitnessError, FitnessRunner, Scenario, ServiceRegistry};

use crate::cli::OutputFormat;
use crate::config::CliConfig;
use crate::output;

/// The walkthrough order; stress_test is left to the scenario workflow.
const DEMO_SCENARIOS: [Scenario; 5] = [
    Scenario::HealthySystem,
    Scenario::DegradedSystem,
    Scenario::CriticalFailure,
    Scenario::PartialFailure,
    Scenario::HighLoad,
];

/// Load batch size for the high-load demo.
const DEMO_LOAD_REQUESTS: usize = 20;

pub async fn execute(config: &CliConfig, format: OutputFormat, interactive: bool) -> Result<bool> {
    let mut runner = FitnessRunner::new(config.registry(), config.thresholds());
    let rate = config.pinned_failure_rate();

    for (i, scenario) in DEMO_SCENARIOS.iter().enumerate() {
        output::print_header(&format!("SCENARIO {}: {scenario}", i + 1));
        println!("{}.", demo_blurb(*scenario));

        runner.registry_mut().reset(rate);
        apply_demo_conditions(*scenario, runner.registry_mut())?;

        let report = runner.run().await;
        output::print_report(&report, format);

        if *scenario == Scenario::HighLoad {
            let load = runner.load(DEMO_LOAD_REQUESTS).await;
            output::print_load(&load);
        }
    }

    runner.registry_mut().reset(rate);

    if interactive {
        run_interactive(&mut runner, format).await?;
    }
    Ok(true)
}

/// The walkthrough's partial-failure step breaks the purchase flow itself
/// rather than the notification side channel the scenario workflow uses.
fn apply_demo_conditions(
    scenario: Scenario,
    registry: &mut ServiceRegistry,
) -> Result<(), FitnessError> {
    match scenario {
        Scenario::PartialFailure => registry.set_available("payment_service", false),
        other => other.apply(registry),
    }
}

fn demo_blurb(scenario: Scenario) -> &'static str {
    match scenario {
        Scenario::PartialFailure => "Payment service is down, but other services work",
        other => other.describe(),
    }
}

async fn run_interactive(runner: &mut FitnessRunner, format: OutputFormat) -> Result<()> {
    output::print_header("INTERACTIVE DEMO");
    println!("Control service availability and see the impact.");

    let theme = ColorfulTheme::default();
    loop {
        let choice = Select::with_theme(&theme)
            .with_prompt("Options")
            .items(&[
                "Test current system state",
                "Toggle service availability",
                "Reset all services to healthy",
                "Exit",
            ])
            .default(0)
            .interact()?;

        match choice {
            0 => {
                let report = runner.run().await;
                output::print_report(&report, format);
            }
            1 => {
                let names: Vec<String> =
                    runner.registry().names().map(str::to_string).collect();
                let idx = Select::with_theme(&theme)
                    .with_prompt("Service")
                    .items(&names)
                    .default(0)
                    .interact()?;
                let name = &names[idx];
                let available = runner
                    .registry()
                    .get(name)
                    .map(|s| s.is_available())
                    .unwrap_or(true);
                runner.registry_mut().set_available(name, !available)?;
                println!(
                    "🔧 Set {name} to {}",
                    if available { "unavailable" } else { "available" }
                );
            }
            2 => {
                runner.registry_mut().reset(0.0);
                println!("🔧 All services reset to healthy");
            }
            _ => break,
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use fitcheck_core::SharedRng;

    #[test]
    fn partial_failure_demo_downs_the_payment_service() {
        let mut registry = ServiceRegistry::platform_with(SharedRng::seeded(1));
        apply_demo_conditions(Scenario::PartialFailure, &mut registry).unwrap();

        assert!(!registry.get("payment_service").unwrap().is_available());
        assert!(registry.get("notification_service").unwrap().is_available());
    }

    #[test]
    fn other_demo_steps_use_the_scenario_presets() {
        let mut registry = ServiceRegistry::platform_with(SharedRng::seeded(2));
        apply_demo_conditions(Scenario::CriticalFailure, &mut registry).unwrap();
        assert!(!registry.get("group_buying_service").unwrap().is_available());
    }
}
