//! Run command implementation.

use crate::cli::RunArgs;
use crate::config::PagecheckConfig;
use crate::error::{CliError, Result};
use crate::plan::Plan;
use crate::{scenarios, ui};
use pagecheck_browser::{LocalApp, Scenario, run_scenario};
use std::time::Instant;
use tracing::debug;

/// Execute the run command.
///
/// # Steps
///
/// 1. Load and validate configuration
/// 2. Select scenarios (names, `--all` or `--plan`)
/// 3. Run each scenario in its own browser, one after another
/// 4. Report each run, then fail unless everything passed or `exit_zero`
///
/// # Errors
///
/// Returns configuration and selection errors before anything runs,
/// `CliError::Browser` if Chrome cannot be launched, and
/// `CliError::VerificationFailed` when a scenario failed.
pub async fn execute(args: RunArgs) -> Result<()> {
    let config = PagecheckConfig::load(&args)?;
    config.validate()?;
    debug!("Effective configuration: {:?}", config);

    let selected = select(&args)?;
    let app = LocalApp::new(config.base_url.clone());

    ui::info(&format!(
        "Verifying {} scenario(s) against {}",
        selected.len(),
        config.base_url
    ));

    let mut reports = Vec::with_capacity(selected.len());
    for scenario in &selected {
        let started = Instant::now();
        let report = run_scenario(
            config.browser_config(),
            &app,
            scenario,
            config.verifier_options(),
        )
        .await?;
        ui::print_report(&report, started.elapsed());
        reports.push(report);
    }
    ui::print_summary(&reports);

    let failed = reports.iter().filter(|r| !r.passed()).count();
    if failed == 0 {
        ui::success(&format!(
            "All {} scenario(s) passed. Screenshots are in {}",
            reports.len(),
            config.out_dir.display()
        ));
        return Ok(());
    }

    if config.exit_zero {
        ui::warning(&format!(
            "{failed} of {} scenario(s) failed; exiting 0 as requested",
            reports.len()
        ));
        return Ok(());
    }

    Err(CliError::VerificationFailed {
        failed,
        total: reports.len(),
        out_dir: config.out_dir,
    })
}

/// Resolves the scenarios the arguments ask for, in the order given.
///
/// # Errors
///
/// Returns `UnknownScenario` for a name that isn't available and
/// `InvalidScenario` for a scenario whose steps are out of order.
pub fn select(args: &RunArgs) -> Result<Vec<Scenario>> {
    let selected = match (&args.plan, args.all) {
        (Some(path), _) => {
            let plan = Plan::load(path)?;
            if args.scenarios.is_empty() {
                plan.scenarios
            } else {
                args.scenarios
                    .iter()
                    .map(|name| {
                        plan.find(name).cloned().ok_or_else(|| CliError::UnknownScenario {
                            name: name.clone(),
                            available: scenarios::names(&plan.scenarios),
                        })
                    })
                    .collect::<Result<Vec<_>>>()?
            }
        }
        (None, true) => scenarios::builtin(),
        (None, false) => args
            .scenarios
            .iter()
            .map(|name| {
                scenarios::find(name).ok_or_else(|| CliError::UnknownScenario {
                    name: name.clone(),
                    available: scenarios::names(&scenarios::builtin()),
                })
            })
            .collect::<Result<Vec<_>>>()?,
    };

    for scenario in &selected {
        scenario
            .validate()
            .map_err(|reason| CliError::InvalidScenario {
                name: scenario.name.clone(),
                reason,
            })?;
    }

    Ok(selected)
}
