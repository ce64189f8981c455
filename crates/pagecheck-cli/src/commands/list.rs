//! List command implementation.

use crate::cli::ListArgs;
use crate::error::Result;
use crate::plan::Plan;
use crate::{scenarios, ui};

/// Execute the list command.
///
/// Prints one line per scenario to stdout, plus every step with `--steps`.
///
/// # Errors
///
/// Returns plan loading errors when `--plan` is given.
pub async fn execute(args: ListArgs) -> Result<()> {
    let available = match &args.plan {
        Some(path) => Plan::load(path)?.scenarios,
        None => scenarios::builtin(),
    };

    ui::print_scenarios(&available, args.steps);
    Ok(())
}
