//! pagecheck - verify pages of a locally running web app in headless Chrome.
//!
//! Parses the command line, initializes logging and colors, and dispatches
//! to the command. Any error, including a failed verification, becomes a
//! miette report and a non-zero exit status.

use clap::Parser;
use miette::Result;
use pagecheck_cli::{cli, commands, error, logger, ui};

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::Cli::parse();

    logger::init_logger(args.verbose, args.quiet, args.no_color);
    ui::init_colors(args.no_color);

    let result = match args.command {
        cli::Command::Run(run_args) => commands::run_execute(run_args).await,
        cli::Command::List(list_args) => commands::list_execute(list_args).await,
    };

    result.map_err(error::cli_error_to_miette)
}
