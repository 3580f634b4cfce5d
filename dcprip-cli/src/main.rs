// dcprip-cli/src/main.rs
//
// Entry point of the dcprip binary.
//
// Responsibilities:
// - Parsing the command line into `Cli`.
// - Setting up logging to stderr or to a log file.
// - Dispatching to the scan, classify and downmix commands.
// - Reporting errors and setting the process exit code.

use clap::Parser;
use dcprip_cli::error::CliResult;
use dcprip_cli::logging::init_logging;
use dcprip_cli::{Cli, Commands, run_classify, run_downmix, run_scan, terminal};
use dcprip_core::CoreError;
use log::{error, info};
use std::process;

fn run(cli: Cli) -> CliResult<()> {
    let log_file = init_logging(cli.log_dir.as_deref(), cli.command.name(), cli.verbose)?;
    if let Some(path) = &log_file {
        info!("Logging to {}", path.display());
    }

    match cli.command {
        Commands::Scan(args) => run_scan(args),
        Commands::Classify(args) => run_classify(args),
        Commands::Downmix(args) => run_downmix(args, log_file.is_some()),
    }
}

fn suggestion(error: &CoreError) -> Option<&'static str> {
    match error {
        CoreError::InvalidDate(_) => {
            Some("Creation dates are written as YYYYMMDD, e.g. 20230228")
        }
        CoreError::UnsupportedChannelCount { .. } => {
            Some("Try --strategy gain-keeping for narrower layouts")
        }
        CoreError::RendererUnavailable(_) => {
            Some("Render the object track with an external renderer first")
        }
        _ => None,
    }
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        error!("{}", e);
        terminal::print_error("Error", &e.to_string(), suggestion(&e));
        process::exit(1);
    }
}
