//! powdiff
//!
//! Command-line front end of the proof-of-work difficulty toolkit.

use clap::Parser;
use powdiff::{
    commands,
    config::{Args, Config},
    error::Result,
    utils,
};
use std::process::ExitCode;
use tracing::debug;

fn run(args: Args) -> Result<String> {
    // Load configuration
    let config = Config::from_args(&args)?;

    // Initialize logging
    utils::init_logging(&config.logging.level, &config.logging.format)?;
    debug!(version = powdiff::VERSION, "Starting {}", powdiff::APP_NAME);

    let detail = args.command.detail();
    let output = commands::execute(args.command, &config)?;
    output.render(detail, args.json)
}

fn main() -> ExitCode {
    // Parse command-line arguments
    let args = Args::parse();

    match run(args) {
        Ok(text) => {
            println!("{}", text);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            if e.is_usage_error() {
                eprintln!("Run `{} <command> --help` for the expected input", powdiff::APP_NAME);
            }
            ExitCode::FAILURE
        }
    }
}
