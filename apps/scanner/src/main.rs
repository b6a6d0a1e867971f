//! # Serial Guard Entry Point
//!
//! ## Startup
//! 1. Parse the command line
//! 2. Initialize tracing (stderr)
//! 3. Hand off to [`serialguard_scanner::run`]
//!
//! Errors are printed once and mapped to an exit code.

use std::process::ExitCode;

use clap::Parser;
use serialguard_scanner::cli::Cli;
use tracing::error;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    serialguard_scanner::init_tracing(cli.verbose);

    match serialguard_scanner::run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "Scanner exited with error");
            eprintln!("serialguard: {}", e);
            ExitCode::from(e.exit_code())
        }
    }
}
