//! # Tote Shell Entry Point
//!
//! The actual setup is in lib.rs for better testability.

use std::process::ExitCode;

use clap::Parser;
use tote_shell::cli::Args;
use tracing::error;

fn main() -> ExitCode {
    let args = Args::parse();
    tote_shell::init_tracing(args.verbose);

    match tote_shell::run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "tote shell failed");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
