//! CLI binary for `taskboard`.
//!
//! This binary is a thin wrapper that parses arguments and delegates to
//! the library's interactive shell.

use clap::Parser;
use std::process::ExitCode;

use taskboard::cli::{run, Cli};

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = run(&cli) {
        eprintln!("Error: {e}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
