//! action-diag - diagnostic harness for agent actions
//!
//! Runs named action implementations inside disposable sandboxes, validates
//! their output, and records one JSON artifact per scenario run.

use clap::Parser;

use action_diag::cli::{self, Cli};
use action_diag::common::logging;

fn main() {
    logging::init_cli();

    let args = Cli::parse();
    match cli::run(args) {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}
