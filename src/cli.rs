//! Command-line interface
//!
//! Listing, selection, and the human-facing run summary. Everything heavier
//! lives in the harness; this layer only wires flags to library calls and
//! turns the summary into console lines and an exit code.

use std::path::PathBuf;

use clap::Parser;
use colored::{ColoredString, Colorize};

use crate::catalog::ActionCatalog;
use crate::common::config::Config;
use crate::common::Result;
use crate::harness::{Diagnoser, ResultLogger, RunSummary, ScenarioRegistry, Selection, Verdict};

#[derive(Parser, Debug)]
#[command(name = "action-diag", about = "Diagnose agent actions in disposable sandboxes")]
#[command(version, long_about = None)]
pub struct Cli {
    /// Action to diagnose; repeat the flag to run several in order
    #[arg(short = 'a', long = "action", value_name = "NAME")]
    pub actions: Vec<String>,

    /// List the available diagnostic scenarios and exit
    #[arg(long)]
    pub list: bool,

    /// Diagnose every action that has a scenario (the default)
    #[arg(long)]
    pub all: bool,

    /// Path of the action catalog file
    #[arg(long, value_name = "PATH")]
    pub actions_file: Option<PathBuf>,

    /// Directory for per-scenario result artifacts
    #[arg(long, value_name = "PATH")]
    pub log_dir: Option<PathBuf>,
}

/// Run the CLI and return the process exit code
pub fn run(cli: Cli) -> Result<i32> {
    let registry = ScenarioRegistry::discover()?;

    if cli.list {
        println!("Available diagnostic scenarios:");
        for name in registry.list_all() {
            println!(" - {name}");
        }
        return Ok(0);
    }

    let config = Config::load()?;
    let actions_file = cli.actions_file.unwrap_or(config.actions_file);
    let log_dir = cli.log_dir.unwrap_or(config.log_dir);

    let catalog = ActionCatalog::load(&actions_file)?;
    let selection = if cli.actions.is_empty() {
        Selection::All
    } else {
        Selection::Actions(cli.actions)
    };

    let diagnoser = Diagnoser::new(&registry, &catalog, ResultLogger::new(log_dir));
    let summary = diagnoser.run(&selection);

    print_summary(&summary);
    Ok(if summary.has_failures() { 1 } else { 0 })
}

fn print_summary(summary: &RunSummary) {
    println!("Diagnostic summary:");
    for report in &summary.reports {
        println!(
            " {} {}: {} - {}",
            glyph(report.verdict),
            report.action,
            colored_verdict(report.verdict),
            report.message
        );
    }
    println!(
        "{} passed, {} failed, {} skipped",
        summary.passed().to_string().green(),
        summary.failed().to_string().red(),
        summary.skipped().to_string().yellow()
    );
}

fn glyph(verdict: Verdict) -> ColoredString {
    match verdict {
        Verdict::Pass => "✓".green(),
        Verdict::Fail => "✗".red(),
        Verdict::Skip => "-".yellow(),
    }
}

fn colored_verdict(verdict: Verdict) -> ColoredString {
    match verdict {
        Verdict::Pass => "pass".green(),
        Verdict::Fail => "fail".red(),
        Verdict::Skip => "skip".yellow(),
    }
}
