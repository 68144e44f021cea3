//! Run orchestration
//!
//! The diagnoser walks a selection of actions in order, hands each scenario
//! to the engine, and writes one artifact per run. A scenario failing, or
//! even missing entirely, never stops the batch; only the artifact store
//! misbehaving is worth a warning, and the run still carries on.

use std::path::PathBuf;

use tracing::{info, warn};

use super::engine::ExecutionEngine;
use super::logger::ResultLogger;
use super::outcome::{ExecutionRecord, Verdict};
use super::registry::ScenarioRegistry;
use crate::catalog::ActionCatalog;

/// Skip message when the selection names an action nothing diagnoses
const NO_SCENARIO: &str = "No environment script implemented for this action.";

/// Which scenarios a run covers
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// Every registered scenario, in listing order
    All,
    /// An explicit list, run in the given order; duplicates run twice
    Actions(Vec<String>),
}

/// Console-facing digest of one scenario run
#[derive(Debug)]
pub struct ScenarioReport {
    pub action: String,
    pub verdict: Verdict,
    pub message: String,
    /// Where the full record landed, if the write succeeded
    pub artifact: Option<PathBuf>,
}

/// Aggregate result of a diagnostic run
#[derive(Debug, Default)]
pub struct RunSummary {
    pub reports: Vec<ScenarioReport>,
    /// Run-level warnings, currently only failed artifact writes
    pub warnings: Vec<String>,
}

impl RunSummary {
    pub fn passed(&self) -> usize {
        self.count(Verdict::Pass)
    }

    pub fn failed(&self) -> usize {
        self.count(Verdict::Fail)
    }

    pub fn skipped(&self) -> usize {
        self.count(Verdict::Skip)
    }

    pub fn has_failures(&self) -> bool {
        self.failed() > 0
    }

    fn count(&self, verdict: Verdict) -> usize {
        self.reports.iter().filter(|r| r.verdict == verdict).count()
    }
}

pub struct Diagnoser<'a> {
    registry: &'a ScenarioRegistry,
    engine: ExecutionEngine<'a>,
    logger: ResultLogger,
}

impl<'a> Diagnoser<'a> {
    pub fn new(
        registry: &'a ScenarioRegistry,
        catalog: &'a ActionCatalog,
        logger: ResultLogger,
    ) -> Self {
        Self {
            registry,
            engine: ExecutionEngine::new(catalog),
            logger,
        }
    }

    /// Run the selected scenarios and return their aggregate summary
    pub fn run(&self, selection: &Selection) -> RunSummary {
        let names: Vec<String> = match selection {
            Selection::All => self
                .registry
                .list_all()
                .into_iter()
                .map(str::to_string)
                .collect(),
            Selection::Actions(names) => names.clone(),
        };

        info!(total = names.len(), "starting diagnostic run");
        let mut summary = RunSummary::default();

        for name in &names {
            let record = match self.registry.get(name) {
                Ok(case) => self.engine.run(case),
                Err(_) => ExecutionRecord::skipped(name, NO_SCENARIO),
            };

            let artifact = match self.logger.record(&record) {
                Ok(path) => Some(path),
                Err(e) => {
                    warn!(action = %record.action, error = %e, "failed to write result artifact");
                    summary.warnings.push(format!("{}: {e}", record.action));
                    None
                }
            };

            info!(action = %record.action, verdict = %record.verdict, "scenario finished");
            summary.reports.push(ScenarioReport {
                action: record.action,
                verdict: record.verdict,
                message: record.message,
                artifact,
            });
        }

        summary
    }
}
