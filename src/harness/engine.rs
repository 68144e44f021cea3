//! Scenario execution pipeline
//!
//! Runs one scenario from descriptor to record: skip checks, sandbox setup,
//! input assembly, invocation, output decoding, and the verdict. The engine
//! is total over everything the action can do; only harness-side defects
//! (a broken registry, an unwritable artifact) surface as errors elsewhere.

use chrono::Utc;
use serde_json::Map;
use tracing::{debug, warn};

use super::case::{TestCase, Validation};
use super::outcome::{ActionOutcome, ExecutionRecord, FailureKind, FailureRecord, Verdict};
use super::parse;
use super::sandbox::Sandbox;
use crate::catalog::ActionCatalog;

/// Skip message when the catalog has no implementation for the action
const NO_IMPLEMENTATION: &str = "Action implementation not found.";

pub struct ExecutionEngine<'a> {
    catalog: &'a ActionCatalog,
}

impl<'a> ExecutionEngine<'a> {
    pub fn new(catalog: &'a ActionCatalog) -> Self {
        Self { catalog }
    }

    /// Run one scenario to completion.
    ///
    /// Skips are decided before any sandbox exists; once the sandbox is
    /// entered it lives exactly until the record is built, so both the
    /// invocation and the validator observe the same world.
    pub fn run(&self, case: &TestCase) -> ExecutionRecord {
        let action = case.action();

        if let Some(reason) = case.declared_skip() {
            debug!(action, "scenario is declared skipped");
            return ExecutionRecord::skipped(action, reason);
        }

        let Some(spec) = self.catalog.get(action) else {
            debug!(action, "no implementation in the action catalog");
            return ExecutionRecord::skipped(action, NO_IMPLEMENTATION);
        };

        let sandbox = match Sandbox::enter(action, case.fixture_spec()) {
            Ok(sandbox) => sandbox,
            Err(e) => {
                warn!(action, error = %e, "fixture setup failed");
                return ExecutionRecord {
                    action: action.to_string(),
                    verdict: Verdict::Fail,
                    message: format!("Failed to prepare the sandbox fixture: {e}"),
                    input: Map::new(),
                    outcome: ActionOutcome::failed(FailureRecord::new(
                        FailureKind::Fixture,
                        e.to_string(),
                    )),
                    timestamp: Utc::now(),
                };
            }
        };

        let input = case.assemble_input(sandbox.path());
        debug!(action, command = %spec.command, "invoking action implementation");
        let mut outcome = spec.invoke(&input, sandbox.path());

        // Decoding is best-effort: an undecodable payload is recorded but the
        // verdict stays with the failure record or the validator.
        match parse::parse_output(&outcome.raw_output) {
            Ok(parsed) => outcome.parsed = Some(parsed),
            Err(e) => outcome.parse_error = Some(e.to_string()),
        }

        let (verdict, message) = match &outcome.failure {
            Some(failure) => (
                Verdict::Fail,
                format!("Execution failed: {}", failure.message),
            ),
            None => match case.validate(&outcome, &input) {
                Validation::Pass(message) => (Verdict::Pass, message),
                Validation::Fail(message) => (Verdict::Fail, message),
            },
        };

        ExecutionRecord {
            action: action.to_string(),
            verdict,
            message,
            input,
            outcome,
            timestamp: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ActionSpec;
    use crate::harness::sandbox::FixtureSpec;

    #[test]
    fn test_declared_skip_short_circuits() {
        let catalog = ActionCatalog::from_specs(vec![]);
        let case = TestCase::new("send message").skip_reason("needs the host service");

        let record = ExecutionEngine::new(&catalog).run(&case);
        assert_eq!(record.verdict, Verdict::Skip);
        assert_eq!(record.message, "needs the host service");
        assert!(record.input.is_empty());
    }

    #[test]
    fn test_missing_implementation_skips_before_the_sandbox() {
        let catalog = ActionCatalog::from_specs(vec![]);
        // An unenterable fixture proves the sandbox was never touched: had it
        // been, the verdict would be a fixture failure instead of a skip.
        let case = TestCase::new("ghost action")
            .fixture(FixtureSpec::new().text("../escape.txt", "boom"));

        let record = ExecutionEngine::new(&catalog).run(&case);
        assert_eq!(record.verdict, Verdict::Skip);
        assert_eq!(record.message, NO_IMPLEMENTATION);
        assert!(!record.outcome.has_failure());
    }

    #[test]
    fn test_fixture_failure_is_a_fail_verdict() {
        let catalog =
            ActionCatalog::from_specs(vec![ActionSpec::new("broken fixture", "true")]);
        let case = TestCase::new("broken fixture")
            .fixture(FixtureSpec::new().text("../escape.txt", "boom"));

        let record = ExecutionEngine::new(&catalog).run(&case);
        assert_eq!(record.verdict, Verdict::Fail);
        let failure = record.outcome.failure.as_ref().unwrap();
        assert_eq!(failure.kind, FailureKind::Fixture);
        assert!(record.message.starts_with("Failed to prepare the sandbox fixture"));
    }
}
