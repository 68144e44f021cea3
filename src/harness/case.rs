//! Scenario descriptors
//!
//! A [`TestCase`] is the declarative recipe for diagnosing one action: the
//! fixture its sandbox starts from, the inputs it receives, and the check
//! that judges its output. Descriptors are built once at discovery time and
//! never mutated afterwards.

use std::fmt;
use std::path::Path;

use serde_json::{Map, Value};

use super::outcome::ActionOutcome;
use super::sandbox::FixtureSpec;

/// One named input parameter
#[derive(Debug, Clone)]
pub enum InputValue {
    /// Literal JSON value passed through unchanged
    Value(Value),
    /// Path relative to the sandbox root, resolved to an absolute string at
    /// execution time ("." and "" resolve to the root itself)
    SandboxPath(String),
}

/// Outcome of a scenario's validation step
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Validation {
    Pass(String),
    Fail(String),
}

/// Decides whether an outcome is correct for the assembled input
pub type Validator = Box<dyn Fn(&ActionOutcome, &Map<String, Value>) -> Validation + Send + Sync>;

/// Declarative scenario for one action
pub struct TestCase {
    action: String,
    input: Vec<(String, InputValue)>,
    fixture: FixtureSpec,
    validator: Option<Validator>,
    skip_reason: Option<String>,
}

impl TestCase {
    pub fn new(action: impl Into<String>) -> Self {
        Self {
            action: action.into(),
            input: Vec::new(),
            fixture: FixtureSpec::new(),
            validator: None,
            skip_reason: None,
        }
    }

    /// Set the sandbox fixture
    pub fn fixture(mut self, fixture: FixtureSpec) -> Self {
        self.fixture = fixture;
        self
    }

    /// Add a literal input parameter
    pub fn input(mut self, name: impl Into<String>, value: Value) -> Self {
        self.input.push((name.into(), InputValue::Value(value)));
        self
    }

    /// Add an input parameter that resolves against the sandbox root
    pub fn sandbox_input(mut self, name: impl Into<String>, relative: impl Into<String>) -> Self {
        self.input
            .push((name.into(), InputValue::SandboxPath(relative.into())));
        self
    }

    /// Set the output check; without one the default validation applies
    pub fn validator(
        mut self,
        validator: impl Fn(&ActionOutcome, &Map<String, Value>) -> Validation + Send + Sync + 'static,
    ) -> Self {
        self.validator = Some(Box::new(validator));
        self
    }

    /// Mark the scenario as not runnable in this harness
    pub fn skip_reason(mut self, reason: impl Into<String>) -> Self {
        self.skip_reason = Some(reason.into());
        self
    }

    /// The action identifier this scenario diagnoses
    pub fn action(&self) -> &str {
        &self.action
    }

    pub fn fixture_spec(&self) -> &FixtureSpec {
        &self.fixture
    }

    pub fn declared_skip(&self) -> Option<&str> {
        self.skip_reason.as_deref()
    }

    /// Render the declared inputs for an invocation rooted at `sandbox_root`.
    ///
    /// Parameters keep their declared order of precedence: a name declared
    /// twice takes its last value.
    pub fn assemble_input(&self, sandbox_root: &Path) -> Map<String, Value> {
        let mut assembled = Map::new();
        for (name, value) in &self.input {
            let rendered = match value {
                InputValue::Value(value) => value.clone(),
                InputValue::SandboxPath(relative) => {
                    let path = if relative.is_empty() || relative == "." {
                        sandbox_root.to_path_buf()
                    } else {
                        sandbox_root.join(relative)
                    };
                    Value::String(path.display().to_string())
                }
            };
            assembled.insert(name.clone(), rendered);
        }
        assembled
    }

    /// Judge an outcome, falling back to the default validation
    pub fn validate(&self, outcome: &ActionOutcome, input: &Map<String, Value>) -> Validation {
        match &self.validator {
            Some(validator) => validator(outcome, input),
            None => default_validation(outcome),
        }
    }
}

impl fmt::Debug for TestCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TestCase")
            .field("action", &self.action)
            .field("inputs", &self.input.len())
            .field("has_validator", &self.validator.is_some())
            .field("skip_reason", &self.skip_reason)
            .finish()
    }
}

/// Weakest useful check: the action produced *something* structured
pub fn default_validation(outcome: &ActionOutcome) -> Validation {
    match &outcome.parsed {
        Some(Value::Object(map)) if !map.is_empty() => {
            Validation::Pass("Action produced a non-empty JSON object.".to_string())
        }
        Some(Value::Array(items)) if !items.is_empty() => {
            Validation::Pass("Action produced a non-empty list.".to_string())
        }
        _ => Validation::Fail("Action output was empty.".to_string()),
    }
}
