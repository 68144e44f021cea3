//! Execution outcome data model
//!
//! Everything an action run produces is captured here as plain data: the raw
//! byte-for-byte output, the best-effort parsed payload, and any failure that
//! occurred along the way. Result artifacts serialize [`ExecutionRecord`]
//! directly, so these shapes are the on-disk format as well.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Final judgement for one scenario run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Pass,
    Fail,
    Skip,
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Verdict::Pass => "pass",
            Verdict::Fail => "fail",
            Verdict::Skip => "skip",
        };
        write!(f, "{label}")
    }
}

/// Where in the execution pipeline a failure happened
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailureKind {
    /// The action process could not be started
    Spawn,
    /// Reading or writing the action's pipes failed
    Io,
    /// The action exited with a non-zero status
    Exit,
    /// The action was terminated by a signal
    Signal,
    /// The sandbox fixture could not be materialized
    Fixture,
}

/// A single captured failure, preserved as data rather than raised
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FailureRecord {
    pub kind: FailureKind,
    pub message: String,
    /// Supporting detail, typically the tail of the action's stderr
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

impl FailureRecord {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            context: None,
        }
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }
}

/// Everything observed from one action invocation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionOutcome {
    /// Trimmed stdout exactly as the action produced it
    pub raw_output: String,
    /// Trimmed stderr
    pub stderr: String,
    /// Structured payload recovered from the raw output, when possible
    pub parsed: Option<Value>,
    /// Why the raw output could not be decoded; never affects the verdict
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parse_error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure: Option<FailureRecord>,
}

impl ActionOutcome {
    /// Outcome for a run that never invoked anything (skips)
    pub fn empty() -> Self {
        Self {
            raw_output: String::new(),
            stderr: String::new(),
            parsed: Some(Value::Object(Map::new())),
            parse_error: None,
            failure: None,
        }
    }

    /// Outcome for a run that broke down before producing output
    pub fn failed(failure: FailureRecord) -> Self {
        Self {
            raw_output: String::new(),
            stderr: String::new(),
            parsed: None,
            parse_error: None,
            failure: Some(failure),
        }
    }

    pub fn has_failure(&self) -> bool {
        self.failure.is_some()
    }
}

/// Complete account of one scenario run; the artifact format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionRecord {
    pub action: String,
    pub verdict: Verdict,
    pub message: String,
    /// Input snapshot as assembled for the invocation, sandbox paths resolved
    pub input: Map<String, Value>,
    #[serde(flatten)]
    pub outcome: ActionOutcome,
    pub timestamp: DateTime<Utc>,
}

impl ExecutionRecord {
    /// Record for a scenario that was not executed
    pub fn skipped(action: &str, reason: &str) -> Self {
        Self {
            action: action.to_string(),
            verdict: Verdict::Skip,
            message: reason.to_string(),
            input: Map::new(),
            outcome: ActionOutcome::empty(),
            timestamp: Utc::now(),
        }
    }
}
