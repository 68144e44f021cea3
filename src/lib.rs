//! Diagnostic test-execution harness for agent actions
//!
//! Actions are opaque external programs; this crate exercises each one
//! inside an isolated, disposable sandbox, validates what it observably did,
//! and records a structured artifact per run. Scenarios are first-class
//! data: a fixture, named inputs, and an output check, discovered from an
//! explicit module manifest.

pub mod catalog;
pub mod cli;
pub mod common;
pub mod harness;
pub mod scenarios;

// Re-export the types most callers and tests reach for
pub use catalog::{ActionCatalog, ActionSpec};
pub use common::{Error, Result};
pub use harness::{
    ActionOutcome, Diagnoser, ExecutionEngine, ExecutionRecord, FixtureSpec, ResultLogger,
    RunSummary, ScenarioRegistry, Selection, TestCase, Validation, Verdict,
};
