//! Scenario execution harness
//!
//! Descriptors come from [`registry`], sandboxes from [`sandbox`], and the
//! [`engine`] turns one descriptor into one [`outcome::ExecutionRecord`].
//! The [`diagnoser`] strings whole runs together and the [`logger`] makes
//! each record durable.

pub mod case;
pub mod diagnoser;
pub mod engine;
pub mod logger;
pub mod outcome;
pub mod parse;
pub mod registry;
pub mod sandbox;

pub use case::{default_validation, InputValue, TestCase, Validation, Validator};
pub use diagnoser::{Diagnoser, RunSummary, ScenarioReport, Selection};
pub use engine::ExecutionEngine;
pub use logger::ResultLogger;
pub use outcome::{ActionOutcome, ExecutionRecord, FailureKind, FailureRecord, Verdict};
pub use registry::{DiscoveryFailure, ScenarioModule, ScenarioRegistry};
pub use sandbox::{FixtureEntry, FixtureSpec, Sandbox};
