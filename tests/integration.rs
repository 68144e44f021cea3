//! End-to-end integration tests for the action diagnostic harness
//!
//! These tests drive the real binaries: a catalog file is written into a
//! per-test working directory, the `mock_action` binary plays the part of
//! the provisioned action implementations, and `action-diag` runs against
//! them exactly as it would in the field.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use serde_json::{json, Value};

use action_diag::harness::ScenarioModule;
use action_diag::{
    ActionCatalog, Diagnoser, ExecutionEngine, FixtureSpec, ResultLogger, ScenarioRegistry,
    Selection, TestCase, Validation, Verdict,
};

/// Actions the mock binary implements end to end
const IMPLEMENTED_ACTIONS: [&str; 11] = [
    "add number",
    "create folder",
    "create text file",
    "delete folder",
    "find file by name",
    "find in file content",
    "get current time",
    "list folder",
    "move or rename folder",
    "read pdf file",
    "replace file str",
];

/// Test context with a private working directory per test
struct TestContext {
    temp_dir: PathBuf,
}

impl TestContext {
    fn new(test_name: &str) -> Self {
        let temp_dir = env::temp_dir().join("action-diag-tests").join(test_name);

        // Clean up any previous test artifacts
        let _ = fs::remove_dir_all(&temp_dir);
        fs::create_dir_all(&temp_dir).expect("Failed to create temp dir");

        Self { temp_dir }
    }

    /// Write a catalog mapping each action name to a mock behavior
    fn write_catalog_at(&self, file_name: &str, entries: &[(&str, &str)]) -> PathBuf {
        let mock_bin = env!("CARGO_BIN_EXE_mock_action");
        let entries: Vec<Value> = entries
            .iter()
            .map(|(action, behavior)| {
                json!({
                    "name": action,
                    "command": mock_bin,
                    "args": [behavior],
                    "description": format!("mock implementation of '{action}'"),
                })
            })
            .collect();

        let path = self.temp_dir.join(file_name);
        fs::write(&path, serde_json::to_string_pretty(&entries).unwrap())
            .expect("Failed to write catalog");
        path
    }

    /// Write the default-named catalog with identity mock behaviors
    fn write_catalog(&self, actions: &[&str]) -> PathBuf {
        let pairs: Vec<(&str, &str)> = actions.iter().map(|a| (*a, *a)).collect();
        self.write_catalog_at("agent.agent_actions.json", &pairs)
    }

    /// Run action-diag with the test directory as working directory
    fn run(&self, args: &[&str]) -> HarnessOutput {
        let output = Command::new(env!("CARGO_BIN_EXE_action-diag"))
            .args(args)
            .current_dir(&self.temp_dir)
            .output()
            .expect("Failed to run action-diag");

        HarnessOutput {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            code: output.status.code(),
        }
    }

    /// Artifacts in a log directory, sorted by filename
    fn artifacts(&self, log_dir: &str) -> Vec<PathBuf> {
        let dir = self.temp_dir.join(log_dir);
        let Ok(entries) = fs::read_dir(&dir) else {
            return Vec::new();
        };
        let mut paths: Vec<PathBuf> = entries.map(|e| e.unwrap().path()).collect();
        paths.sort();
        paths
    }

    fn read_artifact(&self, path: &Path) -> Value {
        serde_json::from_str(&fs::read_to_string(path).expect("Failed to read artifact"))
            .expect("Artifact is not valid JSON")
    }
}

impl Drop for TestContext {
    fn drop(&mut self) {
        // By default, preserve artifacts for debugging test failures
        // Set PRESERVE_ACTION_DIAG_TEST_ARTIFACTS=0 (or "false"/"no") to clean up
        let preserve = env::var("PRESERVE_ACTION_DIAG_TEST_ARTIFACTS")
            .unwrap_or_else(|_| "1".to_string())
            .to_ascii_lowercase();

        if preserve == "0" || preserve == "false" || preserve == "no" {
            let _ = fs::remove_dir_all(&self.temp_dir);
        }
    }
}

/// Output from an action-diag invocation
#[derive(Debug)]
struct HarnessOutput {
    stdout: String,
    stderr: String,
    code: Option<i32>,
}

#[test]
fn list_shows_available_scenarios() {
    let ctx = TestContext::new("list_shows_available_scenarios");

    // Listing needs no catalog file
    let output = ctx.run(&["--list"]);
    assert_eq!(output.code, Some(0), "stderr: {}", output.stderr);
    assert!(output.stdout.contains("Available diagnostic scenarios:"));
    for action in IMPLEMENTED_ACTIONS {
        assert!(
            output.stdout.contains(&format!(" - {action}")),
            "missing '{action}' in:\n{}",
            output.stdout
        );
    }
    assert!(output.stdout.contains(" - send message"));
    assert!(output.stdout.contains(" - ignore"));
}

#[test]
fn listed_names_are_accepted_for_selection() {
    let ctx = TestContext::new("listed_names_are_accepted_for_selection");
    ctx.write_catalog(&IMPLEMENTED_ACTIONS);

    let listing = ctx.run(&["--list"]);
    let names: Vec<&str> = listing
        .stdout
        .lines()
        .filter_map(|line| line.strip_prefix(" - "))
        .collect();
    assert!(!names.is_empty());

    let mut args = Vec::new();
    for name in &names {
        args.push("--action");
        args.push(*name);
    }
    let output = ctx.run(&args);
    assert_eq!(output.code, Some(0), "stderr: {}", output.stderr);
    for name in &names {
        assert!(
            output.stdout.contains(&format!(" {name}: ")),
            "no summary line for '{name}' in:\n{}",
            output.stdout
        );
    }
    assert!(!output.stderr.contains("Error:"));
}

#[test]
fn list_folder_scenario_passes_and_records_an_artifact() {
    let ctx = TestContext::new("list_folder_scenario_passes");
    ctx.write_catalog(&["list folder"]);

    let output = ctx.run(&["--action", "list folder"]);
    assert_eq!(output.code, Some(0), "stderr: {}", output.stderr);
    assert!(output.stdout.contains("Diagnostic summary:"));
    assert!(
        output.stdout.contains("list folder: pass - Directory contents match expectation."),
        "unexpected summary:\n{}",
        output.stdout
    );

    let artifacts = ctx.artifacts("logs/actions");
    assert_eq!(artifacts.len(), 1);
    let name = artifacts[0].file_name().unwrap().to_string_lossy().into_owned();
    assert!(name.ends_with("_list-folder.log.json"), "got {name}");

    let record = ctx.read_artifact(&artifacts[0]);
    assert_eq!(record["action"], "list folder");
    assert_eq!(record["verdict"], "pass");
    assert_eq!(record["input"]["path"], ".");
    assert_eq!(record["parsed"]["contents"], json!(["a.txt", "b.txt"]));
    assert!(record["raw_output"].as_str().unwrap().contains("a.txt"));
    assert!(record.get("parse_error").is_none());
}

#[test]
fn all_scenarios_run_with_defaults() {
    let ctx = TestContext::new("all_scenarios_run_with_defaults");
    ctx.write_catalog(&IMPLEMENTED_ACTIONS);

    let output = ctx.run(&["--all"]);
    assert_eq!(output.code, Some(0), "stderr: {}\nstdout: {}", output.stderr, output.stdout);
    assert!(
        output.stdout.contains("11 passed, 0 failed, 2 skipped"),
        "unexpected totals:\n{}",
        output.stdout
    );

    // One artifact per scenario, skips included
    assert_eq!(ctx.artifacts("logs/actions").len(), 13);
}

#[test]
fn failing_action_sets_the_exit_code_and_the_batch_continues() {
    let ctx = TestContext::new("failing_action_sets_the_exit_code");
    ctx.write_catalog_at(
        "agent.agent_actions.json",
        &[("add number", "always fail"), ("get current time", "get current time")],
    );

    let output = ctx.run(&["--action", "add number", "--action", "get current time"]);
    assert_eq!(output.code, Some(1));
    assert!(output.stdout.contains("add number: fail"));
    assert!(output.stdout.contains("get current time: pass"));
    assert!(output.stdout.contains("1 passed, 1 failed, 0 skipped"));

    let failed = ctx
        .artifacts("logs/actions")
        .into_iter()
        .find(|p| p.to_string_lossy().contains("add-number"))
        .expect("no artifact for the failing action");
    let record = ctx.read_artifact(&failed);
    assert_eq!(record["verdict"], "fail");
    assert_eq!(record["failure"]["kind"], "exit");
    assert!(record["failure"]["context"]
        .as_str()
        .unwrap()
        .contains("forced failure"));
}

#[test]
fn unknown_action_reports_a_skip() {
    let ctx = TestContext::new("unknown_action_reports_a_skip");
    ctx.write_catalog(&["list folder"]);

    let output = ctx.run(&["--action", "totally unknown action"]);
    assert_eq!(output.code, Some(0));
    assert!(output.stdout.contains(
        "totally unknown action: skip - No environment script implemented for this action."
    ));
}

#[test]
fn declared_skip_wins_over_a_missing_implementation() {
    let ctx = TestContext::new("declared_skip_wins");
    // "send message" is deliberately absent from the catalog; the declared
    // reason must still be the one reported.
    ctx.write_catalog(&["list folder"]);

    let output = ctx.run(&["--action", "send message"]);
    assert_eq!(output.code, Some(0));
    assert!(output.stdout.contains("send message: skip - Requires the host conversation service"));
    assert!(!output.stdout.contains("Action implementation not found."));
}

#[test]
fn missing_catalog_is_an_error() {
    let ctx = TestContext::new("missing_catalog_is_an_error");

    let output = ctx.run(&["--all"]);
    assert_eq!(output.code, Some(1));
    assert!(output.stderr.contains("Error:"), "stderr: {}", output.stderr);
    assert!(output.stderr.contains("Actions file not found"));
    assert!(ctx.artifacts("logs/actions").is_empty());
}

#[test]
fn config_file_sets_defaults_and_flags_override_it() {
    let ctx = TestContext::new("config_file_sets_defaults");
    ctx.write_catalog_at("acts.json", &[("add number", "add number")]);
    fs::write(
        ctx.temp_dir.join("action-diag.toml"),
        "actions_file = \"acts.json\"\nlog_dir = \"custom_logs\"\n",
    )
    .unwrap();

    let output = ctx.run(&["--action", "add number"]);
    assert_eq!(output.code, Some(0), "stderr: {}", output.stderr);
    assert_eq!(ctx.artifacts("custom_logs").len(), 1);

    let output = ctx.run(&["--action", "add number", "--log-dir", "flag_logs"]);
    assert_eq!(output.code, Some(0), "stderr: {}", output.stderr);
    assert_eq!(ctx.artifacts("flag_logs").len(), 1);
    assert_eq!(ctx.artifacts("custom_logs").len(), 1);
}

#[test]
fn repeated_runs_get_independent_sandboxes() {
    let ctx = TestContext::new("repeated_runs_get_independent_sandboxes");
    ctx.write_catalog(&["delete folder"]);

    // "delete folder" destroys its seeded directory; a second run can only
    // pass if it starts from a fresh sandbox.
    let output = ctx.run(&["--action", "delete folder", "--action", "delete folder"]);
    assert_eq!(output.code, Some(0), "stdout: {}", output.stdout);
    assert!(output.stdout.contains("2 passed, 0 failed, 0 skipped"));
}

fn corrupted_pdf_case() -> action_diag::Result<TestCase> {
    Ok(TestCase::new("read pdf file")
        .fixture(FixtureSpec::new().text("sample.pdf", "plain text, not a PDF"))
        .sandbox_input("file_path", "sample.pdf"))
}

fn add_number_case() -> action_diag::Result<TestCase> {
    Ok(TestCase::new("add number")
        .input("a", json!(7))
        .input("b", json!(5)))
}

#[test]
fn corrupted_pdf_reports_a_decode_failure_and_the_run_continues() {
    let ctx = TestContext::new("corrupted_pdf_reports_a_decode_failure");
    let catalog_path = ctx.write_catalog_at(
        "acts.json",
        &[("read pdf file", "read pdf file"), ("add number", "add number")],
    );

    let registry = ScenarioRegistry::from_modules(&[
        ScenarioModule { name: "corrupted_pdf", build: corrupted_pdf_case },
        ScenarioModule { name: "add_number", build: add_number_case },
    ])
    .unwrap();
    let catalog = ActionCatalog::load(&catalog_path).unwrap();
    let logger = ResultLogger::new(ctx.temp_dir.join("lib_logs"));
    let diagnoser = Diagnoser::new(&registry, &catalog, logger);

    let summary = diagnoser.run(&Selection::Actions(vec![
        "read pdf file".to_string(),
        "add number".to_string(),
    ]));

    assert_eq!(summary.failed(), 1);
    assert_eq!(summary.passed(), 1);
    assert_eq!(summary.reports[0].verdict, Verdict::Fail);
    assert_eq!(summary.reports[1].verdict, Verdict::Pass);

    let artifact = summary.reports[0].artifact.as_ref().unwrap();
    let record = ctx.read_artifact(artifact);
    assert_eq!(record["failure"]["kind"], "exit");
    assert!(record["failure"]["context"]
        .as_str()
        .unwrap()
        .contains("decode error"));
}

#[test]
fn unparsable_output_leaves_the_verdict_to_the_validator() {
    let ctx = TestContext::new("unparsable_output_leaves_the_verdict");
    let catalog_path =
        ctx.write_catalog_at("acts.json", &[("garbage output", "garbage output")]);
    let catalog = ActionCatalog::load(&catalog_path).unwrap();

    let case = TestCase::new("garbage output").validator(|outcome, _input| {
        if outcome.parse_error.is_some() && outcome.raw_output.contains("just words") {
            Validation::Pass("raw output was captured".to_string())
        } else {
            Validation::Fail(format!("unexpected outcome: {:?}", outcome.raw_output))
        }
    });

    let record = ExecutionEngine::new(&catalog).run(&case);
    assert_eq!(record.verdict, Verdict::Pass);
    assert!(record.outcome.parse_error.is_some());
    assert_eq!(record.outcome.parsed, None);
}
