//! Diagnostic for the "replace file str" action

use std::fs;

use serde_json::{json, Value};

use super::success_payload;
use crate::common::Result;
use crate::harness::{FixtureSpec, TestCase, Validation};

const ORIGINAL: &str = "Alpha beta ALPHA";
const REPLACED: &str = "omega beta omega";

pub(crate) fn test_case() -> Result<TestCase> {
    Ok(TestCase::new("replace file str")
        .fixture(FixtureSpec::new().text("notes/summary.txt", ORIGINAL))
        .sandbox_input("file_path", "notes/summary.txt")
        .input("search", json!("alpha"))
        .input("replace", json!("omega"))
        .input("ignore_case", json!(true))
        .validator(|outcome, input| {
            let payload = match success_payload(outcome) {
                Ok(payload) => payload,
                Err(failed) => return failed,
            };
            let replacements = payload.get("replacements").and_then(Value::as_i64);
            if replacements != Some(2) {
                return Validation::Fail(format!(
                    "Expected 2 replacements, got {replacements:?}"
                ));
            }
            let note = payload.get("message").and_then(Value::as_str).unwrap_or("");
            if !note.is_empty() {
                return Validation::Fail(format!(
                    "Message should be empty when replacements occur, got {note:?}"
                ));
            }
            let Some(file_path) = input.get("file_path").and_then(Value::as_str) else {
                return Validation::Fail("Input snapshot is missing 'file_path'.".to_string());
            };
            match fs::read_to_string(file_path) {
                Ok(contents) if contents == REPLACED => {
                    Validation::Pass("File substitutions applied successfully.".to_string())
                }
                Ok(contents) => Validation::Fail(format!(
                    "File contents mismatch. expected={REPLACED:?} actual={contents:?}"
                )),
                Err(e) => Validation::Fail(format!("Could not read modified file: {e}")),
            }
        }))
}
