//! Diagnostic for the "move or rename folder" action

use std::fs;
use std::path::Path;

use serde_json::Value;

use super::success_payload;
use crate::common::Result;
use crate::harness::{FixtureSpec, TestCase, Validation};

pub(crate) fn test_case() -> Result<TestCase> {
    Ok(TestCase::new("move or rename folder")
        .fixture(FixtureSpec::new().text("workspace/alpha/notes.txt", "draft"))
        .sandbox_input("source", "workspace/alpha")
        .sandbox_input("target", "workspace/archive/alpha_2024")
        .validator(|outcome, input| {
            let payload = match success_payload(outcome) {
                Ok(payload) => payload,
                Err(failed) => return failed,
            };
            let (Some(source), Some(target)) = (
                input.get("source").and_then(Value::as_str),
                input.get("target").and_then(Value::as_str),
            ) else {
                return Validation::Fail(
                    "Input snapshot is missing 'source' or 'target'.".to_string(),
                );
            };

            let old_path = payload.get("old_path").and_then(Value::as_str).unwrap_or("");
            let new_path = payload.get("new_path").and_then(Value::as_str).unwrap_or("");
            if old_path != source || new_path != target {
                return Validation::Fail(format!(
                    "Reported paths mismatch. old={old_path} new={new_path}"
                ));
            }
            if Path::new(source).exists() {
                return Validation::Fail("Source directory still exists.".to_string());
            }

            let entries = match fs::read_dir(target) {
                Ok(entries) => entries,
                Err(e) => return Validation::Fail(format!("Target is not readable: {e}")),
            };
            let mut names: Vec<String> = Vec::new();
            for entry in entries {
                match entry {
                    Ok(entry) => names.push(entry.file_name().to_string_lossy().into_owned()),
                    Err(e) => return Validation::Fail(format!("Target is not readable: {e}")),
                }
            }
            names.sort();
            if names != ["notes.txt"] {
                return Validation::Fail(format!(
                    "Target has unexpected contents: {names:?}"
                ));
            }
            match fs::read_to_string(Path::new(target).join("notes.txt")) {
                Ok(contents) if contents == "draft" => {
                    Validation::Pass("Folder moved successfully.".to_string())
                }
                Ok(contents) => Validation::Fail(format!(
                    "Moved file contents mismatch: {contents:?}"
                )),
                Err(e) => Validation::Fail(format!("Could not read moved file: {e}")),
            }
        }))
}
