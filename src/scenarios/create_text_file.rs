//! Diagnostic for the "create text file" action

use std::fs;
use std::path::Path;

use serde_json::{json, Value};

use super::success_payload;
use crate::common::Result;
use crate::harness::{TestCase, Validation};

const FILE_CONTENT: &str = "Diagnostic text file contents.";

pub(crate) fn test_case() -> Result<TestCase> {
    Ok(TestCase::new("create text file")
        .sandbox_input("file_path", "note.txt")
        .input("file_content", json!(FILE_CONTENT))
        .validator(|outcome, input| {
            let payload = match success_payload(outcome) {
                Ok(payload) => payload,
                Err(failed) => return failed,
            };
            let Some(file_path) = input.get("file_path").and_then(Value::as_str) else {
                return Validation::Fail("Input snapshot is missing 'file_path'.".to_string());
            };
            let reported = payload.get("path").and_then(Value::as_str).unwrap_or("");
            if reported != file_path {
                return Validation::Fail(format!(
                    "Path mismatch. expected={file_path} actual={reported}"
                ));
            }
            if !Path::new(file_path).is_file() {
                return Validation::Fail("File was not created on disk.".to_string());
            }
            match fs::read_to_string(file_path) {
                Ok(contents) if contents == FILE_CONTENT => {
                    Validation::Pass("Text file created with expected content.".to_string())
                }
                Ok(contents) => Validation::Fail(format!(
                    "Content mismatch. expected={FILE_CONTENT:?} actual={contents:?}"
                )),
                Err(e) => Validation::Fail(format!("Could not read created file: {e}")),
            }
        }))
}
