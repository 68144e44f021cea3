//! Diagnostic for the "create folder" action

use std::path::Path;

use serde_json::{json, Value};

use super::success_payload;
use crate::common::Result;
use crate::harness::{TestCase, Validation};

const FOLDER_NAME: &str = "workspace";

pub(crate) fn test_case() -> Result<TestCase> {
    Ok(TestCase::new("create folder")
        .sandbox_input("path", ".")
        .input("folder_name", json!(FOLDER_NAME))
        .validator(|outcome, input| {
            let payload = match success_payload(outcome) {
                Ok(payload) => payload,
                Err(failed) => return failed,
            };
            let Some(base) = input.get("path").and_then(Value::as_str) else {
                return Validation::Fail("Input snapshot is missing 'path'.".to_string());
            };
            let expected = Path::new(base).join(FOLDER_NAME);
            let expected_str = expected.display().to_string();

            let reported = payload.get("path").and_then(Value::as_str).unwrap_or("");
            if reported != expected_str {
                return Validation::Fail(format!(
                    "Path mismatch. expected={expected_str} actual={reported}"
                ));
            }
            if !expected.is_dir() {
                return Validation::Fail("Folder was not created on disk.".to_string());
            }
            Validation::Pass("Folder created successfully.".to_string())
        }))
}
