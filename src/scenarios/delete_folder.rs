//! Diagnostic for the "delete folder" action

use std::path::Path;

use serde_json::Value;

use super::success_payload;
use crate::common::Result;
use crate::harness::{FixtureSpec, TestCase, Validation};

pub(crate) fn test_case() -> Result<TestCase> {
    Ok(TestCase::new("delete folder")
        .fixture(
            FixtureSpec::new()
                .dir("to_remove/nested")
                .text("to_remove/nested/marker.txt", "remove me"),
        )
        .sandbox_input("path", "to_remove")
        .validator(|outcome, input| {
            let payload = match success_payload(outcome) {
                Ok(payload) => payload,
                Err(failed) => return failed,
            };
            let Some(target) = input.get("path").and_then(Value::as_str) else {
                return Validation::Fail("Input snapshot is missing 'path'.".to_string());
            };
            let deleted = payload.get("deleted").and_then(Value::as_str).unwrap_or("");
            if deleted != target {
                return Validation::Fail(format!(
                    "Deleted path mismatch. expected={target} actual={deleted}"
                ));
            }
            if Path::new(target).exists() {
                return Validation::Fail("Directory still exists after deletion.".to_string());
            }
            Validation::Pass("Folder deleted successfully.".to_string())
        }))
}
