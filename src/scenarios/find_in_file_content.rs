//! Diagnostic for the "find in file content" action

use serde_json::json;

use super::{string_list, success_payload};
use crate::common::Result;
use crate::harness::{FixtureSpec, TestCase, Validation};

const LOG_LINES: &str = "Startup complete\n\
                         ERROR: disk full\n\
                         warning: low memory\n\
                         Another Error occurred\n";

pub(crate) fn test_case() -> Result<TestCase> {
    Ok(TestCase::new("find in file content")
        .fixture(FixtureSpec::new().text("log.txt", LOG_LINES))
        .sandbox_input("file_path", "log.txt")
        .input("pattern", json!("error"))
        .input("ignore_case", json!(true))
        .validator(|outcome, _input| {
            let payload = match success_payload(outcome) {
                Ok(payload) => payload,
                Err(failed) => return failed,
            };
            let Some(matches) = string_list(payload, "matches") else {
                return Validation::Fail("Output is missing the 'matches' list.".to_string());
            };
            let expected = [
                "Line 2: ERROR: disk full",
                "Line 4: Another Error occurred",
            ];
            if matches != expected {
                return Validation::Fail(format!(
                    "Match mismatch. expected={expected:?} actual={matches:?}"
                ));
            }
            Validation::Pass("Pattern search returned the expected lines.".to_string())
        }))
}
