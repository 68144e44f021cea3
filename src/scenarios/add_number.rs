//! Diagnostic for the "add number" action

use serde_json::{json, Value};

use crate::common::Result;
use crate::harness::{TestCase, Validation};

pub(crate) fn test_case() -> Result<TestCase> {
    Ok(TestCase::new("add number")
        .input("a", json!(7))
        .input("b", json!(5))
        .validator(|outcome, _input| {
            let Some(payload) = outcome.parsed.as_ref().and_then(Value::as_object) else {
                return Validation::Fail("Output must be a JSON object.".to_string());
            };
            let Some(result) = payload.get("result") else {
                return Validation::Fail("Missing 'result' key in output.".to_string());
            };
            if result.as_i64() != Some(12) {
                return Validation::Fail(format!("Expected result 12, got {result}"));
            }
            Validation::Pass("Numbers were added correctly.".to_string())
        }))
}
