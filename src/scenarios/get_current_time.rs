//! Diagnostic for the "get current time" action

use chrono::NaiveDateTime;
use serde_json::Value;

use crate::common::Result;
use crate::harness::{TestCase, Validation};

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub(crate) fn test_case() -> Result<TestCase> {
    Ok(TestCase::new("get current time").validator(|outcome, _input| {
        let Some(payload) = outcome.parsed.as_ref().and_then(Value::as_object) else {
            return Validation::Fail("Output must be a JSON object.".to_string());
        };
        let Some(time) = payload.get("time").and_then(Value::as_str) else {
            return Validation::Fail("Missing 'time' key in output.".to_string());
        };
        if NaiveDateTime::parse_from_str(time, TIME_FORMAT).is_err() {
            return Validation::Fail(format!(
                "Timestamp {time:?} is not in the {TIME_FORMAT} format"
            ));
        }
        Validation::Pass("Current time has the expected format.".to_string())
    }))
}
