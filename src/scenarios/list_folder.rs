//! Diagnostic for the "list folder" action

use serde_json::json;

use super::{string_list, success_payload};
use crate::common::Result;
use crate::harness::{FixtureSpec, TestCase, Validation};

const EXPECTED: [&str; 2] = ["a.txt", "b.txt"];

pub(crate) fn test_case() -> Result<TestCase> {
    Ok(TestCase::new("list folder")
        .fixture(
            FixtureSpec::new()
                .text("a.txt", "alpha contents\n")
                .text("b.txt", "beta contents\n"),
        )
        // The action runs with the sandbox as its working directory, so "."
        // is the seeded folder itself.
        .input("path", json!("."))
        .validator(|outcome, _input| {
            let payload = match success_payload(outcome) {
                Ok(payload) => payload,
                Err(failed) => return failed,
            };
            let Some(mut contents) = string_list(payload, "contents") else {
                return Validation::Fail("Output is missing the 'contents' list.".to_string());
            };
            contents.sort();
            if contents != EXPECTED {
                return Validation::Fail(format!(
                    "Contents mismatch. expected={EXPECTED:?} actual={contents:?}"
                ));
            }
            Validation::Pass("Directory contents match expectation.".to_string())
        }))
}
