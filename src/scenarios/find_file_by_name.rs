//! Diagnostic for the "find file by name" action

use std::path::Path;

use serde_json::{json, Value};

use super::{string_list, success_payload};
use crate::common::Result;
use crate::harness::{FixtureSpec, TestCase, Validation};

pub(crate) fn test_case() -> Result<TestCase> {
    Ok(TestCase::new("find file by name")
        .fixture(
            FixtureSpec::new()
                .text("project/report.md", "Contents for report.md\n")
                .text("project/summary.txt", "Contents for summary.txt\n")
                .text(
                    "project/notes/report_final.md",
                    "Contents for report_final.md\n",
                ),
        )
        .sandbox_input("path", "project")
        .input("query", json!("report"))
        .validator(|outcome, input| {
            let payload = match success_payload(outcome) {
                Ok(payload) => payload,
                Err(failed) => return failed,
            };
            let Some(base) = input.get("path").and_then(Value::as_str) else {
                return Validation::Fail("Input snapshot is missing 'path'.".to_string());
            };
            let Some(mut matches) = string_list(payload, "matches") else {
                return Validation::Fail("Output is missing the 'matches' list.".to_string());
            };
            matches.sort();

            let mut expected: Vec<String> = ["notes/report_final.md", "report.md"]
                .iter()
                .map(|rel| Path::new(base).join(rel).display().to_string())
                .collect();
            expected.sort();

            if matches != expected {
                return Validation::Fail(format!(
                    "Match mismatch. expected={expected:?} actual={matches:?}"
                ));
            }
            if let Some(missing) = matches.iter().find(|m| !Path::new(m).is_file()) {
                return Validation::Fail(format!("Reported match does not exist: {missing}"));
            }
            Validation::Pass("Name query located the expected files.".to_string())
        }))
}
