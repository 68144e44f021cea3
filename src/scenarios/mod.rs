//! Shipped diagnostic scenarios, one module per action
//!
//! Each module exposes a `test_case` factory; [`modules`] is the explicit
//! manifest the registry loads. Adding a diagnostic means adding a module
//! and one manifest line.

pub mod add_number;
pub mod create_folder;
pub mod create_text_file;
pub mod delete_folder;
pub mod find_file_by_name;
pub mod find_in_file_content;
pub mod get_current_time;
pub mod ignore;
pub mod list_folder;
pub mod move_or_rename_folder;
pub mod read_pdf_file;
pub mod replace_file_str;
pub mod send_message;

use serde_json::{Map, Value};

use crate::harness::{ActionOutcome, ScenarioModule, Validation};

static MODULES: &[ScenarioModule] = &[
    ScenarioModule { name: "add_number", build: add_number::test_case },
    ScenarioModule { name: "create_folder", build: create_folder::test_case },
    ScenarioModule { name: "create_text_file", build: create_text_file::test_case },
    ScenarioModule { name: "delete_folder", build: delete_folder::test_case },
    ScenarioModule { name: "find_file_by_name", build: find_file_by_name::test_case },
    ScenarioModule { name: "find_in_file_content", build: find_in_file_content::test_case },
    ScenarioModule { name: "get_current_time", build: get_current_time::test_case },
    ScenarioModule { name: "ignore", build: ignore::test_case },
    ScenarioModule { name: "list_folder", build: list_folder::test_case },
    ScenarioModule { name: "move_or_rename_folder", build: move_or_rename_folder::test_case },
    ScenarioModule { name: "read_pdf_file", build: read_pdf_file::test_case },
    ScenarioModule { name: "replace_file_str", build: replace_file_str::test_case },
    ScenarioModule { name: "send_message", build: send_message::test_case },
];

/// Every scenario module shipped with the harness
pub fn modules() -> &'static [ScenarioModule] {
    MODULES
}

/// Shared first step for most validators: the parsed output must be a JSON
/// object reporting `"status": "success"`.
pub(crate) fn success_payload(
    outcome: &ActionOutcome,
) -> std::result::Result<&Map<String, Value>, Validation> {
    let Some(payload) = outcome.parsed.as_ref().and_then(Value::as_object) else {
        return Err(Validation::Fail("Expected JSON object output.".to_string()));
    };
    if payload.get("status").and_then(Value::as_str) != Some("success") {
        let detail = payload
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or("no message provided");
        return Err(Validation::Fail(format!(
            "Action reported failure: {detail}"
        )));
    }
    Ok(payload)
}

/// Collect a payload field as a list of strings
pub(crate) fn string_list(payload: &Map<String, Value>, key: &str) -> Option<Vec<String>> {
    payload.get(key)?.as_array().map(|items| {
        items
            .iter()
            .map(|item| item.as_str().unwrap_or_default().to_string())
            .collect()
    })
}
