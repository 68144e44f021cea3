//! Best-effort recovery of structured payloads from raw action output
//!
//! Actions print human-oriented text around their JSON more often than not:
//! progress lines, ANSI color codes, trailing notes. Decoding strips the
//! escapes, tries the whole output, and falls back to the widest slice that
//! looks like a JSON document.

use std::sync::OnceLock;

use regex::Regex;
use serde_json::{Map, Value};

fn ansi_pattern() -> &'static Regex {
    static ANSI: OnceLock<Regex> = OnceLock::new();
    ANSI.get_or_init(|| {
        Regex::new(r"\x1B\[[0-?]*[ -/]*[@-~]").expect("ANSI escape pattern is valid")
    })
}

/// Decode `raw` into a JSON value.
///
/// Empty output decodes to an empty object. Output that contains no JSON at
/// all is a decode error; callers record the error and keep the raw text.
pub fn parse_output(raw: &str) -> serde_json::Result<Value> {
    let cleaned = ansi_pattern().replace_all(raw, "");
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        return Ok(Value::Object(Map::new()));
    }

    match serde_json::from_str(cleaned) {
        Ok(value) => Ok(value),
        Err(whole_err) => {
            let start = [cleaned.find('{'), cleaned.find('[')]
                .into_iter()
                .flatten()
                .min();
            let end = [cleaned.rfind('}'), cleaned.rfind(']')]
                .into_iter()
                .flatten()
                .max();
            match (start, end) {
                (Some(start), Some(end)) if start <= end => {
                    serde_json::from_str(&cleaned[start..=end])
                }
                _ => Err(whole_err),
            }
        }
    }
}
