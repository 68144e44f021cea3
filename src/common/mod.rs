//! Common utilities shared across the harness

pub mod config;
pub mod error;
pub mod logging;
pub mod paths;

pub use error::{Error, Result};

/// Reduce an action identifier to a filesystem-friendly slug.
///
/// Runs of characters outside `[A-Za-z0-9._-]` collapse into a single `-`,
/// leading and trailing dashes are stripped, and the result is lowercased.
/// An identifier with nothing usable falls back to `"action"`.
pub fn slugify(value: &str) -> String {
    let mut slug = String::with_capacity(value.len());
    let mut pending_dash = false;
    for ch in value.chars() {
        if ch.is_ascii_alphanumeric() || matches!(ch, '.' | '_') {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(ch.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }
    if slug.is_empty() {
        "action".to_string()
    } else {
        slug
    }
}
