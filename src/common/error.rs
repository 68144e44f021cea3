//! Error types for the action diagnostic harness
//!
//! Error messages are designed to be clear and actionable, with hints on how
//! to resolve common issues.

use std::io;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the harness
#[derive(Error, Debug)]
pub enum Error {
    // === Discovery Errors ===
    #[error("Duplicate scenario registered for action '{0}'. Each action identifier may carry exactly one scenario")]
    DuplicateScenario(String),

    #[error("No diagnostic scenario registered for action '{0}'. Run 'action-diag --list' to see what is available")]
    ScenarioNotFound(String),

    // === Catalog Errors ===
    #[error("Actions file not found: {0}. Pass --actions-file or create it in the working directory")]
    CatalogMissing(String),

    #[error("Failed to parse actions file '{path}': {error}")]
    CatalogParse { path: String, error: String },

    #[error("Action command '{command}' for '{action}' was not found on PATH")]
    ActionCommandNotFound { action: String, command: String },

    // === Fixture Errors ===
    #[error("Fixture path '{0}' must be relative to the sandbox root and must not contain '..'")]
    FixturePath(String),

    #[error("Failed to materialize fixture entry '{path}': {error}")]
    Fixture { path: String, error: String },

    #[error("Failed to create sandbox for action '{action}': {error}")]
    SandboxCreate { action: String, error: String },

    // === Configuration Errors ===
    #[error("Invalid configuration file: {0}")]
    ConfigParse(String),

    // === Artifact Errors ===
    #[error("Failed to write result artifact '{path}': {error}")]
    ArtifactWrite { path: String, error: String },

    // === IO Errors ===
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to read file '{path}': {error}")]
    FileRead { path: String, error: String },

    // === Serialization Errors ===
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // === Internal Errors ===
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create a catalog parse error
    pub fn catalog_parse(path: &str, error: &str) -> Self {
        Self::CatalogParse {
            path: path.to_string(),
            error: error.to_string(),
        }
    }

    /// Create a fixture materialization error
    pub fn fixture(path: &str, error: &str) -> Self {
        Self::Fixture {
            path: path.to_string(),
            error: error.to_string(),
        }
    }

    /// Create a sandbox creation error
    pub fn sandbox_create(action: &str, error: &str) -> Self {
        Self::SandboxCreate {
            action: action.to_string(),
            error: error.to_string(),
        }
    }

    /// Create a file read error
    pub fn file_read(path: &str, error: &str) -> Self {
        Self::FileRead {
            path: path.to_string(),
            error: error.to_string(),
        }
    }

    /// Create an artifact write error
    pub fn artifact_write(path: &str, error: &str) -> Self {
        Self::ArtifactWrite {
            path: path.to_string(),
            error: error.to_string(),
        }
    }
}
