//! Default filesystem locations used by the harness
//!
//! Everything resolves against the working directory so a checkout carries
//! its own catalog, configuration, and result artifacts.

use std::path::PathBuf;

/// Default action catalog filename
pub const ACTIONS_FILE: &str = "agent.agent_actions.json";

/// Default directory for per-scenario result artifacts
pub const LOG_DIR: &str = "logs/actions";

/// Optional configuration file read from the working directory
pub const CONFIG_FILE: &str = "action-diag.toml";

/// Get the default path of the action catalog
pub fn default_actions_file() -> PathBuf {
    PathBuf::from(ACTIONS_FILE)
}

/// Get the default directory for result artifacts
pub fn default_log_dir() -> PathBuf {
    PathBuf::from(LOG_DIR)
}

/// Get the path to the configuration file
pub fn config_path() -> PathBuf {
    PathBuf::from(CONFIG_FILE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_relative() {
        assert!(default_actions_file().is_relative());
        assert!(default_log_dir().is_relative());
        assert!(config_path().is_relative());
    }

    #[test]
    fn test_log_dir_nests_under_logs() {
        assert!(default_log_dir().starts_with("logs"));
    }
}
