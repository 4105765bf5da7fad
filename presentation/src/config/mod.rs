//! Presentation-level configuration
//!
//! Configuration for output formatting and the chat REPL.

use crate::cli::commands::OutputFormat;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Output configuration for the presentation layer
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
    /// Enable colored terminal output
    pub color: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Text,
            color: true,
        }
    }
}

/// Chat REPL configuration for the presentation layer
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReplConfig {
    /// Show a spinner while waiting for replies
    pub show_progress: bool,
    /// Input history file; `None` keeps history in memory only
    pub history_file: Option<PathBuf>,
    /// Prompt label shown before input
    pub prompt: String,
}

impl Default for ReplConfig {
    fn default() -> Self {
        Self {
            show_progress: true,
            history_file: dirs::data_dir().map(|p| p.join("tripscout").join("history.txt")),
            prompt: "you".to_string(),
        }
    }
}

impl ReplConfig {
    /// Expand a leading `~/` against the home directory
    pub fn expand_path(path: &str) -> PathBuf {
        match (path.strip_prefix("~/"), dirs::home_dir()) {
            (Some(rest), Some(home)) => home.join(rest),
            _ => PathBuf::from(path),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_plain_path() {
        assert_eq!(
            ReplConfig::expand_path("/tmp/history.txt"),
            PathBuf::from("/tmp/history.txt")
        );
    }

    #[test]
    fn test_expand_home_path() {
        if let Some(home) = dirs::home_dir() {
            assert_eq!(
                ReplConfig::expand_path("~/.tripscout_history"),
                home.join(".tripscout_history")
            );
        }
    }
}
