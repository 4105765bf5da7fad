//! Chat REPL configuration from TOML (`[repl]` section)

use serde::{Deserialize, Serialize};

/// Raw chat REPL configuration from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileReplConfig {
    /// Show a spinner while the assistant is replying
    pub show_progress: bool,
    /// File to persist line-editor input history, if any
    pub history_file: Option<String>,
    /// Prompt shown before each input line
    pub prompt: String,
}

impl Default for FileReplConfig {
    fn default() -> Self {
        Self {
            show_progress: true,
            history_file: None,
            prompt: "you".to_string(),
        }
    }
}
