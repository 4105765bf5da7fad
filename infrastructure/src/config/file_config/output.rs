//! Output configuration from TOML (`[output]` section)

use serde::{Deserialize, Serialize};

/// Output formats understood by the presentation layer
pub const OUTPUT_FORMATS: &[&str] = &["text", "json"];

/// Raw output configuration from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOutputConfig {
    /// Output format: "text" or "json"
    pub format: Option<String>,
    /// Enable colored terminal output
    pub color: bool,
}

impl Default for FileOutputConfig {
    fn default() -> Self {
        Self {
            format: None,
            color: true,
        }
    }
}

impl FileOutputConfig {
    /// True when `format` is unset or one of [`OUTPUT_FORMATS`]
    pub fn format_is_known(&self) -> bool {
        self.format
            .as_deref()
            .is_none_or(|f| OUTPUT_FORMATS.contains(&f.to_lowercase().as_str()))
    }
}
