//! Gemini configuration from TOML (`[gemini]` section)

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Environment variable consulted when no API key is configured
pub const GEMINI_API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Raw Gemini configuration from TOML
///
/// # Example
///
/// ```toml
/// [gemini]
/// model = "gemini-2.0-flash"
/// timeout_secs = 30
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileGeminiConfig {
    /// API key; falls back to `GEMINI_API_KEY` when unset
    pub api_key: Option<String>,
    /// REST endpoint root (without the `/models/...` suffix)
    pub base_url: String,
    /// Model used to interpret search requests
    pub model: String,
    /// Model used for travel chat
    pub chat_model: String,
    /// HTTP request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for FileGeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            model: "gemini-2.0-flash".to_string(),
            chat_model: "gemini-2.0-flash".to_string(),
            timeout_secs: 30,
        }
    }
}

impl FileGeminiConfig {
    /// Configured key, or the `GEMINI_API_KEY` environment variable
    pub fn resolve_api_key(&self) -> Option<String> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .map(String::from)
            .or_else(|| {
                std::env::var(GEMINI_API_KEY_ENV)
                    .ok()
                    .filter(|k| !k.trim().is_empty())
            })
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configured_key_wins() {
        let config = FileGeminiConfig {
            api_key: Some("  from-file ".to_string()),
            ..Default::default()
        };
        assert_eq!(config.resolve_api_key(), Some("from-file".to_string()));
    }

    #[test]
    fn test_deserialize_gemini_section() {
        let toml_str = r#"
[gemini]
model = "gemini-1.5-pro"
timeout_secs = 10
"#;
        let config: super::super::FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.gemini.model, "gemini-1.5-pro");
        assert_eq!(config.gemini.chat_model, "gemini-2.0-flash");
        assert_eq!(config.gemini.timeout(), Duration::from_secs(10));
    }
}
