//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! Conversion into application parameters happens through `to_*` methods
//! that report problems as [`ConfigIssue`]s instead of failing the load.

mod gemini;
mod issue;
mod output;
mod photon;
mod repl;
mod search;
mod sessions;

pub use gemini::{FileGeminiConfig, GEMINI_API_KEY_ENV};
pub use issue::{ConfigIssue, Severity};
pub use output::{FileOutputConfig, OUTPUT_FORMATS};
pub use photon::FilePhotonConfig;
pub use repl::FileReplConfig;
pub use search::FileSearchConfig;
pub use sessions::FileSessionsConfig;

use serde::{Deserialize, Serialize};

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Interpretation and chat model settings
    pub gemini: FileGeminiConfig,
    /// Geocoder settings
    pub photon: FilePhotonConfig,
    /// Place search orchestration
    pub search: FileSearchConfig,
    /// Chat session lifecycle
    pub sessions: FileSessionsConfig,
    /// Output settings
    pub output: FileOutputConfig,
    /// Chat REPL settings
    pub repl: FileReplConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    ///
    /// Checks:
    /// 1. Gemini API key presence (config or environment)
    /// 2. Search and session parameter constraints
    /// 3. Photon bounding box shape
    /// 4. Output format name
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        // 1. Credentials
        if self.gemini.resolve_api_key().is_none() {
            issues.push(ConfigIssue::error(
                "gemini.api_key",
                format!(
                    "no API key configured and {} is not set",
                    GEMINI_API_KEY_ENV
                ),
            ));
        }

        // 2. Parameter conversion
        issues.extend(self.search.to_search_params().1);
        issues.extend(self.sessions.to_session_params().1);

        // 3. Bounding box
        if !self.photon.bbox_is_valid() {
            issues.push(ConfigIssue::warning(
                "photon.bbox",
                "expected 'minLon,minLat,maxLon,maxLat', ignoring",
            ));
        }

        // 4. Output format
        if !self.output.format_is_known() {
            issues.push(ConfigIssue::warning(
                "output.format",
                format!(
                    "unknown value '{}', expected one of: {}",
                    self.output.format.as_deref().unwrap_or_default(),
                    OUTPUT_FORMATS.join(", ")
                ),
            ));
        }

        issues
    }
}
