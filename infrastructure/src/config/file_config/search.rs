//! Search configuration from TOML (`[search]` section)

use super::issue::ConfigIssue;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tripscout_application::{DEFAULT_RESULT_LIMIT, SearchParams};

/// Raw search configuration from TOML
///
/// # Example
///
/// ```toml
/// [search]
/// limit = 10
/// timeout_secs = 20
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileSearchConfig {
    /// Maximum features requested from the place search
    pub limit: usize,
    /// Per-call timeout in seconds; unset disables it
    pub timeout_secs: Option<u64>,
}

impl Default for FileSearchConfig {
    fn default() -> Self {
        Self {
            limit: DEFAULT_RESULT_LIMIT,
            timeout_secs: Some(30),
        }
    }
}

impl FileSearchConfig {
    /// Convert to application `SearchParams`, returning validation issues.
    ///
    /// A zero limit falls back to the default with a warning.
    pub fn to_search_params(&self) -> (SearchParams, Vec<ConfigIssue>) {
        let mut issues = Vec::new();
        let limit = if self.limit == 0 {
            issues.push(ConfigIssue::warning(
                "search.limit",
                format!("must be greater than zero, using {}", DEFAULT_RESULT_LIMIT),
            ));
            DEFAULT_RESULT_LIMIT
        } else {
            self.limit
        };

        let params = SearchParams::default()
            .with_result_limit(limit)
            .with_call_timeout(self.timeout_secs.map(Duration::from_secs));
        (params, issues)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_search_params() {
        let config = FileSearchConfig {
            limit: 5,
            timeout_secs: None,
        };
        let (params, issues) = config.to_search_params();
        assert_eq!(params.result_limit, 5);
        assert!(params.call_timeout.is_none());
        assert!(issues.is_empty());
    }

    #[test]
    fn test_zero_limit_falls_back() {
        let config = FileSearchConfig {
            limit: 0,
            ..Default::default()
        };
        let (params, issues) = config.to_search_params();
        assert_eq!(params.result_limit, DEFAULT_RESULT_LIMIT);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].field, "search.limit");
    }
}
