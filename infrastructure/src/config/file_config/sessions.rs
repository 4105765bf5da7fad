//! Chat session configuration from TOML (`[sessions]` section)

use super::issue::ConfigIssue;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tripscout_application::SessionParams;

/// Raw session lifecycle configuration from TOML
///
/// # Example
///
/// ```toml
/// [sessions]
/// idle_timeout_secs = 1800
/// sweep_interval_secs = 60
/// max_turns = 100
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileSessionsConfig {
    pub idle_timeout_secs: u64,
    pub sweep_interval_secs: u64,
    pub max_turns: usize,
    /// Per-call timeout in seconds; unset disables it
    pub timeout_secs: Option<u64>,
}

impl Default for FileSessionsConfig {
    fn default() -> Self {
        let params = SessionParams::default();
        Self {
            idle_timeout_secs: params.idle_timeout.as_secs(),
            sweep_interval_secs: params.sweep_interval.as_secs(),
            max_turns: params.max_turns,
            timeout_secs: params.call_timeout.map(|t| t.as_secs()),
        }
    }
}

impl FileSessionsConfig {
    /// Convert to application `SessionParams`, returning validation issues.
    ///
    /// Zero durations and a history cap below one exchange fall back to the
    /// defaults with a warning each.
    pub fn to_session_params(&self) -> (SessionParams, Vec<ConfigIssue>) {
        let defaults = SessionParams::default();
        let mut issues = Vec::new();
        let mut params = defaults
            .clone()
            .with_call_timeout(self.timeout_secs.map(Duration::from_secs));

        if self.idle_timeout_secs == 0 {
            issues.push(ConfigIssue::warning(
                "sessions.idle_timeout_secs",
                "must be greater than zero, using the default",
            ));
        } else {
            params = params.with_idle_timeout(Duration::from_secs(self.idle_timeout_secs));
        }

        if self.sweep_interval_secs == 0 {
            issues.push(ConfigIssue::warning(
                "sessions.sweep_interval_secs",
                "must be greater than zero, using the default",
            ));
        } else {
            params = params.with_sweep_interval(Duration::from_secs(self.sweep_interval_secs));
        }

        if self.max_turns < 2 {
            issues.push(ConfigIssue::warning(
                "sessions.max_turns",
                format!("must be at least 2, using {}", defaults.max_turns),
            ));
        } else {
            params = params.with_max_turns(self.max_turns);
        }

        (params, issues)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_session_params() {
        let (params, issues) = FileSessionsConfig::default().to_session_params();
        assert!(issues.is_empty());
        assert_eq!(params.idle_timeout, Duration::from_secs(1800));
        assert_eq!(params.sweep_interval, Duration::from_secs(60));
        assert_eq!(params.max_turns, 100);
        assert_eq!(params.call_timeout, Some(Duration::from_secs(60)));
    }

    #[test]
    fn test_invalid_values_reported() {
        let config = FileSessionsConfig {
            idle_timeout_secs: 0,
            sweep_interval_secs: 0,
            max_turns: 1,
            timeout_secs: None,
        };
        let (params, issues) = config.to_session_params();

        assert_eq!(issues.len(), 3);
        assert_eq!(params.idle_timeout, Duration::from_secs(1800));
        assert_eq!(params.max_turns, 100);
        assert!(params.call_timeout.is_none());
    }
}
