//! Session parameters - chat session lifecycle control.
//!
//! [`SessionParams`] is shared by
//! [`SessionRegistry`](crate::use_cases::session_registry::SessionRegistry)
//! and [`SessionSweeper`](crate::use_cases::sweep_sessions::SessionSweeper).

use serde::{Deserialize, Serialize};
use std::time::Duration;
use tripscout_domain::DEFAULT_MAX_TURNS;

/// Chat session lifecycle parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionParams {
    /// Sessions idle for longer than this are evicted.
    pub idle_timeout: Duration,
    /// How often the background sweeper runs.
    pub sweep_interval: Duration,
    /// Maximum turns kept per session history.
    pub max_turns: usize,
    /// Upper bound on each conversation capability call.
    pub call_timeout: Option<Duration>,
}

impl Default for SessionParams {
    fn default() -> Self {
        Self {
            idle_timeout: Duration::from_secs(30 * 60),
            sweep_interval: Duration::from_secs(60),
            max_turns: DEFAULT_MAX_TURNS,
            call_timeout: Some(Duration::from_secs(60)),
        }
    }
}

impl SessionParams {
    pub fn with_idle_timeout(mut self, timeout: Duration) -> Self {
        self.idle_timeout = timeout;
        self
    }

    pub fn with_sweep_interval(mut self, interval: Duration) -> Self {
        self.sweep_interval = interval;
        self
    }

    pub fn with_max_turns(mut self, max: usize) -> Self {
        self.max_turns = max;
        self
    }

    pub fn with_call_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.call_timeout = timeout;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default() {
        let params = SessionParams::default();
        assert_eq!(params.idle_timeout, Duration::from_secs(1800));
        assert_eq!(params.sweep_interval, Duration::from_secs(60));
        assert_eq!(params.max_turns, 100);
        assert!(params.call_timeout.is_some());
    }

    #[test]
    fn test_builder() {
        let params = SessionParams::default()
            .with_idle_timeout(Duration::from_secs(5))
            .with_max_turns(10);

        assert_eq!(params.idle_timeout, Duration::from_secs(5));
        assert_eq!(params.max_turns, 10);
    }
}
