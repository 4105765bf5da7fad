//! Search parameters - orchestration control.
//!
//! [`SearchParams`] groups the knobs that control
//! [`FindPlacesUseCase`](crate::use_cases::find_places::FindPlacesUseCase).

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Number of features requested from the place search by default
pub const DEFAULT_RESULT_LIMIT: usize = 20;

/// Place search orchestration parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchParams {
    /// Maximum number of features requested from the place search.
    pub result_limit: usize,
    /// Upper bound on each external call (interpretation, search).
    pub call_timeout: Option<Duration>,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            result_limit: DEFAULT_RESULT_LIMIT,
            call_timeout: Some(Duration::from_secs(30)),
        }
    }
}

impl SearchParams {
    pub fn with_result_limit(mut self, limit: usize) -> Self {
        self.result_limit = limit;
        self
    }

    pub fn with_call_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.call_timeout = timeout;
        self
    }
}
