//! Shared capability error and stage tags
//!
//! Every external capability port reports failures as [`CapabilityError`];
//! use cases rewrap them with the stage that failed.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur while calling an external capability
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CapabilityError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Service returned status {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Rate limited: {0}")]
    RateLimited(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Timed out after {0:?}")]
    Timeout(Duration),

    #[error("Cancelled")]
    Cancelled,

    #[error("Not configured: {0}")]
    NotConfigured(String),

    #[error("Other error: {0}")]
    Other(String),
}

impl CapabilityError {
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, CapabilityError::RateLimited(_))
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, CapabilityError::Timeout(_))
    }
}

/// External stage of the search pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceStage {
    Interpretation,
    Search,
}

impl ServiceStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceStage::Interpretation => "interpretation",
            ServiceStage::Search => "search",
        }
    }
}

impl std::fmt::Display for ServiceStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
