//! Error types for the Gemini adapter

use thiserror::Error;
use tripscout_application::CapabilityError;

/// Errors that can occur when calling the Gemini API
#[derive(Error, Debug)]
pub enum GeminiError {
    #[error("Gemini API key is not configured")]
    MissingApiKey,

    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(String),

    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Rate limited by Gemini: {0}")]
    RateLimited(String),

    #[error("Gemini returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Failed to decode Gemini response: {0}")]
    Decode(String),

    #[error("Gemini returned no text ({reason})")]
    EmptyReply { reason: String },
}

impl GeminiError {
    /// Classify a non-success HTTP status
    pub fn from_status(status: u16, body: String) -> Self {
        match status {
            429 => GeminiError::RateLimited(body),
            _ => GeminiError::Status { status, body },
        }
    }
}

impl From<GeminiError> for CapabilityError {
    fn from(error: GeminiError) -> Self {
        match error {
            GeminiError::MissingApiKey => {
                CapabilityError::NotConfigured("Gemini API key".to_string())
            }
            GeminiError::ClientBuild(message) => CapabilityError::Other(message),
            GeminiError::Request(e) => CapabilityError::Connection(e.to_string()),
            GeminiError::RateLimited(body) => CapabilityError::RateLimited(body),
            GeminiError::Status { status, body } => CapabilityError::Status {
                status,
                message: body,
            },
            GeminiError::Decode(message) => CapabilityError::InvalidResponse(message),
            GeminiError::EmptyReply { reason } => {
                CapabilityError::InvalidResponse(format!("no text in reply ({})", reason))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_429_maps_to_rate_limited() {
        let error: CapabilityError = GeminiError::from_status(429, "quota".to_string()).into();
        assert!(error.is_rate_limited());
    }

    #[test]
    fn test_other_status_keeps_code() {
        let error: CapabilityError = GeminiError::from_status(500, "boom".to_string()).into();
        assert_eq!(
            error,
            CapabilityError::Status {
                status: 500,
                message: "boom".to_string()
            }
        );
    }
}
