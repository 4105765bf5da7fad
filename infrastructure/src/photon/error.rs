//! Error types for the Photon adapter

use thiserror::Error;
use tripscout_application::CapabilityError;

/// Errors that can occur when querying Photon
#[derive(Error, Debug)]
pub enum PhotonError {
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(String),

    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Photon returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Rate limited by Photon")]
    RateLimited,

    #[error("Unexpected Photon response: {0}")]
    UnexpectedBody(String),
}

impl From<PhotonError> for CapabilityError {
    fn from(error: PhotonError) -> Self {
        match error {
            PhotonError::ClientBuild(message) => CapabilityError::Other(message),
            PhotonError::Request(e) => CapabilityError::Connection(e.to_string()),
            PhotonError::Status { status, body } => CapabilityError::Status {
                status,
                message: body,
            },
            PhotonError::RateLimited => CapabilityError::RateLimited("photon".to_string()),
            PhotonError::UnexpectedBody(message) => CapabilityError::InvalidResponse(message),
        }
    }
}
