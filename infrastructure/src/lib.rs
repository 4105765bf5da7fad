//! Infrastructure layer for tripscout
//!
//! This crate contains adapters that implement the ports defined in the
//! application layer, plus configuration file loading.
//!
//! # Adapters
//!
//! - [`GeminiClient`] - interpretation and conversation via Gemini
//! - [`PhotonClient`] - place search via the Photon geocoder

pub mod config;
pub mod gemini;
pub mod photon;

pub use config::{ConfigIssue, ConfigLoader, FileConfig, Severity};
pub use gemini::{GeminiClient, GeminiError};
pub use photon::{PhotonClient, PhotonError};
