//! Gemini adapter
//!
//! Implements the interpretation and conversation capability ports on top
//! of the Gemini `generateContent` endpoint.

mod client;
pub mod error;
pub mod types;

pub use client::GeminiClient;
pub use error::GeminiError;
