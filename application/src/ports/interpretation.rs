//! Interpretation capability port
//!
//! Turns an instruction prompt into a textual reply. The adapter decides
//! which model answers; the application only parses what comes back.

use super::capability::CapabilityError;
use async_trait::async_trait;

/// Text-in, text-out capability used to interpret search requests
#[async_trait]
pub trait InterpretationCapability: Send + Sync {
    /// Send an instruction prompt and return the raw reply text
    ///
    /// The reply is expected to contain a JSON object, possibly wrapped in
    /// markdown fences. Parsing is the caller's job.
    async fn ask(&self, prompt: &str) -> Result<String, CapabilityError>;
}
