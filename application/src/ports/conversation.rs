//! Conversation capability port

use super::capability::CapabilityError;
use async_trait::async_trait;
use tripscout_domain::ConversationTurn;

/// Produces an assistant reply given prior turns and a new user message
#[async_trait]
pub trait ConversationCapability: Send + Sync {
    /// Generate a reply to `message`
    ///
    /// `history` holds the turns recorded before this message, oldest first.
    /// It does not contain `message` itself.
    async fn converse(
        &self,
        history: &[ConversationTurn],
        message: &str,
    ) -> Result<String, CapabilityError>;
}
