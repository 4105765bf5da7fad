//! Conversation domain.
//!
//! - [`turn::ConversationTurn`] - a single message within a conversation
//! - [`history::ConversationHistory`] - bounded, ordered turn history

pub mod history;
pub mod turn;
