//! Domain layer for tripscout
//!
//! This crate contains the core business logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Search
//!
//! Free text ([`SearchText`]) is interpreted into a [`SearchIntent`]
//! (category + loosely-typed filters). The place search returns
//! [`PlaceCandidate`]s, which [`ResultFilter`] narrows with a [`FilterSpec`].
//!
//! ## Conversation
//!
//! A chat keeps an ordered, bounded [`ConversationHistory`] of
//! [`ConversationTurn`]s.

pub mod conversation;
pub mod core;
pub mod prompt;
pub mod search;
pub mod util;

// Re-export commonly used types
pub use conversation::{
    history::{ConversationHistory, DEFAULT_MAX_TURNS},
    turn::{ConversationTurn, Role},
};
pub use core::{error::DomainError, query::SearchText};
pub use prompt::PromptTemplate;
pub use search::{
    filter::{FilterIssue, FilterSpec, ResultFilter},
    intent::SearchIntent,
    place::PlaceCandidate,
};
