//! Prompt domain
//!
//! Templates for the interpretation instruction and the chat system prompt.

mod template;

pub use template::PromptTemplate;
