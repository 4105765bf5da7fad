//! Interactive chat module
//!
//! Provides a line-editor based chat interface over the session registry.

mod repl;

pub use repl::{ChatRepl, ReplCommand};
