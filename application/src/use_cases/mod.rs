//! Use cases (application services)
//!
//! Each use case orchestrates domain logic and port interactions:
//!
//! - [`interpret_query`] - free text to [`SearchIntent`](tripscout_domain::SearchIntent)
//! - [`search_places`] - search term to place candidates
//! - [`find_places`] - interpret, search, filter
//! - [`chat_session`] / [`session_registry`] / [`sweep_sessions`] - chat lifecycle

pub mod chat_session;
pub mod find_places;
pub mod interpret_query;
pub mod search_places;
pub mod session_registry;
pub(crate) mod shared;
pub mod sweep_sessions;
