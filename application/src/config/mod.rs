//! Application-level configuration.
//!
//! This module provides configuration types that control how use cases behave:
//!
//! - [`SearchParams`] - place search orchestration (result limit, call timeout)
//! - [`SessionParams`] - chat session lifecycle (idle expiry, sweep cadence, history cap)

pub mod search_params;
pub mod session_params;

pub use search_params::{DEFAULT_RESULT_LIMIT, SearchParams};
pub use session_params::SessionParams;
