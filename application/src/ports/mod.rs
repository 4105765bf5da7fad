//! Port definitions (interfaces for external adapters)
//!
//! Ports define the boundaries between the application layer and
//! the infrastructure layer.

pub mod capability;
pub mod clock;
pub mod conversation;
pub mod interpretation;
pub mod place_search;
pub mod progress;
