//! Core domain concepts shared across all subdomains.
//!
//! - [`query::SearchText`] - validated free-text search input
//! - [`error::DomainError`] - domain-level errors

pub mod error;
pub mod query;
