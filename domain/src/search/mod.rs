//! Place search domain.
//!
//! - [`intent::SearchIntent`] - structured interpretation of a query
//! - [`place::PlaceCandidate`] - a place returned by a search provider
//! - [`filter::FilterSpec`] / [`filter::ResultFilter`] - declarative result filtering

pub mod filter;
pub mod intent;
pub mod place;
