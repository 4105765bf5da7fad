//! Photon adapter
//!
//! Implements the place search capability port on top of the Photon
//! geocoding API.

mod client;
pub mod error;

pub use client::{PhotonClient, features_from_body};
pub use error::PhotonError;
