//! Place search capability port
//!
//! Defines the interface to an external geographic search service.

use super::capability::CapabilityError;
use async_trait::async_trait;
use serde_json::Value;

/// Geographic text search returning raw GeoJSON features
///
/// Each returned value is expected to be a GeoJSON `Feature` with a point
/// geometry (`coordinates = [lon, lat]`) and a `properties` object. Malformed
/// features are tolerated here and skipped during mapping.
#[async_trait]
pub trait PlaceSearchCapability: Send + Sync {
    /// Search for `term`, asking for at most `limit` features
    async fn search(&self, term: &str, limit: usize) -> Result<Vec<Value>, CapabilityError>;
}
