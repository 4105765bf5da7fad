//! Place candidate value object

use serde::{Deserialize, Serialize};

/// A place returned by a place-search provider (Value Object)
///
/// Produced once per search and never persisted. Optional fields are absent
/// when the provider does not report them; the result filter treats an absent
/// field as failing any constraint set on that axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceCandidate {
    /// Display name
    pub name: String,
    /// WGS84 latitude
    pub latitude: f64,
    /// WGS84 longitude
    pub longitude: f64,
    /// Provider category, e.g. `cafe` or `museum`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Average rating, typically 0.0-5.0
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    /// Human-readable location (city, street or country)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// Provider identifier such as `N240109189` for an OSM node
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_id: Option<String>,
    /// Price tier, 0 (free) to 4 (very expensive)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_level: Option<u8>,
    /// Whether the place is open right now
    #[serde(skip_serializing_if = "Option::is_none")]
    pub open_now: Option<bool>,
}

impl PlaceCandidate {
    pub fn new(name: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            name: name.into(),
            latitude,
            longitude,
            category: None,
            rating: None,
            address: None,
            source_id: None,
            price_level: None,
            open_now: None,
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_rating(mut self, rating: f64) -> Self {
        self.rating = Some(rating);
        self
    }

    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    pub fn with_source_id(mut self, source_id: impl Into<String>) -> Self {
        self.source_id = Some(source_id.into());
        self
    }

    pub fn with_price_level(mut self, price_level: u8) -> Self {
        self.price_level = Some(price_level);
        self
    }

    pub fn with_open_now(mut self, open_now: bool) -> Self {
        self.open_now = Some(open_now);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialize_skips_absent_fields() {
        let place = PlaceCandidate::new("Café Central", 48.21, 16.36).with_rating(4.6);
        let json = serde_json::to_value(&place).unwrap();

        assert_eq!(json["name"], "Café Central");
        assert_eq!(json["rating"], 4.6);
        assert!(json.get("address").is_none());
        assert!(json.get("open_now").is_none());
    }
}
