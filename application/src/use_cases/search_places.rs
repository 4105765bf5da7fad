//! Search Places use case
//!
//! Queries the place search capability and maps raw GeoJSON features to
//! [`PlaceCandidate`]s.

use crate::ports::capability::CapabilityError;
use crate::ports::place_search::PlaceSearchCapability;
use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};
use tripscout_domain::{DomainError, PlaceCandidate};

/// Errors that can occur during a place search
#[derive(Error, Debug)]
pub enum SearchClientError {
    #[error("Invalid input: {0}")]
    InvalidInput(#[from] DomainError),

    #[error("Place search unavailable: {0}")]
    Unavailable(#[from] CapabilityError),
}

/// Client that turns a search term into place candidates
pub struct PlaceSearchClient<S: PlaceSearchCapability + ?Sized> {
    capability: Arc<S>,
}

impl<S: PlaceSearchCapability + ?Sized> PlaceSearchClient<S> {
    pub fn new(capability: Arc<S>) -> Self {
        Self { capability }
    }

    /// Search for `term`, returning at most `limit` candidates
    ///
    /// Features without usable coordinates or any name are skipped. An empty
    /// result is not an error here.
    pub async fn search(
        &self,
        term: &str,
        limit: usize,
    ) -> Result<Vec<PlaceCandidate>, SearchClientError> {
        if term.trim().is_empty() {
            return Err(DomainError::EmptySearchText.into());
        }
        if limit == 0 {
            return Err(DomainError::InvalidLimit(limit).into());
        }

        let features = self.capability.search(term, limit).await?;
        let total = features.len();

        let mut places: Vec<PlaceCandidate> = features
            .iter()
            .enumerate()
            .filter_map(|(index, feature)| {
                let place = place_from_feature(feature);
                if place.is_none() {
                    debug!("Skipping unusable feature #{} for '{}'", index, term);
                }
                place
            })
            .collect();
        places.truncate(limit);

        info!("Place search for '{}' returned {}/{} usable feature(s)", term, places.len(), total);
        Ok(places)
    }
}

/// Map a GeoJSON feature to a candidate
///
/// Coordinates are `[lon, lat]`. The name falls back to the street, then the
/// city. Returns `None` when no name or valid point can be found.
pub fn place_from_feature(feature: &Value) -> Option<PlaceCandidate> {
    let coordinates = feature.pointer("/geometry/coordinates")?.as_array()?;
    let longitude = coordinates.first()?.as_f64()?;
    let latitude = coordinates.get(1)?.as_f64()?;
    if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
        return None;
    }

    let props = feature.get("properties");
    let name = prop_str(props, "name")
        .or_else(|| prop_str(props, "street"))
        .or_else(|| prop_str(props, "city"))?;

    let mut place = PlaceCandidate::new(name, latitude, longitude);
    place.category = prop_str(props, "osm_value").map(String::from);
    place.address = prop_str(props, "city")
        .or_else(|| prop_str(props, "street"))
        .or_else(|| prop_str(props, "country"))
        .map(String::from);
    place.source_id = source_id(props);
    place.rating = props
        .and_then(|p| p.get("rating"))
        .and_then(number_like)
        .filter(|r| r.is_finite());
    place.price_level = props
        .and_then(|p| p.get("price_level"))
        .and_then(number_like)
        .filter(|p| (0.0..=f64::from(u8::MAX)).contains(p))
        .map(|p| p as u8);
    place.open_now = props.and_then(|p| p.get("open_now")).and_then(Value::as_bool);

    Some(place)
}

fn prop_str<'a>(props: Option<&'a Value>, key: &str) -> Option<&'a str> {
    props?
        .get(key)?
        .as_str()
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

fn number_like(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn source_id(props: Option<&Value>) -> Option<String> {
    let id = match props?.get("osm_id")? {
        Value::Number(n) => n.to_string(),
        Value::String(s) if !s.trim().is_empty() => s.trim().to_string(),
        _ => return None,
    };
    Some(match prop_str(props, "osm_type") {
        Some(kind) => format!("{}{}", kind, id),
        None => id,
    })
}
