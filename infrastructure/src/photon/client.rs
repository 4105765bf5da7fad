//! PhotonClient -- place search against the komoot Photon geocoder.

use super::error::PhotonError;
use crate::config::FilePhotonConfig;
use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info, warn};
use tripscout_application::{CapabilityError, PlaceSearchCapability};

const DEFAULT_BASE_URL: &str = "https://photon.komoot.io/api/";

/// Photon adapter implementing the place search capability
pub struct PhotonClient {
    client: reqwest::Client,
    base_url: String,
    lang: String,
    bbox: Option<String>,
}

impl PhotonClient {
    pub fn new(timeout: Duration) -> Result<Self, PhotonError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("tripscout/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| PhotonError::ClientBuild(e.to_string()))?;

        Ok(Self {
            client,
            base_url: DEFAULT_BASE_URL.to_string(),
            lang: "en".to_string(),
            bbox: None,
        })
    }

    /// Create a client from the `[photon]` config section
    ///
    /// A malformed bounding box is ignored.
    pub fn from_config(config: &FilePhotonConfig) -> Result<Self, PhotonError> {
        let bbox = config.bbox.clone().filter(|_| config.bbox_is_valid());
        let client = Self::new(config.timeout())?
            .with_base_url(config.base_url.clone())
            .with_lang(config.lang.clone())
            .with_bbox(bbox);
        info!("Photon client ready ({})", client.base_url);
        Ok(client)
    }

    /// Override the base URL (useful for testing or self-hosted instances).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_lang(mut self, lang: impl Into<String>) -> Self {
        self.lang = lang.into();
        self
    }

    pub fn with_bbox(mut self, bbox: Option<String>) -> Self {
        self.bbox = bbox;
        self
    }

    fn query_params(&self, term: &str, limit: usize) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("q", term.to_string()),
            ("limit", limit.to_string()),
            ("lang", self.lang.clone()),
        ];
        if let Some(bbox) = &self.bbox {
            params.push(("bbox", bbox.clone()));
        }
        params
    }

    async fn fetch(&self, term: &str, limit: usize) -> Result<Vec<Value>, PhotonError> {
        debug!("GET {} q='{}' limit={}", self.base_url, term, limit);

        let response = self
            .client
            .get(&self.base_url)
            .query(&self.query_params(term, limit))
            .send()
            .await?;

        let status = response.status();
        if status.as_u16() == 429 {
            return Err(PhotonError::RateLimited);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("Photon returned HTTP {}", status);
            return Err(PhotonError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| PhotonError::UnexpectedBody(e.to_string()))?;
        features_from_body(body)
    }
}

/// Extract the `features` array of a GeoJSON FeatureCollection
pub fn features_from_body(body: Value) -> Result<Vec<Value>, PhotonError> {
    match body {
        Value::Object(mut object) => match object.remove("features") {
            Some(Value::Array(features)) => Ok(features),
            _ => Err(PhotonError::UnexpectedBody(
                "missing 'features' array".to_string(),
            )),
        },
        _ => Err(PhotonError::UnexpectedBody(
            "body is not a JSON object".to_string(),
        )),
    }
}

#[async_trait]
impl PlaceSearchCapability for PhotonClient {
    async fn search(&self, term: &str, limit: usize) -> Result<Vec<Value>, CapabilityError> {
        let features = self.fetch(term, limit).await?;
        debug!("Photon returned {} feature(s) for '{}'", features.len(), term);
        Ok(features)
    }
}
