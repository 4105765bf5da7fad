//! Photon configuration from TOML (`[photon]` section)

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Raw Photon geocoder configuration from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilePhotonConfig {
    pub base_url: String,
    /// Result language code
    pub lang: String,
    /// Optional bounding box `minLon,minLat,maxLon,maxLat`
    pub bbox: Option<String>,
    pub timeout_secs: u64,
}

impl Default for FilePhotonConfig {
    fn default() -> Self {
        Self {
            base_url: "https://photon.komoot.io/api/".to_string(),
            lang: "en".to_string(),
            bbox: None,
            timeout_secs: 15,
        }
    }
}

impl FilePhotonConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Check that `bbox`, when set, holds four comma-separated numbers
    pub fn bbox_is_valid(&self) -> bool {
        match &self.bbox {
            None => true,
            Some(bbox) => {
                let parts: Vec<&str> = bbox.split(',').map(str::trim).collect();
                parts.len() == 4 && parts.iter().all(|p| p.parse::<f64>().is_ok())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bbox_validation() {
        let mut config = FilePhotonConfig::default();
        assert!(config.bbox_is_valid());

        config.bbox = Some("-9.5, 38.6, -9.0, 38.9".to_string());
        assert!(config.bbox_is_valid());

        config.bbox = Some("lisbon".to_string());
        assert!(!config.bbox_is_valid());
    }
}
