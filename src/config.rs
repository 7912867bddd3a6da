use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::{info, warn};

pub const DEFAULT_ENDPOINT: &str = "https://maps.googleapis.com/maps/api/geocode/json";

// Supply your own key: https://developers.google.com/maps/documentation/geocoding/get-api-key
const DEFAULT_API_KEY: &str = "";

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub geocoder: GeocoderConfig,
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct GeocoderConfig {
    pub api_key: String,
    pub endpoint: String,
    /// Request timeout; the HTTP client's default when unset
    pub timeout_secs: Option<u64>,
}

impl Default for GeocoderConfig {
    fn default() -> Self {
        Self {
            api_key: DEFAULT_API_KEY.to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout_secs: None,
        }
    }
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path).context("Failed to read config file")?;
        let config: Config = toml::from_str(&content).context("Failed to parse config file")?;
        Ok(config)
    }

    /// Build the geocoder settings for a run: optional file first, then the
    /// command-line key on top.
    pub fn resolve(config_path: Option<&Path>, api_key: Option<String>) -> Result<GeocoderConfig> {
        let mut geocoder = match config_path {
            Some(path) => {
                info!("Loading config from {}", path.display());
                Self::load_from_file(path)?.geocoder
            }
            None => GeocoderConfig::default(),
        };

        if let Some(key) = api_key {
            geocoder.api_key = key;
        }

        if geocoder.api_key.is_empty() {
            warn!("No API key configured; the geocoding service will deny requests");
        }

        Ok(geocoder)
    }
}
