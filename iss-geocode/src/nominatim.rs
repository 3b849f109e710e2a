//! Nominatim client.
//!
//! `GET {base}/reverse?format=jsonv2&lat=..&lon=..&zoom=15&accept-language=en`
//! answers `{"display_name": "..."}` on land and `{"error": "Unable to geocode"}`
//! (still HTTP 200) over open water.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, instrument};

use iss_core::constants::{
    DEFAULT_GEOCODER_URL, DEFAULT_GEOCODER_USER_AGENT, DEFAULT_HTTP_TIMEOUT_SECS, GEOCODER_ZOOM,
};
use iss_core::error::{IssError, Result};
use iss_core::traits::Geocoder;

/// Nominatim client configuration.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct NominatimConfig {
    /// Base URL of the Nominatim instance
    pub base_url: String,
    /// User agent (required by the public instance's usage policy)
    pub user_agent: String,
    /// Detail level, 3 (country) to 18 (building)
    pub zoom: u8,
    /// Preferred language for place names
    pub language: String,
    /// Request timeout in seconds
    pub timeout_seconds: u64,
}

impl Default for NominatimConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_GEOCODER_URL.into(),
            user_agent: DEFAULT_GEOCODER_USER_AGENT.into(),
            zoom: GEOCODER_ZOOM,
            language: "en".into(),
            timeout_seconds: DEFAULT_HTTP_TIMEOUT_SECS,
        }
    }
}

impl NominatimConfig {
    /// Creates config for a custom Nominatim instance.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Overrides the user agent.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Overrides the request timeout.
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout_seconds = seconds;
        self
    }
}

/// Reverse geocoder backed by Nominatim.
#[derive(Clone, Debug)]
pub struct NominatimClient {
    config: NominatimConfig,
    http_client: reqwest::Client,
}

impl NominatimClient {
    /// Creates a client with the given config.
    pub fn with_config(config: NominatimConfig) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| IssError::ConfigError(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            config,
            http_client,
        })
    }

    fn reverse_url(&self) -> String {
        format!("{}/reverse", self.config.base_url.trim_end_matches('/'))
    }
}

#[derive(Debug, Deserialize)]
struct ReverseResponse {
    display_name: Option<String>,
    error: Option<String>,
}

#[async_trait]
impl Geocoder for NominatimClient {
    #[instrument(skip(self))]
    async fn reverse(&self, latitude: f64, longitude: f64) -> Result<String> {
        let zoom = self.config.zoom.to_string();
        let lat = latitude.to_string();
        let lon = longitude.to_string();

        let response = self
            .http_client
            .get(self.reverse_url())
            .query(&[
                ("format", "jsonv2"),
                ("lat", lat.as_str()),
                ("lon", lon.as_str()),
                ("zoom", zoom.as_str()),
                ("accept-language", self.config.language.as_str()),
            ])
            .send()
            .await
            .map_err(|e| IssError::GeocodeFailed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(IssError::GeocodeFailed(format!("HTTP {}", response.status())));
        }

        let body: ReverseResponse = response
            .json()
            .await
            .map_err(|e| IssError::GeocodeFailed(e.to_string()))?;

        match body.display_name.filter(|name| !name.trim().is_empty()) {
            Some(name) => {
                debug!(place = %name, "Reverse geocoded");
                Ok(name)
            }
            None => {
                let reason = body.error.as_deref().unwrap_or("no display_name");
                debug!(reason, "Nothing to geocode");
                Err(IssError::GeocodeMiss {
                    latitude,
                    longitude,
                })
            }
        }
    }
}
