//! Feed client.
//!
//! Downloads the OEM document over HTTPS and hands it to the parser.

use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, error, instrument};

use iss_core::constants::{DEFAULT_FEED_URL, DEFAULT_HTTP_TIMEOUT_SECS};
use iss_core::error::{IssError, Result};
use iss_core::traits::EphemerisSource;
use iss_core::types::Ephemeris;

use crate::oem::parse_oem;

/// Feed client configuration.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct FeedConfig {
    /// OEM XML document URL
    pub url: String,
    /// Request timeout in seconds
    pub timeout_seconds: u64,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_FEED_URL.into(),
            timeout_seconds: DEFAULT_HTTP_TIMEOUT_SECS,
        }
    }
}

impl FeedConfig {
    /// Creates config for a custom feed URL.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    /// Overrides the request timeout.
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout_seconds = seconds;
        self
    }
}

/// Client for the ISS OEM feed.
#[derive(Clone, Debug)]
pub struct FeedClient {
    config: FeedConfig,
    http_client: reqwest::Client,
}

impl FeedClient {
    /// Creates a feed client with the given config.
    pub fn with_config(config: FeedConfig) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| IssError::ConfigError(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            config,
            http_client,
        })
    }

    /// Returns the configured feed URL.
    pub fn url(&self) -> &str {
        &self.config.url
    }

    /// Downloads and parses the feed.
    #[instrument(skip(self), fields(url = %self.config.url))]
    pub async fn download(&self) -> Result<Ephemeris> {
        let response = self
            .http_client
            .get(&self.config.url)
            .send()
            .await
            .map_err(|e| IssError::FetchFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            error!(status = status.as_u16(), "Feed request failed");
            return Err(IssError::FeedStatus {
                url: self.config.url.clone(),
                status: status.as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| IssError::FetchFailed(e.to_string()))?;
        debug!(bytes = body.len(), "Downloaded feed");

        parse_oem(&body)
    }
}

#[async_trait]
impl EphemerisSource for FeedClient {
    async fn fetch(&self) -> Result<Ephemeris> {
        self.download().await
    }
}
