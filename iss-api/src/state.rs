//! App state: config, query service, start time.

use std::sync::Arc;
use std::time::Instant;

use tracing::info;

use iss_cache::MemoryStore;
use iss_core::constants::{
    DEFAULT_FEED_URL, DEFAULT_GEOCODER_URL, DEFAULT_GEOCODER_USER_AGENT, DEFAULT_HTTP_TIMEOUT_SECS,
};
use iss_core::error::Result;
use iss_core::traits::EpochStore;
use iss_feed::{FeedClient, FeedConfig};
use iss_geocode::{NominatimClient, NominatimConfig};

use crate::service::QueryService;

/// Server configuration.
#[derive(Clone, Debug)]
pub struct ApiConfig {
    /// OEM feed URL
    pub feed_url: String,
    /// Nominatim base URL
    pub geocoder_url: String,
    /// User agent sent to the geocoder
    pub geocoder_user_agent: String,
    /// Timeout for outbound requests, in seconds
    pub http_timeout_secs: u64,
    /// Redis connection string; unset means in-process store
    pub redis_url: Option<String>,
    /// Download the feed before accepting requests
    pub fetch_on_startup: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            feed_url: DEFAULT_FEED_URL.into(),
            geocoder_url: DEFAULT_GEOCODER_URL.into(),
            geocoder_user_agent: DEFAULT_GEOCODER_USER_AGENT.into(),
            http_timeout_secs: DEFAULT_HTTP_TIMEOUT_SECS,
            redis_url: None,
            fetch_on_startup: true,
        }
    }
}

impl ApiConfig {
    /// Loads config from the environment (and `.env` if present).
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();

        Self {
            feed_url: std::env::var("ISS_FEED_URL").unwrap_or_else(|_| DEFAULT_FEED_URL.into()),
            geocoder_url: std::env::var("GEOCODER_URL")
                .unwrap_or_else(|_| DEFAULT_GEOCODER_URL.into()),
            geocoder_user_agent: std::env::var("GEOCODER_USER_AGENT")
                .unwrap_or_else(|_| DEFAULT_GEOCODER_USER_AGENT.into()),
            http_timeout_secs: std::env::var("HTTP_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_HTTP_TIMEOUT_SECS),
            redis_url: std::env::var("REDIS_URL").ok().filter(|v| !v.is_empty()),
            fetch_on_startup: std::env::var("FETCH_ON_STARTUP")
                .map(|v| v != "false" && v != "0")
                .unwrap_or(true),
        }
    }

    fn feed_client(&self) -> Result<FeedClient> {
        FeedClient::with_config(
            FeedConfig::new(&self.feed_url).with_timeout(self.http_timeout_secs),
        )
    }

    fn geocoder(&self) -> Result<NominatimClient> {
        NominatimClient::with_config(
            NominatimConfig::new(&self.geocoder_url)
                .with_user_agent(&self.geocoder_user_agent)
                .with_timeout(self.http_timeout_secs),
        )
    }
}

/// Shared state handed to every handler.
pub struct AppState {
    /// Configuration the state was built from
    pub config: ApiConfig,
    /// Query service
    pub service: QueryService,
    /// Server start time, for uptime
    pub started_at: Instant,
}

impl AppState {
    /// Builds state over an in-process store.
    pub fn new(config: ApiConfig) -> Result<Self> {
        Self::with_store(config, Arc::new(MemoryStore::new()))
    }

    /// Builds state over the given store.
    pub fn with_store(config: ApiConfig, store: Arc<dyn EpochStore>) -> Result<Self> {
        let service = QueryService::new(
            store,
            Arc::new(config.feed_client()?),
            Arc::new(config.geocoder()?),
        );
        Ok(Self::with_service(config, service))
    }

    /// Builds state around an existing service.
    pub fn with_service(config: ApiConfig, service: QueryService) -> Self {
        Self {
            config,
            service,
            started_at: Instant::now(),
        }
    }

    /// Builds state, connecting to Redis when `redis_url` is set.
    pub async fn connect(config: ApiConfig) -> Result<Self> {
        let store = Self::open_store(&config).await?;
        Self::with_store(config, store)
    }

    #[cfg(feature = "redis")]
    async fn open_store(config: &ApiConfig) -> Result<Arc<dyn EpochStore>> {
        use iss_cache::{RedisConfig, RedisStore};

        match &config.redis_url {
            Some(url) => {
                let store = RedisStore::connect_with_retry(RedisConfig::new(url)).await?;
                info!("Using Redis store");
                Ok(Arc::new(store))
            }
            None => {
                info!("Using in-process store");
                Ok(Arc::new(MemoryStore::new()))
            }
        }
    }

    #[cfg(not(feature = "redis"))]
    async fn open_store(config: &ApiConfig) -> Result<Arc<dyn EpochStore>> {
        if config.redis_url.is_some() {
            tracing::warn!("REDIS_URL is set but the redis feature is disabled, using in-process store");
        } else {
            info!("Using in-process store");
        }
        Ok(Arc::new(MemoryStore::new()))
    }
}
