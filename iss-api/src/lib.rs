//! # ISS Tracker API Server
//!
//! REST API over NASA's ISS ephemeris.
//!
//! ## Endpoints
//!
//! - `GET /epochs` - All stored epochs (`?limit=&offset=` to page)
//! - `GET /epochs/:epoch` - State vector at an epoch
//! - `GET /epochs/:epoch/location` - Latitude, longitude, altitude and place name
//! - `GET /epochs/:epoch/speed` - Speed in km/h
//! - `GET /now` - Location at the epoch nearest to the current time
//! - `POST /refresh` - Re-download the feed
//! - `GET /health` - Liveness and store size
//!
//! ## Example
//!
//! ```rust,ignore
//! use iss_api::{ApiServer, ApiConfig};
//!
//! let server = ApiServer::from_config(ApiConfig::from_env()).await?;
//! server.run(([0, 0, 0, 0], 5000)).await?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

mod dto;
mod error;
mod handlers;
mod routes;
mod service;
mod state;
#[cfg(test)]
mod testing;

pub use error::ApiError;
pub use routes::create_router;
pub use service::QueryService;
pub use state::{ApiConfig, AppState};

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

/// API server for the ISS tracker.
pub struct ApiServer {
    state: Arc<AppState>,
}

impl ApiServer {
    /// Creates a server around prepared state.
    pub fn new(state: AppState) -> Self {
        Self {
            state: Arc::new(state),
        }
    }

    /// Builds state from `config` (connecting to Redis if configured).
    pub async fn from_config(config: ApiConfig) -> iss_core::Result<Self> {
        Ok(Self::new(AppState::connect(config).await?))
    }

    /// Creates the router with all routes configured.
    pub fn router(&self) -> Router {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);

        create_router(self.state.clone())
            .layer(cors)
            .layer(TraceLayer::new_for_http())
    }

    /// Runs the server on the given address.
    ///
    /// With `fetch_on_startup` the feed is loaded first; a failed load is
    /// logged and the first query retries it.
    pub async fn run(self, addr: impl Into<SocketAddr>) -> std::io::Result<()> {
        let addr = addr.into();

        if self.state.config.fetch_on_startup {
            match self.state.service.refresh().await {
                Ok(count) => info!(count, "Initial feed load complete"),
                Err(e) => warn!(error = %e, "Initial feed load failed, will retry on first request"),
            }
        }

        let listener = tokio::net::TcpListener::bind(addr).await?;

        info!("ISS tracker API listening on {}", addr);

        axum::serve(listener, self.router()).await
    }
}
