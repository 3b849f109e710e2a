//! DTOs for API requests and responses.

use serde::{Deserialize, Serialize};

use iss_core::types::Location;

/// Paging for `GET /epochs`.
#[derive(Debug, Default, Deserialize)]
pub struct EpochsQuery {
    /// Maximum number of epochs to return
    pub limit: Option<usize>,
    /// Number of epochs to skip
    pub offset: Option<usize>,
}

impl EpochsQuery {
    /// Applies the paging to a full epoch list.
    pub fn apply(&self, epochs: Vec<String>) -> Vec<String> {
        epochs
            .into_iter()
            .skip(self.offset.unwrap_or(0))
            .take(self.limit.unwrap_or(usize::MAX))
            .collect()
    }
}

/// Response for `GET /now`.
#[derive(Debug, Serialize)]
pub struct NowResponse {
    /// Location at the nearest epoch
    #[serde(flatten)]
    pub location: Location,
    /// UTC time used for the lookup
    pub now: String,
}

/// Response for `GET /epochs/:epoch/speed`.
#[derive(Debug, Serialize)]
pub struct SpeedResponse {
    /// Speed in km/h
    pub speed: f64,
}

/// Response for `POST /refresh`.
#[derive(Debug, Serialize)]
pub struct RefreshResponse {
    /// Number of state vectors now stored
    pub stored: usize,
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// API version
    pub version: String,
    /// Uptime in seconds
    pub uptime_seconds: u64,
    /// Number of stored epochs
    pub epochs_count: usize,
}
