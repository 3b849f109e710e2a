//! Error types for the ISS tracker.
//!
//! One `thiserror` enum covers every crate in the workspace. The API layer
//! maps variants onto HTTP status codes; see `is_fetch_error` and
//! `is_not_found`.

use thiserror::Error;

/// Result type alias using `IssError`.
pub type Result<T> = std::result::Result<T, IssError>;

/// Main error type for all ISS tracker operations.
#[derive(Debug, Error)]
pub enum IssError {
    // ═══════════════════════════════════════════════════════════════════════════
    // FEED ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// The feed could not be downloaded (DNS, connect, timeout, body read).
    #[error("Feed fetch failed: {0}")]
    FetchFailed(String),

    /// The feed answered with a non-success HTTP status.
    #[error("Feed returned HTTP {status} for {url}")]
    FeedStatus { url: String, status: u16 },

    /// The feed answered with an empty body.
    #[error("Feed returned an empty document")]
    EmptyFeed,

    /// The feed body is not a valid OEM document.
    #[error("Malformed feed: {0}")]
    MalformedFeed(String),

    // ═══════════════════════════════════════════════════════════════════════════
    // LOOKUP ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// No state vector is stored under this epoch.
    #[error("Epoch not found: {0}")]
    EpochNotFound(String),

    /// The store holds no state vectors at all.
    #[error("No state vectors available")]
    NoData,

    /// The string is not a CCSDS day-of-year timestamp.
    #[error("Invalid epoch '{0}': expected YYYY-DDDTHH:MM:SS.fffZ")]
    InvalidEpoch(String),

    // ═══════════════════════════════════════════════════════════════════════════
    // STORE ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// The key-value store rejected or failed an operation.
    #[error("Store error: {0}")]
    StoreError(String),

    /// The key-value store could not be reached.
    #[error("Store unavailable after {attempts} attempts: {reason}")]
    StoreUnavailable { attempts: u32, reason: String },

    // ═══════════════════════════════════════════════════════════════════════════
    // GEOCODING ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// The geocoder has no place name for these coordinates.
    #[error("No place name at ({latitude:.4}, {longitude:.4})")]
    GeocodeMiss { latitude: f64, longitude: f64 },

    /// The geocoder request itself failed.
    #[error("Geocoding failed: {0}")]
    GeocodeFailed(String),

    // ═══════════════════════════════════════════════════════════════════════════
    // SERIALIZATION ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    // ═══════════════════════════════════════════════════════════════════════════
    // CONFIGURATION ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl IssError {
    /// Returns true if the upstream feed is the cause (surfaced as 503).
    pub fn is_fetch_error(&self) -> bool {
        matches!(
            self,
            IssError::FetchFailed(_)
                | IssError::FeedStatus { .. }
                | IssError::EmptyFeed
                | IssError::MalformedFeed(_)
        )
    }

    /// Returns true if the requested data does not exist (surfaced as 404).
    pub fn is_not_found(&self) -> bool {
        matches!(self, IssError::EpochNotFound(_) | IssError::NoData)
    }

    /// Returns true if retrying the same operation later may succeed.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            IssError::FetchFailed(_)
                | IssError::FeedStatus { .. }
                | IssError::EmptyFeed
                | IssError::GeocodeFailed(_)
                | IssError::StoreUnavailable { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = IssError::FeedStatus {
            url: "https://example.com/feed.xml".into(),
            status: 503,
        };
        assert!(err.to_string().contains("503"));
        assert!(err.to_string().contains("example.com"));

        let err = IssError::GeocodeMiss {
            latitude: 12.345678,
            longitude: -98.7,
        };
        assert!(err.to_string().contains("12.3457"));
    }

    #[test]
    fn test_error_classification() {
        assert!(IssError::FetchFailed("timeout".into()).is_fetch_error());
        assert!(IssError::EmptyFeed.is_fetch_error());
        assert!(IssError::MalformedFeed("bad".into()).is_fetch_error());
        assert!(!IssError::NoData.is_fetch_error());

        assert!(IssError::EpochNotFound("x".into()).is_not_found());
        assert!(IssError::NoData.is_not_found());
        assert!(!IssError::InvalidEpoch("x".into()).is_not_found());

        assert!(IssError::FetchFailed("timeout".into()).is_recoverable());
        assert!(!IssError::MalformedFeed("bad".into()).is_recoverable());
    }

    #[test]
    fn test_json_error_conversion() {
        let json_result: std::result::Result<serde_json::Value, _> = serde_json::from_str("invalid");
        let result: Result<serde_json::Value> = json_result.map_err(IssError::from);
        assert!(matches!(result, Err(IssError::JsonError(_))));
    }
}
