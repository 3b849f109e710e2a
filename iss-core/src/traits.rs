//! Common traits for the ISS tracker.
//!
//! These are the seams between the query service and its collaborators:
//! where state vectors are kept, where they come from, and who names the
//! place under the station.

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{Ephemeris, StateVector};

// ═══════════════════════════════════════════════════════════════════════════════
// STORE TRAIT
// ═══════════════════════════════════════════════════════════════════════════════

/// Key-value storage of state vectors keyed by epoch string.
///
/// Implementations might use:
/// - In-memory storage (single process, tests)
/// - Redis (shared cache that survives restarts)
#[async_trait]
pub trait EpochStore: Send + Sync {
    /// Stores a state vector under `epoch`, replacing any previous value.
    async fn put(&self, epoch: &str, vector: StateVector) -> Result<()>;

    /// Retrieves the state vector for `epoch`.
    ///
    /// Fails with `IssError::EpochNotFound` if absent.
    async fn get(&self, epoch: &str) -> Result<StateVector>;

    /// Returns every stored epoch in ascending order.
    async fn list(&self) -> Result<Vec<String>>;

    /// Removes every entry.
    async fn clear(&self) -> Result<()>;

    /// Returns the number of stored epochs.
    async fn len(&self) -> Result<usize>;

    /// Returns true if nothing is stored.
    async fn is_empty(&self) -> Result<bool> {
        Ok(self.len().await? == 0)
    }

    /// Replaces the whole contents with `vectors`.
    ///
    /// Readers may briefly observe a partial set; staleness is tolerated.
    async fn replace_all(&self, vectors: Vec<StateVector>) -> Result<usize> {
        self.clear().await?;
        let count = vectors.len();
        for vector in vectors {
            let epoch = vector.epoch.clone();
            self.put(&epoch, vector).await?;
        }
        Ok(count)
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// FEED TRAIT
// ═══════════════════════════════════════════════════════════════════════════════

/// Source of ephemeris downloads.
#[async_trait]
pub trait EphemerisSource: Send + Sync {
    /// Downloads and parses one ephemeris.
    ///
    /// Fails with a fetch error (`IssError::is_fetch_error`) when the feed
    /// is unreachable or malformed.
    async fn fetch(&self) -> Result<Ephemeris>;
}

// ═══════════════════════════════════════════════════════════════════════════════
// GEOCODER TRAIT
// ═══════════════════════════════════════════════════════════════════════════════

/// Reverse geocoding: coordinates to a human-readable place name.
#[async_trait]
pub trait Geocoder: Send + Sync {
    /// Returns the place name at the given coordinates (degrees).
    ///
    /// Fails with `IssError::GeocodeMiss` when there is nothing there
    /// (open ocean), and `IssError::GeocodeFailed` when the lookup itself fails.
    async fn reverse(&self, latitude: f64, longitude: f64) -> Result<String>;
}
