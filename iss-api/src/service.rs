//! Query service: the lookups behind every endpoint.
//!
//! Owns handles to the store, the feed and the geocoder. If a query finds
//! the store empty it fetches the feed once before answering, so a server
//! whose startup fetch failed recovers on the next request. Concurrent
//! queries against an empty store share that one fetch.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

use iss_core::constants::{OCEAN_PLACEHOLDER, UNKNOWN_LOCATION_PLACEHOLDER};
use iss_core::error::{IssError, Result};
use iss_core::geodesy::eci_to_geodetic;
use iss_core::traits::{EphemerisSource, EpochStore, Geocoder};
use iss_core::types::{nearest_epoch, parse_epoch, Location, StateVector};

/// Epoch lookups, location derivation and speed.
#[derive(Clone)]
pub struct QueryService {
    store: Arc<dyn EpochStore>,
    source: Arc<dyn EphemerisSource>,
    geocoder: Arc<dyn Geocoder>,
    load_lock: Arc<Mutex<()>>,
}

impl QueryService {
    /// Creates a service over the given collaborators.
    pub fn new(
        store: Arc<dyn EpochStore>,
        source: Arc<dyn EphemerisSource>,
        geocoder: Arc<dyn Geocoder>,
    ) -> Self {
        Self {
            store,
            source,
            geocoder,
            load_lock: Arc::new(Mutex::new(())),
        }
    }

    /// The underlying store.
    pub fn store(&self) -> &dyn EpochStore {
        self.store.as_ref()
    }

    /// Downloads the feed and replaces the store contents.
    ///
    /// On failure the previous contents stay in place. A download without
    /// any state vectors counts as a failure.
    pub async fn refresh(&self) -> Result<usize> {
        let ephemeris = self.source.fetch().await.map_err(|e| {
            error!(error = %e, "Failed to fetch ISS feed");
            e
        })?;
        if ephemeris.is_empty() {
            error!("ISS feed has no state vectors, keeping current store");
            return Err(IssError::EmptyFeed);
        }
        let count = self.store.replace_all(ephemeris.vectors).await?;
        info!(count, "Loaded state vectors");
        Ok(count)
    }

    async fn ensure_loaded(&self) -> Result<()> {
        if !self.store.is_empty().await? {
            return Ok(());
        }

        let _guard = self.load_lock.lock().await;
        // Another caller may have loaded the store while we waited.
        if self.store.is_empty().await? {
            warn!("Store is empty, fetching feed on demand");
            self.refresh().await?;
        }
        Ok(())
    }

    /// All stored epochs in chronological order.
    pub async fn list_epochs(&self) -> Result<Vec<String>> {
        self.ensure_loaded().await?;
        self.store.list().await
    }

    /// The state vector stored under `epoch`.
    pub async fn get_epoch(&self, epoch: &str) -> Result<StateVector> {
        self.ensure_loaded().await?;
        self.store.get(epoch).await
    }

    /// Geodetic position and place name at `epoch`.
    pub async fn get_location(&self, epoch: &str) -> Result<Location> {
        let sv = self.get_epoch(epoch).await?;
        self.locate(&sv).await
    }

    /// Speed at `epoch` in km/h.
    pub async fn get_speed(&self, epoch: &str) -> Result<f64> {
        Ok(self.get_epoch(epoch).await?.speed_kmh())
    }

    /// Location at the stored epoch closest to the current time.
    pub async fn get_now(&self) -> Result<Location> {
        self.nearest_to(Utc::now()).await
    }

    /// Location at the stored epoch closest to `at`.
    pub async fn nearest_to(&self, at: DateTime<Utc>) -> Result<Location> {
        let epochs = self.list_epochs().await?;
        let epoch = nearest_epoch(epochs.iter().map(String::as_str), at).ok_or(IssError::NoData)?;
        debug!(epoch, at = %at, "Nearest epoch");
        self.get_location(epoch).await
    }

    async fn locate(&self, sv: &StateVector) -> Result<Location> {
        let at = parse_epoch(&sv.epoch)?;
        let position = eci_to_geodetic(sv.position, at);

        let geoposition = match self
            .geocoder
            .reverse(position.latitude, position.longitude)
            .await
        {
            Ok(name) => name,
            Err(IssError::GeocodeMiss { .. }) => OCEAN_PLACEHOLDER.to_string(),
            Err(e) => {
                warn!(error = %e, "Reverse geocoding failed");
                UNKNOWN_LOCATION_PLACEHOLDER.to_string()
            }
        };

        Ok(Location {
            epoch: sv.epoch.clone(),
            position,
            geoposition,
        })
    }
}
