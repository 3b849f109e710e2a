//! Test doubles for the feed and the geocoder.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use iss_core::error::{IssError, Result};
use iss_core::traits::{EphemerisSource, EpochStore, Geocoder};
use iss_core::types::{Ephemeris, StateVector, Vector3};

use crate::service::QueryService;

/// The three vectors of the sample feed, in feed order.
pub(crate) fn fixture_vectors() -> Vec<StateVector> {
    vec![
        StateVector::new(
            "2024-047T12:00:00.000Z",
            Vector3::new(-4530.2, 2104.6, 4514.9),
            Vector3::new(-3.42, -6.55, -0.38),
        ),
        StateVector::new(
            "2024-047T12:04:00.000Z",
            Vector3::new(-5225.3, 527.1, 4206.7),
            Vector3::new(-2.39, -6.63, -2.14),
        ),
        StateVector::new(
            "2024-047T12:08:00.000Z",
            Vector3::new(-5575.5, -1064.8, 3512.0),
            Vector3::new(-0.89, -6.52, -3.62),
        ),
    ]
}

pub(crate) fn service_with(
    store: impl EpochStore + 'static,
    source: impl EphemerisSource + 'static,
    geocoder: StubGeocoder,
) -> QueryService {
    QueryService::new(Arc::new(store), Arc::new(source), Arc::new(geocoder))
}

/// Feed that serves fixed vectors, or fails like an unreachable host.
pub(crate) struct StubSource {
    vectors: Option<Vec<StateVector>>,
}

impl StubSource {
    pub(crate) fn serving(vectors: Vec<StateVector>) -> Self {
        Self {
            vectors: Some(vectors),
        }
    }

    pub(crate) fn failing() -> Self {
        Self { vectors: None }
    }
}

#[async_trait]
impl EphemerisSource for StubSource {
    async fn fetch(&self) -> Result<Ephemeris> {
        match &self.vectors {
            Some(vectors) => Ok(Ephemeris {
                vectors: vectors.clone(),
                ..Default::default()
            }),
            None => Err(IssError::FetchFailed("connection refused".into())),
        }
    }
}

/// Feed that counts downloads and takes `delay` to answer each one.
pub(crate) struct CountingSource {
    vectors: Vec<StateVector>,
    delay: Duration,
    fetches: Arc<AtomicUsize>,
}

impl CountingSource {
    pub(crate) fn new(vectors: Vec<StateVector>, delay: Duration) -> Self {
        Self {
            vectors,
            delay,
            fetches: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub(crate) fn counter(&self) -> Arc<AtomicUsize> {
        self.fetches.clone()
    }
}

#[async_trait]
impl EphemerisSource for CountingSource {
    async fn fetch(&self) -> Result<Ephemeris> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(self.delay).await;
        Ok(Ephemeris {
            vectors: self.vectors.clone(),
            ..Default::default()
        })
    }
}

/// Store whose backend is unreachable.
pub(crate) struct DownStore;

impl DownStore {
    fn error() -> IssError {
        IssError::StoreUnavailable {
            attempts: 5,
            reason: "connection refused".into(),
        }
    }
}

#[async_trait]
impl EpochStore for DownStore {
    async fn put(&self, _epoch: &str, _vector: StateVector) -> Result<()> {
        Err(Self::error())
    }

    async fn get(&self, _epoch: &str) -> Result<StateVector> {
        Err(Self::error())
    }

    async fn list(&self) -> Result<Vec<String>> {
        Err(Self::error())
    }

    async fn clear(&self) -> Result<()> {
        Err(Self::error())
    }

    async fn len(&self) -> Result<usize> {
        Err(Self::error())
    }
}

pub(crate) enum StubGeocoder {
    Place(String),
    Miss,
    Failing,
}

impl StubGeocoder {
    pub(crate) fn place(name: &str) -> Self {
        Self::Place(name.into())
    }

    pub(crate) fn miss() -> Self {
        Self::Miss
    }

    pub(crate) fn failing() -> Self {
        Self::Failing
    }
}

#[async_trait]
impl Geocoder for StubGeocoder {
    async fn reverse(&self, latitude: f64, longitude: f64) -> Result<String> {
        match self {
            Self::Place(name) => Ok(name.clone()),
            Self::Miss => Err(IssError::GeocodeMiss {
                latitude,
                longitude,
            }),
            Self::Failing => Err(IssError::GeocodeFailed("HTTP 429".into())),
        }
    }
}
