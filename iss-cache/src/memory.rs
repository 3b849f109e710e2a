//! In-memory epoch store.

use std::collections::BTreeMap;

use async_trait::async_trait;
use parking_lot::RwLock;
use serde::Serialize;
use tracing::debug;

use iss_core::error::{IssError, Result};
use iss_core::traits::EpochStore;
use iss_core::types::StateVector;

/// In-memory store of state vectors.
///
/// Thread-safe; reads take a shared lock. Keys are kept ordered, and since
/// CCSDS day-of-year epochs sort lexicographically in time order, `list()`
/// is chronological.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<BTreeMap<String, StateVector>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-filled with `vectors`.
    pub fn with_vectors(vectors: impl IntoIterator<Item = StateVector>) -> Self {
        let entries = vectors
            .into_iter()
            .map(|sv| (sv.epoch.clone(), sv))
            .collect();
        Self {
            entries: RwLock::new(entries),
        }
    }

    /// Returns store statistics.
    pub fn stats(&self) -> StoreStats {
        let entries = self.entries.read();
        StoreStats {
            total_entries: entries.len(),
            first_epoch: entries.keys().next().cloned(),
            last_epoch: entries.keys().next_back().cloned(),
        }
    }
}

#[async_trait]
impl EpochStore for MemoryStore {
    async fn put(&self, epoch: &str, vector: StateVector) -> Result<()> {
        self.entries.write().insert(epoch.to_string(), vector);
        Ok(())
    }

    async fn get(&self, epoch: &str) -> Result<StateVector> {
        self.entries
            .read()
            .get(epoch)
            .cloned()
            .ok_or_else(|| IssError::EpochNotFound(epoch.to_string()))
    }

    async fn list(&self) -> Result<Vec<String>> {
        Ok(self.entries.read().keys().cloned().collect())
    }

    async fn clear(&self) -> Result<()> {
        self.entries.write().clear();
        Ok(())
    }

    async fn len(&self) -> Result<usize> {
        Ok(self.entries.read().len())
    }

    async fn replace_all(&self, vectors: Vec<StateVector>) -> Result<usize> {
        let fresh: BTreeMap<String, StateVector> = vectors
            .into_iter()
            .map(|sv| (sv.epoch.clone(), sv))
            .collect();
        let count = fresh.len();
        // Single swap so readers never see a half-filled store.
        *self.entries.write() = fresh;
        debug!(count, "Replaced in-memory store contents");
        Ok(count)
    }
}

/// Store statistics.
#[derive(Clone, Debug, Serialize)]
pub struct StoreStats {
    /// Number of stored epochs
    pub total_entries: usize,
    /// Earliest stored epoch
    pub first_epoch: Option<String>,
    /// Latest stored epoch
    pub last_epoch: Option<String>,
}
