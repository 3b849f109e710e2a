//! One parsed download of the OEM feed.

use serde::{Deserialize, Serialize};

use super::vector::StateVector;

/// OEM header fields.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct OemHeader {
    /// When the ephemeris was generated
    pub creation_date: Option<String>,
    /// Producing organisation (e.g. `JSC`)
    pub originator: Option<String>,
}

/// OEM segment metadata.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct OemMetadata {
    /// Tracked object (e.g. `ISS`)
    pub object_name: Option<String>,
    /// International designator
    pub object_id: Option<String>,
    /// Central body
    pub center_name: Option<String>,
    /// Reference frame of the state vectors (e.g. `EME2000`)
    pub ref_frame: Option<String>,
    /// Time system of the epochs (e.g. `UTC`)
    pub time_system: Option<String>,
    /// First epoch covered
    pub start_time: Option<String>,
    /// Last epoch covered
    pub stop_time: Option<String>,
}

/// Everything one feed download yields.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Ephemeris {
    /// Document header
    pub header: OemHeader,
    /// Segment metadata
    pub metadata: OemMetadata,
    /// State vectors in feed order, epochs unique
    pub vectors: Vec<StateVector>,
}

impl Ephemeris {
    /// Number of state vectors.
    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    /// Returns true if the download held no state vectors.
    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }
}
