//! Cartesian vectors and state vectors.

use serde::{Deserialize, Serialize};

use crate::constants::SECONDS_PER_HOUR;

/// A Cartesian triple. Units depend on context: km for position, km/s for velocity.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vector3 {
    /// X component
    pub x: f64,
    /// Y component
    pub y: f64,
    /// Z component
    pub z: f64,
}

impl Vector3 {
    /// Creates a vector from its components.
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Euclidean norm.
    pub fn magnitude(&self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }
}

/// Position and velocity of the station at one epoch, in the feed's
/// Earth-centred inertial frame (EME2000 / J2000).
///
/// Immutable once parsed: the store hands out clones and a refresh
/// replaces entries wholesale.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StateVector {
    /// Epoch string exactly as published, e.g. `2024-047T12:00:00.000Z`
    pub epoch: String,
    /// Position in km
    pub position: Vector3,
    /// Velocity in km/s
    pub velocity: Vector3,
}

impl StateVector {
    /// Creates a state vector.
    pub fn new(epoch: impl Into<String>, position: Vector3, velocity: Vector3) -> Self {
        Self {
            epoch: epoch.into(),
            position,
            velocity,
        }
    }

    /// Speed in km/s.
    pub fn speed_kms(&self) -> f64 {
        self.velocity.magnitude()
    }

    /// Speed in km/h.
    pub fn speed_kmh(&self) -> f64 {
        self.speed_kms() * SECONDS_PER_HOUR
    }
}
