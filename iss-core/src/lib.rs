//! # ISS Tracker Core
//!
//! Core types, errors, and traits shared by every ISS tracker crate.
//!
//! - **Types**: state vectors, epochs, geodetic positions, feed metadata
//! - **Errors**: a single error enum covering feed, store and lookup failures
//! - **Geodesy**: ECI → ECEF → WGS-84 latitude/longitude/altitude
//! - **Traits**: the seams between the service and its collaborators
//!   (epoch store, feed source, reverse geocoder)
//!
//! ## Example
//!
//! ```rust
//! use iss_core::{StateVector, Vector3};
//!
//! let sv = StateVector::new(
//!     "2024-047T12:00:00.000Z",
//!     Vector3::new(-4530.2, 2104.6, 4514.9),
//!     Vector3::new(-3.42, -6.55, -0.38),
//! );
//! assert!(sv.speed_kmh() > 25_000.0);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, clippy::all)]

pub mod constants;
pub mod error;
pub mod geodesy;
pub mod traits;
pub mod types;

// Re-export commonly used items at crate root
pub use constants::*;
pub use error::{IssError, Result};
pub use traits::*;
pub use types::*;
