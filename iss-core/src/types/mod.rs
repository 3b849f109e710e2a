//! Domain types for the ISS tracker.
//!
//! - [`StateVector`]: position + velocity of the station at one epoch
//! - [`Vector3`]: Cartesian triple (km or km/s)
//! - [`GeodeticPosition`]: WGS-84 latitude/longitude/altitude
//! - [`Ephemeris`]: one parsed download of the OEM feed
//! - epoch helpers: parsing, formatting and nearest-epoch search

mod epoch;
mod ephemeris;
mod location;
mod vector;

pub use epoch::*;
pub use ephemeris::*;
pub use location::*;
pub use vector::*;
