//! # ISS Geocode
//!
//! Reverse geocoding of the sub-satellite point through Nominatim.

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

mod nominatim;

pub use nominatim::{NominatimClient, NominatimConfig};
