//! # ISS Feed
//!
//! Downloads NASA's ISS ephemeris (CCSDS OEM, XML) and turns it into
//! [`iss_core::StateVector`]s.
//!
//! ```rust,ignore
//! use iss_feed::{FeedClient, FeedConfig};
//!
//! let feed = FeedClient::with_config(FeedConfig::default())?;
//! let ephemeris = feed.download().await?;
//! println!("{} vectors from {}", ephemeris.len(), feed.url());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

mod client;
mod oem;

pub use client::{FeedClient, FeedConfig};
pub use oem::parse_oem;
