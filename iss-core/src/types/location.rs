//! Earth-fixed positions.

use serde::{Deserialize, Serialize};

/// A WGS-84 geodetic position.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GeodeticPosition {
    /// Geodetic latitude in degrees, north positive
    pub latitude: f64,
    /// Longitude in degrees, east positive, in (-180, 180]
    pub longitude: f64,
    /// Height above the ellipsoid in km
    pub altitude: f64,
}

/// A geodetic position with the place name found under it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Location {
    /// Epoch the position was derived from
    pub epoch: String,
    /// Where the station is
    #[serde(flatten)]
    pub position: GeodeticPosition,
    /// Reverse-geocoded place name, or the ocean placeholder
    pub geoposition: String,
}
