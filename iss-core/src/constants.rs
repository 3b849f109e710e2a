//! Constants for the ISS tracker.
//!
//! Earth model values are WGS-84; sidereal time coefficients are the
//! IAU 1982 GMST expression.

// ═══════════════════════════════════════════════════════════════════════════════
// DATA SOURCES
// ═══════════════════════════════════════════════════════════════════════════════

/// NASA's public ISS ephemeris in CCSDS OEM XML (J2000 frame).
pub const DEFAULT_FEED_URL: &str =
    "https://nasa-public-data.s3.amazonaws.com/iss-coords/current/ISS_OEM/ISS.OEM_J2K_EPH.xml";

/// Public Nominatim instance used for reverse geocoding.
pub const DEFAULT_GEOCODER_URL: &str = "https://nominatim.openstreetmap.org";

/// User agent sent to Nominatim (its usage policy requires one).
pub const DEFAULT_GEOCODER_USER_AGENT: &str = "iss_tracker";

/// Nominatim detail level: 15 is roughly "neighbourhood / town".
pub const GEOCODER_ZOOM: u8 = 15;

/// Default timeout for outbound HTTP requests, in seconds.
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

/// Place name reported when the geocoder has nothing under the station.
pub const OCEAN_PLACEHOLDER: &str = "Astronaut over ocean";

/// Place name reported when the geocoder could not be asked.
pub const UNKNOWN_LOCATION_PLACEHOLDER: &str = "Unknown location";

// ═══════════════════════════════════════════════════════════════════════════════
// TIME
// ═══════════════════════════════════════════════════════════════════════════════

/// CCSDS day-of-year epoch layout, e.g. `2024-047T12:00:00.000Z`.
pub const EPOCH_FORMAT: &str = "%Y-%jT%H:%M:%S%.fZ";

/// Seconds in one hour, for km/s → km/h.
pub const SECONDS_PER_HOUR: f64 = 3600.0;

/// Seconds in one day.
pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// Julian date of the Unix epoch (1970-01-01T00:00:00Z).
pub const JD_UNIX_EPOCH: f64 = 2_440_587.5;

/// Julian date of J2000.0 (2000-01-01T12:00:00).
pub const JD_J2000: f64 = 2_451_545.0;

/// Days per Julian century.
pub const DAYS_PER_JULIAN_CENTURY: f64 = 36_525.0;

// ═══════════════════════════════════════════════════════════════════════════════
// EARTH MODEL (WGS-84)
// ═══════════════════════════════════════════════════════════════════════════════

/// Equatorial radius in kilometres.
pub const WGS84_A_KM: f64 = 6378.137;

/// Flattening.
pub const WGS84_F: f64 = 1.0 / 298.257_223_563;

/// First eccentricity squared, `f * (2 - f)`.
pub const WGS84_E2: f64 = WGS84_F * (2.0 - WGS84_F);

/// GMST at J2000.0 in degrees.
pub const GMST_J2000_DEG: f64 = 280.460_618_37;

/// Earth rotation in degrees per solar day (sidereal rate).
pub const GMST_RATE_DEG_PER_DAY: f64 = 360.985_647_366_29;
