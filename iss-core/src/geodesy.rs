//! ECI → geodetic conversion.
//!
//! The feed publishes positions in an Earth-centred inertial frame. To get
//! a point on the map we rotate by Greenwich mean sidereal time at the epoch
//! (ECI → ECEF) and then invert the WGS-84 ellipsoid (ECEF → lat/lon/alt).
//! Precession, nutation and polar motion are ignored, which leaves an error
//! of a few tenths of a degree in longitude.

use chrono::{DateTime, Utc};

use crate::constants::*;
use crate::types::{GeodeticPosition, Vector3};

const MAX_ITERATIONS: usize = 10;
const LATITUDE_TOLERANCE_RAD: f64 = 1e-12;

/// Julian date of a UTC instant.
pub fn julian_date(at: DateTime<Utc>) -> f64 {
    let seconds = at.timestamp() as f64 + f64::from(at.timestamp_subsec_nanos()) * 1e-9;
    seconds / SECONDS_PER_DAY + JD_UNIX_EPOCH
}

/// Greenwich mean sidereal time in degrees, normalised to [0, 360).
pub fn gmst_degrees(at: DateTime<Utc>) -> f64 {
    let d = julian_date(at) - JD_J2000;
    let t = d / DAYS_PER_JULIAN_CENTURY;
    let gmst = GMST_J2000_DEG + GMST_RATE_DEG_PER_DAY * d + 0.000_387_933 * t * t
        - t * t * t / 38_710_000.0;
    gmst.rem_euclid(360.0)
}

/// Rotates an inertial position into the Earth-fixed frame at `at`.
pub fn eci_to_ecef(position: Vector3, at: DateTime<Utc>) -> Vector3 {
    let theta = gmst_degrees(at).to_radians();
    let (sin, cos) = theta.sin_cos();
    Vector3::new(
        cos * position.x + sin * position.y,
        -sin * position.x + cos * position.y,
        position.z,
    )
}

/// Converts an Earth-fixed position (km) to WGS-84 geodetic coordinates.
pub fn ecef_to_geodetic(position: Vector3) -> GeodeticPosition {
    let Vector3 { x, y, z } = position;
    let p = x.hypot(y);
    let longitude = y.atan2(x);

    let mut latitude = z.atan2(p * (1.0 - WGS84_E2));
    let mut altitude = 0.0;

    for _ in 0..MAX_ITERATIONS {
        let sin_lat = latitude.sin();
        let n = WGS84_A_KM / (1.0 - WGS84_E2 * sin_lat * sin_lat).sqrt();
        altitude = if latitude.cos().abs() > 1e-10 {
            p / latitude.cos() - n
        } else {
            z.abs() - n * (1.0 - WGS84_E2)
        };
        let next = z.atan2(p * (1.0 - WGS84_E2 * n / (n + altitude)));
        let converged = (next - latitude).abs() < LATITUDE_TOLERANCE_RAD;
        latitude = next;
        if converged {
            break;
        }
    }

    GeodeticPosition {
        latitude: latitude.to_degrees(),
        longitude: longitude.to_degrees(),
        altitude,
    }
}

/// Converts an inertial position at `at` to WGS-84 geodetic coordinates.
pub fn eci_to_geodetic(position: Vector3, at: DateTime<Utc>) -> GeodeticPosition {
    ecef_to_geodetic(eci_to_ecef(position, at))
}
