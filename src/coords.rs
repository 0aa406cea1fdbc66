//! Earth orientation and coordinate-frame conversions.
//!
//! Provides Greenwich Mean Sidereal Time (GMST) and the conversion from the
//! propagator's inertial frame to geodetic latitude/longitude/altitude.

use std::f64::consts::PI;
use chrono::{DateTime, Utc};

use crate::geodetic::GeodeticPosition;

pub const SECONDS_PER_DAY: f64 = 86400.0;
pub const DAYS_PER_JULIAN_CENTURY: f64 = 36525.0;
pub const GMST_BASE_DEG: f64 = 280.46061837;
pub const GMST_ROTATION_PER_DAY: f64 = 360.98564736629;
pub const GMST_CORRECTION: f64 = 0.000387933;

pub const EARTH_EQUATORIAL_RADIUS_KM: f64 = 6378.137;
pub const EARTH_FLATTENING: f64 = 1.0 / 298.257223563;

pub fn greenwich_mean_sidereal_time(timestamp: DateTime<Utc>) -> f64 {
    let j2000 = DateTime::parse_from_rfc3339("2000-01-01T12:00:00Z")
        .unwrap()
        .with_timezone(&Utc);
    let days_since_j2000 = (timestamp - j2000).num_milliseconds() as f64 / (1000.0 * SECONDS_PER_DAY);
    let centuries = days_since_j2000 / DAYS_PER_JULIAN_CENTURY;
    let gmst_degrees = GMST_BASE_DEG
        + GMST_ROTATION_PER_DAY * days_since_j2000
        + GMST_CORRECTION * centuries * centuries
        - centuries * centuries * centuries / 38710000.0;
    let gmst_normalized = gmst_degrees.rem_euclid(360.0);
    gmst_normalized.to_radians()
}

fn wrap_pi(angle: f64) -> f64 {
    (angle + PI).rem_euclid(2.0 * PI) - PI
}

/// Converts an inertial position (km, propagator output frame) at the given
/// sidereal angle into a geodetic position. Latitude is solved iteratively
/// against the ellipsoid; altitude comes out in meters.
pub fn eci_to_geodetic(position_km: &[f64; 3], gmst: f64) -> GeodeticPosition {
    let [x, y, z] = *position_km;
    let theta = y.atan2(x);
    let lon = wrap_pi(theta - gmst);

    let r = (x * x + y * y).sqrt();
    let e2 = EARTH_FLATTENING * (2.0 - EARTH_FLATTENING);

    let mut lat = z.atan2(r);
    let mut c = 1.0;
    for _ in 0..10 {
        let phi = lat;
        c = 1.0 / (1.0 - e2 * phi.sin() * phi.sin()).sqrt();
        lat = (z + EARTH_EQUATORIAL_RADIUS_KM * c * e2 * phi.sin()).atan2(r);
        if (lat - phi).abs() < 1e-10 {
            break;
        }
    }

    let altitude_km = r / lat.cos() - EARTH_EQUATORIAL_RADIUS_KM * c;

    GeodeticPosition {
        latitude: lat.to_degrees(),
        longitude: lon.to_degrees(),
        altitude: altitude_km * 1000.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn gmst_at_j2000_epoch() {
        let t = Utc.with_ymd_and_hms(2000, 1, 1, 12, 0, 0).unwrap();
        let gmst = greenwich_mean_sidereal_time(t);
        assert!((gmst - GMST_BASE_DEG.to_radians()).abs() < 1e-9);
    }

    #[test]
    fn gmst_repeats_after_one_sidereal_day() {
        let t = Utc.with_ymd_and_hms(2020, 10, 3, 0, 0, 0).unwrap();
        let later = t + chrono::Duration::milliseconds(86_164_091);
        let a = greenwich_mean_sidereal_time(t);
        let b = greenwich_mean_sidereal_time(later);
        assert!(wrap_pi(b - a).abs() < 1e-3);
    }

    #[test]
    fn equatorial_point_at_prime_meridian() {
        let p = eci_to_geodetic(&[6778.137, 0.0, 0.0], 0.0);
        assert!(p.latitude.abs() < 1e-9);
        assert!(p.longitude.abs() < 1e-9);
        assert!((p.altitude - 400_000.0).abs() < 1.0);
    }

    #[test]
    fn longitude_follows_earth_rotation() {
        let p = eci_to_geodetic(&[6778.137, 0.0, 0.0], std::f64::consts::FRAC_PI_2);
        assert!((p.longitude + 90.0).abs() < 1e-9);
    }

    #[test]
    fn longitude_wraps_to_signed_range() {
        let p = eci_to_geodetic(&[6778.137, 0.0, 0.0], 1.5 * PI);
        assert!((p.longitude - 90.0).abs() < 1e-9);
    }
}
