//! Two-line element set handling.
//!
//! Parses a NORAD TLE once at startup into propagation constants and samples
//! geodetic positions from it at arbitrary times.

use chrono::{DateTime, Utc};
use sgp4::Constants;

use crate::coords::{eci_to_geodetic, greenwich_mean_sidereal_time};
use crate::error::Error;
use crate::geodetic::GeodeticPosition;

pub fn datetime_to_minutes(dt: &sgp4::chrono::NaiveDateTime) -> f64 {
    dt.and_utc().timestamp() as f64 / 60.0
}

/// A tracked satellite: the parsed orbital elements plus the derived
/// propagation constants. Propagation is a pure function of (constants,
/// time); nothing here changes after construction.
#[derive(Debug)]
pub struct Satellite {
    pub name: String,
    pub constants: Constants,
    pub epoch_minutes: f64,
    pub inclination_deg: f64,
}

impl Satellite {
    /// Parses the two element lines. Any format or checksum problem is
    /// fatal; the caller is expected to surface it before scheduling starts.
    pub fn from_tle(name: &str, line1: &str, line2: &str) -> Result<Self, Error> {
        let elements = sgp4::Elements::from_tle(
            Some(name.to_string()),
            line1.as_bytes(),
            line2.as_bytes(),
        )
        .map_err(|e| Error::MalformedElements(e.to_string()))?;

        let constants = Constants::from_elements(&elements)
            .map_err(|e| Error::MalformedElements(e.to_string()))?;

        Ok(Self {
            name: elements.object_name.clone().unwrap_or_else(|| name.to_string()),
            constants,
            epoch_minutes: datetime_to_minutes(&elements.datetime),
            inclination_deg: elements.inclination,
        })
    }

    /// Geodetic position at `time`: SGP4 prediction in the inertial frame,
    /// rotated to Earth-fixed through GMST.
    pub fn position_at(&self, time: DateTime<Utc>) -> Result<GeodeticPosition, Error> {
        let minutes_since_epoch = time.timestamp() as f64 / 60.0 - self.epoch_minutes;
        let prediction = self
            .constants
            .propagate(sgp4::MinutesSinceEpoch(minutes_since_epoch))
            .map_err(|e| Error::Propagation { time, reason: e.to_string() })?;

        let gmst = greenwich_mean_sidereal_time(time);
        Ok(eci_to_geodetic(&prediction.position, gmst))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config;
    use chrono::TimeZone;

    fn kalamsat() -> Satellite {
        Satellite::from_tle(
            config::DEFAULT_SATELLITE_NAME,
            config::DEFAULT_TLE_LINE1,
            config::DEFAULT_TLE_LINE2,
        )
        .unwrap()
    }

    #[test]
    fn parses_builtin_elements() {
        let sat = kalamsat();
        assert_eq!(sat.name, config::DEFAULT_SATELLITE_NAME);
        assert!((sat.inclination_deg - 98.8192).abs() < 1e-4);
    }

    #[test]
    fn rejects_malformed_lines() {
        let err = Satellite::from_tle("BROKEN", "1 garbage", "2 garbage").unwrap_err();
        assert!(matches!(err, Error::MalformedElements(_)));
    }

    #[test]
    fn position_near_epoch_is_low_earth_orbit() {
        let sat = kalamsat();
        // Element set epoch: 2020 day 277.73, i.e. 2020-10-03 ~17:34 UTC.
        let t = Utc.with_ymd_and_hms(2020, 10, 3, 17, 34, 0).unwrap();
        let p = sat.position_at(t).unwrap();
        assert!(p.latitude.abs() <= sat.inclination_deg);
        assert!((-180.0..=180.0).contains(&p.longitude));
        assert!(p.altitude > 200_000.0 && p.altitude < 800_000.0);
    }

    #[test]
    fn positions_advance_along_the_orbit() {
        let sat = kalamsat();
        let t = Utc.with_ymd_and_hms(2020, 10, 3, 17, 34, 0).unwrap();
        let a = sat.position_at(t).unwrap();
        let b = sat.position_at(t + chrono::Duration::minutes(1)).unwrap();
        assert_ne!(a, b);
    }
}
