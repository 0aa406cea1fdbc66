//! Orbit window sampling.
//!
//! Builds the drawn past/future ground-track window once at startup. The
//! window is not re-sampled afterwards; only the live marker moves, so over a
//! long session the marker slowly walks off the drawn path.

use chrono::{DateTime, Duration, Utc};
use log::warn;

use crate::error::Error;
use crate::geodetic::GeodeticPosition;

/// Sampled orbit track around a center time. `past` runs oldest to current,
/// `future` current to newest; the center sample is shared by both and also
/// kept standalone as the initial live position.
pub struct OrbitWindow {
    pub past: Vec<GeodeticPosition>,
    pub future: Vec<GeodeticPosition>,
    pub current: GeodeticPosition,
}

/// Samples `2 * half_window + 1` points at `step_seconds` spacing centered on
/// `center_time`, strictly increasing in time. A sample the propagator
/// rejects is reported and omitted from both sequences; a rejected center
/// sample is fatal since there is no position left to seed tracking with.
pub fn sample<F>(
    mut propagate: F,
    center_time: DateTime<Utc>,
    step_seconds: i64,
    half_window: usize,
) -> Result<OrbitWindow, Error>
where
    F: FnMut(DateTime<Utc>) -> Result<GeodeticPosition, Error>,
{
    let half = half_window as i64;
    let mut past = Vec::with_capacity(half_window + 1);
    let mut future = Vec::with_capacity(half_window + 1);
    let mut current = None;

    for offset in -half..=half {
        let time = center_time + Duration::seconds(offset * step_seconds);
        let position = match propagate(time) {
            Ok(position) => position,
            Err(err) if offset == 0 => return Err(err),
            Err(err) => {
                warn!("skipping orbit sample at {time}: {err}");
                continue;
            }
        };

        match offset.cmp(&0) {
            std::cmp::Ordering::Less => past.push(position),
            std::cmp::Ordering::Greater => future.push(position),
            std::cmp::Ordering::Equal => {
                past.push(position);
                future.push(position);
                current = Some(position);
            }
        }
    }

    let current = match current {
        Some(position) => position,
        None => {
            return Err(Error::Propagation {
                time: center_time,
                reason: "no sample at window center".to_string(),
            })
        }
    };

    Ok(OrbitWindow { past, future, current })
}
