//! Live tracking state and the periodic refresh that drives it.

use chrono::{DateTime, Duration, Utc};
use log::warn;

use crate::error::Error;
use crate::geodetic::GeodeticPosition;
use crate::tle::Satellite;

/// The single source of truth the renderer reads: where the satellite is
/// right now, whether the camera follows it, and when the position was last
/// refreshed. `generation` counts accepted samples so consumers can detect
/// updates without watching individual fields.
pub struct TrackState {
    pub current: GeodeticPosition,
    pub follow: bool,
    pub last_sample: DateTime<Utc>,
    generation: u64,
}

impl TrackState {
    pub fn new(initial: GeodeticPosition, time: DateTime<Utc>) -> Self {
        Self { current: initial, follow: false, last_sample: time, generation: 0 }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    fn accept(&mut self, position: GeodeticPosition, time: DateTime<Utc>) {
        self.current.latitude = position.latitude;
        self.current.longitude = position.longitude;
        self.current.altitude = position.altitude;
        self.last_sample = time;
        self.generation += 1;
    }
}

/// Cooperative fixed-period timer serviced from the UI update loop. After a
/// tick fires the next one is due a full period from `now`, so a stalled
/// process resumes with a single tick rather than a burst.
pub struct RefreshScheduler {
    period: Duration,
    next_due: DateTime<Utc>,
}

impl RefreshScheduler {
    pub fn new(period_seconds: i64, now: DateTime<Utc>) -> Self {
        let period = Duration::seconds(period_seconds);
        Self { period, next_due: now + period }
    }

    pub fn poll(&mut self, now: DateTime<Utc>) -> bool {
        if now < self.next_due {
            return false;
        }
        self.next_due = now + self.period;
        true
    }
}

/// Owns the satellite, the refresh timer, and the track state; one `poll`
/// per UI update pass keeps the displayed position current.
pub struct Tracker {
    satellite: Satellite,
    pub state: TrackState,
    scheduler: RefreshScheduler,
}

impl Tracker {
    pub fn new(satellite: Satellite, initial: GeodeticPosition, period_seconds: i64, now: DateTime<Utc>) -> Self {
        Self {
            satellite,
            state: TrackState::new(initial, now),
            scheduler: RefreshScheduler::new(period_seconds, now),
        }
    }

    pub fn satellite(&self) -> &Satellite {
        &self.satellite
    }

    /// Runs one refresh tick if the period has elapsed. Returns whether the
    /// displayed position advanced; a skipped or failed tick leaves the
    /// prior position in place.
    pub fn poll(&mut self, now: DateTime<Utc>) -> bool {
        if !self.scheduler.poll(now) {
            return false;
        }
        let sample = self.satellite.position_at(now);
        self.apply_sample(sample, now)
    }

    fn apply_sample(&mut self, sample: Result<GeodeticPosition, Error>, now: DateTime<Utc>) -> bool {
        match sample {
            Ok(position) => {
                self.state.accept(position, now);
                true
            }
            Err(err) => {
                warn!("refresh tick skipped: {err}");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config;
    use chrono::TimeZone;

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2020, 10, 3, 17, 34, 0).unwrap()
    }

    fn tracker() -> Tracker {
        let satellite = Satellite::from_tle(
            config::DEFAULT_SATELLITE_NAME,
            config::DEFAULT_TLE_LINE1,
            config::DEFAULT_TLE_LINE2,
        )
        .unwrap();
        let initial = satellite.position_at(start()).unwrap();
        Tracker::new(satellite, initial, 5, start())
    }

    #[test]
    fn scheduler_fires_once_per_period() {
        let mut scheduler = RefreshScheduler::new(5, start());
        assert!(!scheduler.poll(start()));
        assert!(!scheduler.poll(start() + Duration::seconds(4)));
        assert!(scheduler.poll(start() + Duration::seconds(5)));
        assert!(!scheduler.poll(start() + Duration::seconds(6)));
        assert!(scheduler.poll(start() + Duration::seconds(10)));
    }

    #[test]
    fn stalled_scheduler_does_not_burst() {
        let mut scheduler = RefreshScheduler::new(5, start());
        let late = start() + Duration::seconds(60);
        assert!(scheduler.poll(late));
        assert!(!scheduler.poll(late + Duration::seconds(1)));
        assert!(scheduler.poll(late + Duration::seconds(5)));
    }

    #[test]
    fn poll_advances_position_on_period() {
        let mut tracker = tracker();
        assert!(!tracker.poll(start() + Duration::seconds(1)));
        assert_eq!(tracker.state.generation(), 0);

        assert!(tracker.poll(start() + Duration::seconds(30)));
        assert_eq!(tracker.state.generation(), 1);
        assert_eq!(tracker.state.last_sample, start() + Duration::seconds(30));
    }

    #[test]
    fn failed_sample_leaves_state_unchanged() {
        let mut tracker = tracker();
        let before = tracker.state.current;
        let now = start() + Duration::seconds(5);
        let failed = Err(Error::Propagation { time: now, reason: "decayed".to_string() });
        assert!(!tracker.apply_sample(failed, now));
        assert_eq!(tracker.state.current, before);
        assert_eq!(tracker.state.generation(), 0);
        assert_eq!(tracker.state.last_sample, start());
    }

    #[test]
    fn follow_flag_survives_refreshes() {
        let mut tracker = tracker();
        tracker.state.follow = true;
        assert!(tracker.poll(start() + Duration::seconds(10)));
        assert!(tracker.state.follow);
    }
}
