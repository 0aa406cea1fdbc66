//! Static configuration: tracked satellite, refresh cadence, orbit window,
//! and ground-station markers.

use egui::Color32;

pub const DEFAULT_SATELLITE_NAME: &str = "KALAMSAT-V2";
pub const DEFAULT_TLE_LINE1: &str =
    "1 43948U 19006B   20277.73207743  .00001496  00000-0  39683-4 0  9998";
pub const DEFAULT_TLE_LINE2: &str =
    "2 43948 098.8192 322.4252 0003057 273.9419 086.1473 15.40535847095080";

#[derive(Clone)]
pub struct GroundStation {
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    pub color: Color32,
}

/// Deep Space Network stations shown alongside the track.
pub fn default_ground_stations() -> Vec<GroundStation> {
    [
        ("Goldstone, USA", 35.1603, -116.8736),
        ("Canberra, Australia", -35.2236, 148.9831),
        ("Madrid, Spain", 40.2403, -4.2514),
    ]
    .into_iter()
    .map(|(name, lat, lon)| GroundStation {
        name: name.to_string(),
        lat,
        lon,
        color: Color32::WHITE,
    })
    .collect()
}

pub struct TrackerConfig {
    pub satellite_name: String,
    pub tle_line1: String,
    pub tle_line2: String,
    pub refresh_period_seconds: i64,
    pub orbit_step_seconds: i64,
    pub orbit_half_window: usize,
    pub initial_range_m: f64,
    pub ground_stations: Vec<GroundStation>,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            satellite_name: DEFAULT_SATELLITE_NAME.to_string(),
            tle_line1: DEFAULT_TLE_LINE1.to_string(),
            tle_line2: DEFAULT_TLE_LINE2.to_string(),
            refresh_period_seconds: 5,
            orbit_step_seconds: 60,
            orbit_half_window: 98,
            initial_range_m: 4.0e7,
            ground_stations: default_ground_stations(),
        }
    }
}
