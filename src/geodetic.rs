//! Geodetic positions and human-readable coordinate formatting.

/// A position relative to the WGS ellipsoid. Latitude and longitude are in
/// degrees, altitude in meters above the ellipsoid.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeodeticPosition {
    pub latitude: f64,
    pub longitude: f64,
    pub altitude: f64,
}

impl GeodeticPosition {
    pub fn new(latitude: f64, longitude: f64, altitude: f64) -> Self {
        Self { latitude, longitude, altitude }
    }
}

/// Formats signed degrees as `DD° MM' SS.SS" H`, picking the hemisphere
/// letter from the sign. Minutes and seconds come from successive
/// fractional-part extraction, seconds rounded to two decimals.
pub fn degrees_to_text(deg: f64, positive: char, negative: char) -> String {
    let letter = if deg < 0.0 { negative } else { positive };
    let mut value = deg.abs();

    let degrees = value.floor();
    value = (value - degrees) * 60.0;

    let minutes = value.floor();
    value = (value - minutes) * 60.0;

    let seconds = (value * 100.0).round() / 100.0;

    format!("{}\u{b0} {}' {:.2}\" {}", degrees as u32, minutes as u32, seconds, letter)
}

/// Formats an altitude in meters as kilometers with two decimals, e.g.
/// `408.34km`.
pub fn altitude_to_text(meters: f64) -> String {
    format!("{}km", (meters / 10.0).round() / 100.0)
}
