//! Camera target state and follow-mode input interception.
//!
//! Manual navigation goes through a handler set with two variants:
//! pass-through while the user controls the camera, suppressed while follow
//! mode owns the target. Range stays user-controlled in both.

use crate::track::TrackState;

pub const MIN_RANGE_M: f64 = 1.0e5;
pub const MAX_RANGE_M: f64 = 1.0e8;

/// Look-at camera: a target on the surface plus eye distance and
/// orientation. Range is the zoom; it is never written by follow logic.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    pub latitude: f64,
    pub longitude: f64,
    pub range: f64,
    pub heading: f64,
    pub tilt: f64,
}

impl Camera {
    pub fn new(latitude: f64, longitude: f64, range: f64) -> Self {
        Self { latitude, longitude, range, heading: 0.0, tilt: 0.0 }
    }

    pub fn zoom_by(&mut self, factor: f64) {
        self.range = (self.range * factor).clamp(MIN_RANGE_M, MAX_RANGE_M);
    }
}

fn wrap_longitude(lon: f64) -> f64 {
    (lon + 180.0).rem_euclid(360.0) - 180.0
}

/// The interceptable navigation capabilities, as plain function pointers so
/// a restored set compares identical to the originally captured one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CameraHandlers {
    pub pan_or_drag: fn(&mut Camera, f64, f64),
    pub secondary_drag: fn(&mut Camera, f64),
    pub tilt: fn(&mut Camera, f64),
}

fn pan_camera(camera: &mut Camera, dlon: f64, dlat: f64) {
    camera.longitude = wrap_longitude(camera.longitude + dlon);
    camera.latitude = (camera.latitude + dlat).clamp(-90.0, 90.0);
}

fn rotate_camera(camera: &mut Camera, dheading: f64) {
    camera.heading = (camera.heading + dheading).rem_euclid(360.0);
}

fn tilt_camera(camera: &mut Camera, dtilt: f64) {
    camera.tilt = (camera.tilt + dtilt).clamp(0.0, 90.0);
}

fn ignore_drag(_camera: &mut Camera, _a: f64, _b: f64) {}

fn ignore_axis(_camera: &mut Camera, _delta: f64) {}

impl CameraHandlers {
    pub fn pass_through() -> Self {
        Self { pan_or_drag: pan_camera, secondary_drag: rotate_camera, tilt: tilt_camera }
    }

    pub fn suppressed() -> Self {
        Self { pan_or_drag: ignore_drag, secondary_drag: ignore_axis, tilt: ignore_axis }
    }
}

/// Exactly one variant is live at a time; the pass-through set is carried
/// through the suppressed state, so a restore can only ever hand back the
/// originally captured handlers.
enum ActiveHandlers {
    PassThrough(CameraHandlers),
    Suppressed { saved: CameraHandlers },
}

/// Reconciles the camera target with the track state and swaps the handler
/// variant when follow mode changes.
pub struct CameraSync {
    active: ActiveHandlers,
}

impl Default for CameraSync {
    fn default() -> Self {
        Self::new()
    }
}

impl CameraSync {
    pub fn new() -> Self {
        Self { active: ActiveHandlers::PassThrough(CameraHandlers::pass_through()) }
    }

    /// The handler set drag input should currently be routed through.
    pub fn handlers(&self) -> CameraHandlers {
        match self.active {
            ActiveHandlers::PassThrough(handlers) => handlers,
            ActiveHandlers::Suppressed { .. } => CameraHandlers::suppressed(),
        }
    }

    /// Flips follow mode. Entering follow suppresses manual drag input and
    /// snaps the target onto the satellite; leaving it restores the captured
    /// handlers and leaves the camera where it is.
    pub fn toggle_follow(&mut self, state: &mut TrackState, camera: &mut Camera) {
        state.follow = !state.follow;

        let saved = match self.active {
            ActiveHandlers::PassThrough(handlers) => handlers,
            ActiveHandlers::Suppressed { saved } => saved,
        };

        if state.follow {
            self.active = ActiveHandlers::Suppressed { saved };
            self.on_tick(state, camera);
        } else {
            self.active = ActiveHandlers::PassThrough(saved);
        }
    }

    /// Recenters the target on the current position. Range, heading and tilt
    /// are deliberately untouched; zoom stays with the user in follow mode.
    pub fn on_tick(&self, state: &TrackState, camera: &mut Camera) {
        camera.latitude = state.current.latitude;
        camera.longitude = state.current.longitude;
    }
}
