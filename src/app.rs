//! Application shell and eframe integration.
//!
//! Owns the tracking context (tracker, scene, camera, view modes) and the
//! update loop that services the refresh timer, reconciles the follow camera,
//! and draws the status panel plus the active view.

use chrono::Utc;
use eframe::egui;

use crate::camera::{Camera, CameraSync};
use crate::config::TrackerConfig;
use crate::drawing::{draw_globe_view, draw_map_view};
use crate::error::Error;
use crate::geodetic::{altitude_to_text, degrees_to_text};
use crate::sampler::sample;
use crate::scene::{build_scene, Scene};
use crate::tle::Satellite;
use crate::track::Tracker;
use crate::view::{ViewMode, ViewModeController};

pub struct App {
    tracker: Tracker,
    scene: Scene,
    camera: Camera,
    camera_sync: CameraSync,
    views: ViewModeController,
    seen_generation: u64,
    show_help: bool,
}

impl App {
    /// Builds the whole startup state: parsed elements, the sampled orbit
    /// window, the static scene, and the camera centered on the satellite.
    /// A malformed element set or an unsampleable center time fails here,
    /// before any refresh is scheduled.
    pub fn new(_cc: &eframe::CreationContext<'_>, config: TrackerConfig) -> Result<Self, Error> {
        let satellite =
            Satellite::from_tle(&config.satellite_name, &config.tle_line1, &config.tle_line2)?;

        let now = Utc::now();
        let window = sample(
            |t| satellite.position_at(t),
            now,
            config.orbit_step_seconds,
            config.orbit_half_window,
        )?;

        let scene = build_scene(&config.ground_stations, &window, &satellite.name);
        let camera = Camera::new(
            window.current.latitude,
            window.current.longitude,
            config.initial_range_m,
        );
        log::info!(
            "tracking {} with a \u{b1}{} min orbit window",
            satellite.name,
            config.orbit_half_window * config.orbit_step_seconds as usize / 60
        );

        Ok(Self {
            tracker: Tracker::new(satellite, window.current, config.refresh_period_seconds, now),
            scene,
            camera,
            camera_sync: CameraSync::new(),
            views: ViewModeController::new(),
            seen_generation: 0,
            show_help: false,
        })
    }

    /// One cooperative timer service pass: runs at most one refresh tick,
    /// then propagates any newly accepted sample (observed through the track
    /// generation) to the scene and, in follow mode, the camera target.
    fn service_refresh(&mut self, ctx: &egui::Context) {
        self.tracker.poll(Utc::now());

        let state = &self.tracker.state;
        if state.generation() != self.seen_generation {
            self.seen_generation = state.generation();
            self.scene.update_satellite(state.current);
            if state.follow {
                self.camera_sync.on_tick(state, &mut self.camera);
            }
            ctx.request_repaint();
        }
    }

    fn status_bar(&mut self, ui: &mut egui::Ui) {
        let position = self.tracker.state.current;
        ui.horizontal(|ui| {
            ui.label(egui::RichText::new(self.tracker.satellite().name.as_str()).strong());
            ui.separator();
            ui.label(format!("Lat: {}", degrees_to_text(position.latitude, 'N', 'S')));
            ui.label(format!("Lon: {}", degrees_to_text(position.longitude, 'E', 'W')));
            ui.label(format!("Alt: {}", altitude_to_text(position.altitude)));
            ui.separator();

            let mode = self.views.mode();
            if ui.button(format!("Representation: {}", mode.label())).clicked() {
                self.views.toggle();
                ui.ctx().request_repaint();
            }

            let follow_label = if self.tracker.state.follow { "Follow: On" } else { "Follow: Off" };
            if ui.button(follow_label).clicked() {
                self.camera_sync.toggle_follow(&mut self.tracker.state, &mut self.camera);
                ui.ctx().request_repaint();
            }

            if ui.button("Help").clicked() {
                self.show_help = !self.show_help;
            }
        });
    }

    fn help_window(&mut self, ctx: &egui::Context) {
        let name = self.tracker.satellite().name.clone();
        let inclination = self.tracker.satellite().inclination_deg;
        egui::Window::new("Help")
            .open(&mut self.show_help)
            .resizable(false)
            .show(ctx, |ui| {
                ui.label(format!(
                    "This tool shows the current location of {name} and some \
                     ground stations. An orbit in the past (red) and one in the \
                     future (green) are also displayed.",
                ));
                ui.label(format!("Orbit inclination: {inclination:.1}\u{b0}"));
                ui.separator();
                ui.label("Representation: 3D globe or 2D map.");
                ui.label(
                    "Follow: On or Off. When on, the view is locked on the \
                     satellite, but zooming in and out is still possible.",
                );
                ui.separator();
                ui.weak(format!("sat-track {} {}", env!("CARGO_PKG_VERSION"), env!("GIT_HASH")));
            });
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.service_refresh(ctx);

        egui::TopBottomPanel::top("status").show(ctx, |ui| self.status_bar(ui));

        if self.show_help {
            self.help_window(ctx);
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            let size = ui.available_size();
            let handlers = self.camera_sync.handlers();
            match self.views.mode() {
                ViewMode::Globe3D => draw_globe_view(
                    ui,
                    "globe_view",
                    &self.scene,
                    &mut self.camera,
                    handlers,
                    &self.views.globe,
                    size.x,
                    size.y,
                ),
                ViewMode::Map2D => draw_map_view(
                    ui,
                    "map_view",
                    &self.scene,
                    &mut self.camera,
                    handlers,
                    &self.views.map,
                    size.x,
                    size.y,
                ),
            }
        });

        // Keep the cooperative timer serviced while the UI is otherwise idle.
        ctx.request_repaint_after(std::time::Duration::from_millis(250));
    }
}
