use eframe::egui;

mod app;
mod camera;
mod config;
mod coords;
mod drawing;
mod error;
mod geodetic;
mod math;
mod sampler;
mod scene;
mod tle;
mod track;
mod view;

use app::App;
use config::TrackerConfig;

fn main() -> eframe::Result<()> {
    env_logger::init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([1280.0, 800.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Satellite Tracker",
        options,
        Box::new(|cc| {
            let app = App::new(cc, TrackerConfig::default())?;
            Ok(Box::new(app))
        }),
    )
}
