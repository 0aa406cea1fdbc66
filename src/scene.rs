//! Renderable scene model: named layers of placemarks and track paths.
//!
//! Purely declarative; built once at startup. The only thing that moves
//! afterwards is the satellite placemark, repositioned explicitly after each
//! accepted refresh tick.

use egui::Color32;

use crate::config::GroundStation;
use crate::geodetic::GeodeticPosition;
use crate::sampler::OrbitWindow;

pub const GROUND_STATIONS_LAYER: &str = "Ground Stations";
pub const ORBIT_LAYER: &str = "Orbit";
pub const SATELLITE_LAYER: &str = "Satellite";

#[derive(Clone, Copy)]
pub struct PlacemarkStyle {
    pub color: Color32,
    pub radius: f32,
    pub highlight_radius: f32,
}

pub struct Placemark {
    pub position: GeodeticPosition,
    pub label: String,
    pub style: PlacemarkStyle,
}

#[derive(Clone, Copy)]
pub struct PathStyle {
    pub color: Color32,
    pub width: f32,
}

pub struct TrackPath {
    pub positions: Vec<GeodeticPosition>,
    pub style: PathStyle,
}

pub enum Renderable {
    Placemark(Placemark),
    Path(TrackPath),
}

pub struct Layer {
    pub name: String,
    pub renderables: Vec<Renderable>,
}

#[derive(Default)]
pub struct Scene {
    pub layers: Vec<Layer>,
}

impl Scene {
    pub fn new() -> Self {
        Self { layers: Vec::new() }
    }

    pub fn add_layer(&mut self, layer: Layer) {
        self.layers.push(layer);
    }

    pub fn layer_mut(&mut self, name: &str) -> Option<&mut Layer> {
        self.layers.iter_mut().find(|l| l.name == name)
    }

    /// Repositions the satellite placemark after a refresh tick.
    pub fn update_satellite(&mut self, position: GeodeticPosition) {
        if let Some(layer) = self.layer_mut(SATELLITE_LAYER) {
            for renderable in &mut layer.renderables {
                if let Renderable::Placemark(placemark) = renderable {
                    placemark.position = position;
                }
            }
        }
    }
}

pub fn ground_stations_layer(stations: &[GroundStation]) -> Layer {
    let renderables = stations
        .iter()
        .map(|gs| {
            Renderable::Placemark(Placemark {
                position: GeodeticPosition::new(gs.lat, gs.lon, 1.0e3),
                label: gs.name.clone(),
                style: PlacemarkStyle { color: gs.color, radius: 3.0, highlight_radius: 3.0 },
            })
        })
        .collect();
    Layer { name: GROUND_STATIONS_LAYER.to_string(), renderables }
}

/// Past arc in red, future arc in green, both sharing the center sample.
pub fn orbit_layer(window: &OrbitWindow) -> Layer {
    let past = TrackPath {
        positions: window.past.clone(),
        style: PathStyle { color: Color32::RED, width: 1.5 },
    };
    let future = TrackPath {
        positions: window.future.clone(),
        style: PathStyle { color: Color32::GREEN, width: 1.5 },
    };
    Layer {
        name: ORBIT_LAYER.to_string(),
        renderables: vec![Renderable::Path(past), Renderable::Path(future)],
    }
}

pub fn satellite_layer(name: &str, position: GeodeticPosition) -> Layer {
    Layer {
        name: SATELLITE_LAYER.to_string(),
        renderables: vec![Renderable::Placemark(Placemark {
            position,
            label: name.to_string(),
            style: PlacemarkStyle { color: Color32::YELLOW, radius: 4.0, highlight_radius: 5.5 },
        })],
    }
}

/// The full startup scene, layer order matching draw order.
pub fn build_scene(stations: &[GroundStation], window: &OrbitWindow, satellite_name: &str) -> Scene {
    let mut scene = Scene::new();
    scene.add_layer(ground_stations_layer(stations));
    scene.add_layer(orbit_layer(window));
    scene.add_layer(satellite_layer(satellite_name, window.current));
    scene
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::default_ground_stations;

    fn window() -> OrbitWindow {
        let track: Vec<GeodeticPosition> = (0..9)
            .map(|i| GeodeticPosition::new(i as f64, i as f64 * 2.0, 400_000.0))
            .collect();
        OrbitWindow {
            past: track[..5].to_vec(),
            future: track[4..].to_vec(),
            current: track[4],
        }
    }

    #[test]
    fn startup_scene_has_three_layers_in_draw_order() {
        let scene = build_scene(&default_ground_stations(), &window(), "KALAMSAT-V2");
        let names: Vec<&str> = scene.layers.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, [GROUND_STATIONS_LAYER, ORBIT_LAYER, SATELLITE_LAYER]);
    }

    #[test]
    fn orbit_layer_keeps_both_arcs() {
        let layer = orbit_layer(&window());
        let lengths: Vec<usize> = layer
            .renderables
            .iter()
            .map(|r| match r {
                Renderable::Path(path) => path.positions.len(),
                Renderable::Placemark(_) => 0,
            })
            .collect();
        assert_eq!(lengths, [5, 5]);
    }

    #[test]
    fn update_satellite_moves_only_the_marker() {
        let mut scene = build_scene(&default_ground_stations(), &window(), "KALAMSAT-V2");
        let moved = GeodeticPosition::new(-10.0, 77.0, 410_000.0);
        scene.update_satellite(moved);

        let layer = scene.layer_mut(SATELLITE_LAYER).unwrap();
        match &layer.renderables[0] {
            Renderable::Placemark(placemark) => assert_eq!(placemark.position, moved),
            Renderable::Path(_) => panic!("satellite layer holds a placemark"),
        }

        let stations = scene.layer_mut(GROUND_STATIONS_LAYER).unwrap();
        match &stations.renderables[0] {
            Renderable::Placemark(placemark) => {
                assert_eq!(placemark.position.latitude, 35.1603);
            }
            Renderable::Path(_) => panic!("ground stations are placemarks"),
        }
    }
}
