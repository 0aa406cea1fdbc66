//! 2D map and 3D globe drawing for the tracked scene.
//!
//! Renders the scene layers with egui_plot lines, points and text labels.
//! Plot interactions are disabled; drag input is read off the response and
//! routed through the active camera handlers, so follow mode can suppress
//! panning while the scroll-wheel zoom keeps acting on the camera range.

use eframe::egui;
use egui_plot::{Line, Plot, PlotBounds, PlotPoint, PlotPoints, Points, Text};
use nalgebra::Matrix3;
use std::f64::consts::{PI, TAU};

use crate::camera::{Camera, CameraHandlers};
use crate::geodetic::GeodeticPosition;
use crate::math::{heading_matrix, lat_lon_to_matrix, lat_lon_to_vector, rotate_point_matrix};
use crate::scene::{Placemark, Renderable, Scene, TrackPath};
use crate::view::{GlobeView, MapView};

pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Camera range at which the whole globe (or world map) is in frame.
pub const FULL_GLOBE_RANGE_M: f64 = 4.0e7;

const GRATICULE_COLOR: egui::Color32 = egui::Color32::DARK_GRAY;
const OUTLINE_COLOR: egui::Color32 = egui::Color32::GRAY;

/// Half-extent of the 2D map in degrees of longitude for a camera range.
fn map_half_extent_deg(range_m: f64) -> f64 {
    (180.0 * range_m / FULL_GLOBE_RANGE_M).clamp(1.0, 180.0)
}

/// Splits a ground track into segments that do not jump across the
/// antimeridian, so the map never draws a horizontal line around the world.
fn split_at_antimeridian(positions: &[GeodeticPosition]) -> Vec<Vec<[f64; 2]>> {
    let mut segments = Vec::new();
    let mut segment: Vec<[f64; 2]> = Vec::new();
    let mut prev_lon: Option<f64> = None;

    for position in positions {
        if let Some(prev) = prev_lon {
            if (position.longitude - prev).abs() > 180.0 && !segment.is_empty() {
                segments.push(std::mem::take(&mut segment));
            }
        }
        segment.push([position.longitude, position.latitude]);
        prev_lon = Some(position.longitude);
    }
    if !segment.is_empty() {
        segments.push(segment);
    }
    segments
}

pub fn draw_map_view(
    ui: &mut egui::Ui,
    id: &str,
    scene: &Scene,
    camera: &mut Camera,
    handlers: CameraHandlers,
    map: &MapView,
    width: f32,
    height: f32,
) {
    let half_lon = map_half_extent_deg(camera.range);
    let half_lat = (half_lon * (height / width).max(0.1) as f64).min(90.0);

    let plot = Plot::new(id)
        .width(width)
        .height(height)
        .show_axes([map.show_axes, map.show_axes])
        .show_grid(false)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .cursor_color(egui::Color32::TRANSPARENT);

    let response = plot.show(ui, |plot_ui| {
        plot_ui.set_plot_bounds(PlotBounds::from_min_max(
            [camera.longitude - half_lon, camera.latitude - half_lat],
            [camera.longitude + half_lon, camera.latitude + half_lat],
        ));

        if map.show_gridlines {
            plot_ui.line(
                Line::new("", PlotPoints::new(vec![[-180.0, 0.0], [180.0, 0.0]]))
                    .color(GRATICULE_COLOR)
                    .width(0.5),
            );
            plot_ui.line(
                Line::new("", PlotPoints::new(vec![[0.0, -90.0], [0.0, 90.0]]))
                    .color(GRATICULE_COLOR)
                    .width(0.5),
            );
        }

        for layer in &scene.layers {
            for renderable in &layer.renderables {
                match renderable {
                    Renderable::Path(path) => map_path(plot_ui, path),
                    Renderable::Placemark(placemark) => map_placemark(plot_ui, placemark, half_lat),
                }
            }
        }
    });

    apply_camera_input(ui, &response, camera, handlers, 1.0);
}

fn map_path(plot_ui: &mut egui_plot::PlotUi, path: &TrackPath) {
    for segment in split_at_antimeridian(&path.positions) {
        plot_ui.line(
            Line::new("", PlotPoints::new(segment))
                .color(path.style.color)
                .width(path.style.width),
        );
    }
}

fn map_placemark(plot_ui: &mut egui_plot::PlotUi, placemark: &Placemark, half_lat: f64) {
    let point = [placemark.position.longitude, placemark.position.latitude];
    let hover_threshold = half_lat * 0.04;
    let hovered = plot_ui.pointer_coordinate().is_some_and(|c| {
        let dx = c.x - point[0];
        let dy = c.y - point[1];
        dx * dx + dy * dy < hover_threshold * hover_threshold
    });
    let radius = if hovered { placemark.style.highlight_radius } else { placemark.style.radius };

    plot_ui.points(
        Points::new("", PlotPoints::new(vec![point]))
            .color(placemark.style.color)
            .radius(radius)
            .filled(true),
    );
    plot_ui.text(
        Text::new("", PlotPoint::new(point[0], point[1] + half_lat * 0.05), placemark.label.clone())
            .color(placemark.style.color),
    );
}

pub fn draw_globe_view(
    ui: &mut egui::Ui,
    id: &str,
    scene: &Scene,
    camera: &mut Camera,
    handlers: CameraHandlers,
    globe: &GlobeView,
    width: f32,
    height: f32,
) {
    let rotation = heading_matrix(camera.heading.to_radians())
        * lat_lon_to_matrix(camera.latitude.to_radians(), camera.longitude.to_radians());
    let squash = camera.tilt.to_radians().cos().max(0.2);
    let margin = (EARTH_RADIUS_KM * 1.15 * (camera.range / FULL_GLOBE_RANGE_M)).max(10.0);

    let plot = Plot::new(id)
        .data_aspect(1.0)
        .width(width)
        .height(height)
        .show_axes(false)
        .show_grid(false)
        .show_x(false)
        .show_y(false)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .cursor_color(egui::Color32::TRANSPARENT);

    let response = plot.show(ui, |plot_ui| {
        plot_ui.set_plot_bounds(PlotBounds::from_min_max([-margin, -margin], [margin, margin]));

        let outline: PlotPoints = (0..=180)
            .map(|i| {
                let a = i as f64 * TAU / 180.0;
                [EARTH_RADIUS_KM * a.cos(), EARTH_RADIUS_KM * a.sin() * squash]
            })
            .collect();
        plot_ui.line(Line::new("", outline).color(OUTLINE_COLOR).width(1.0));

        if globe.show_graticule {
            let equator: Vec<GeodeticPosition> = (0..=180)
                .map(|i| GeodeticPosition::new(0.0, -180.0 + i as f64 * 2.0, 0.0))
                .collect();
            let meridian: Vec<GeodeticPosition> = (0..=90)
                .map(|i| GeodeticPosition::new(-90.0 + i as f64 * 2.0, 0.0, 0.0))
                .collect();
            globe_polyline(plot_ui, &equator, GRATICULE_COLOR, 0.5, &rotation, squash);
            globe_polyline(plot_ui, &meridian, GRATICULE_COLOR, 0.5, &rotation, squash);
        }

        for layer in &scene.layers {
            for renderable in &layer.renderables {
                match renderable {
                    Renderable::Path(path) => globe_polyline(
                        plot_ui,
                        &path.positions,
                        path.style.color,
                        path.style.width,
                        &rotation,
                        squash,
                    ),
                    Renderable::Placemark(placemark) => {
                        globe_placemark(plot_ui, placemark, &rotation, squash, margin)
                    }
                }
            }
        }
    });

    apply_camera_input(ui, &response, camera, handlers, 180.0 / (PI * EARTH_RADIUS_KM));
}

/// Orthographic projection of a geodetic position; `visible` is false for
/// points on the far side hidden behind the globe disk.
fn project_globe(
    position: &GeodeticPosition,
    rotation: &Matrix3<f64>,
    squash: f64,
) -> ([f64; 2], bool) {
    let radius = EARTH_RADIUS_KM + position.altitude / 1000.0;
    let (x, y, z) = lat_lon_to_vector(position.latitude.to_radians(), position.longitude.to_radians());
    let (rx, ry, rz) = rotate_point_matrix(x * radius, y * radius, z * radius, rotation);
    let visible = rz >= 0.0 || (rx * rx + ry * ry) >= EARTH_RADIUS_KM * EARTH_RADIUS_KM;
    ([rx, ry * squash], visible)
}

fn globe_polyline(
    plot_ui: &mut egui_plot::PlotUi,
    positions: &[GeodeticPosition],
    color: egui::Color32,
    width: f32,
    rotation: &Matrix3<f64>,
    squash: f64,
) {
    let mut segment: Vec<[f64; 2]> = Vec::new();
    for position in positions {
        let (point, visible) = project_globe(position, rotation, squash);
        if visible {
            segment.push(point);
        } else if !segment.is_empty() {
            plot_ui.line(
                Line::new("", PlotPoints::new(std::mem::take(&mut segment)))
                    .color(color)
                    .width(width),
            );
        }
    }
    if !segment.is_empty() {
        plot_ui.line(Line::new("", PlotPoints::new(segment)).color(color).width(width));
    }
}

fn globe_placemark(
    plot_ui: &mut egui_plot::PlotUi,
    placemark: &Placemark,
    rotation: &Matrix3<f64>,
    squash: f64,
    margin: f64,
) {
    let (point, visible) = project_globe(&placemark.position, rotation, squash);
    if !visible {
        return;
    }

    let hover_threshold = margin * 0.03;
    let hovered = plot_ui.pointer_coordinate().is_some_and(|c| {
        let dx = c.x - point[0];
        let dy = c.y - point[1];
        dx * dx + dy * dy < hover_threshold * hover_threshold
    });
    let radius = if hovered { placemark.style.highlight_radius } else { placemark.style.radius };

    plot_ui.points(
        Points::new("", PlotPoints::new(vec![point]))
            .color(placemark.style.color)
            .radius(radius)
            .filled(true),
    );
    plot_ui.text(
        Text::new("", PlotPoint::new(point[0], point[1] + margin * 0.04), placemark.label.clone())
            .color(placemark.style.color),
    );
}

/// Routes plot drags through the active camera handlers and applies scroll
/// zoom straight to the camera range. `degrees_per_unit` converts plot units
/// into look-at degrees (1.0 on the map, surface degrees per km on the globe).
fn apply_camera_input(
    ui: &egui::Ui,
    response: &egui_plot::PlotResponse<()>,
    camera: &mut Camera,
    handlers: CameraHandlers,
    degrees_per_unit: f64,
) {
    let resp = &response.response;

    if resp.dragged_by(egui::PointerButton::Primary) {
        if let Some(pos) = resp.interact_pointer_pos() {
            let drag = resp.drag_delta();
            let cur = response.transform.value_from_position(pos);
            let prev = response.transform.value_from_position(pos - drag);
            let dlon = -(cur.x - prev.x) * degrees_per_unit;
            let dlat = -(cur.y - prev.y) * degrees_per_unit;
            (handlers.pan_or_drag)(camera, dlon, dlat);
        }
    } else if resp.dragged_by(egui::PointerButton::Secondary) {
        (handlers.secondary_drag)(camera, resp.drag_delta().x as f64 * 0.25);
    } else if resp.dragged_by(egui::PointerButton::Middle) {
        (handlers.tilt)(camera, resp.drag_delta().y as f64 * 0.25);
    }

    if resp.hovered() {
        let scroll = ui.input(|i| i.raw_scroll_delta.y);
        if scroll != 0.0 {
            let factor = (1.0 - scroll as f64 * 0.001).clamp(0.2, 5.0);
            camera.zoom_by(factor);
        }
        if let Some(touch) = ui.input(|i| i.multi_touch()) {
            let factor = touch.zoom_delta as f64;
            if factor != 1.0 {
                camera.zoom_by(1.0 / factor);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::lat_lon_to_matrix;

    #[test]
    fn track_splits_where_longitude_wraps() {
        let positions: Vec<GeodeticPosition> = [170.0, 175.0, -178.0, -172.0]
            .iter()
            .map(|&lon| GeodeticPosition::new(0.0, lon, 400_000.0))
            .collect();
        let segments = split_at_antimeridian(&positions);
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].len(), 2);
        assert_eq!(segments[1].len(), 2);
    }

    #[test]
    fn contiguous_track_stays_in_one_segment() {
        let positions: Vec<GeodeticPosition> = (-60..=60)
            .map(|lon| GeodeticPosition::new(0.0, lon as f64, 400_000.0))
            .collect();
        let segments = split_at_antimeridian(&positions);
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].len(), 121);
    }

    #[test]
    fn map_extent_scales_with_range() {
        assert_eq!(map_half_extent_deg(FULL_GLOBE_RANGE_M), 180.0);
        assert_eq!(map_half_extent_deg(FULL_GLOBE_RANGE_M / 2.0), 90.0);
        assert_eq!(map_half_extent_deg(1.0), 1.0);
        assert_eq!(map_half_extent_deg(1.0e12), 180.0);
    }

    #[test]
    fn facing_point_is_visible_far_side_is_not() {
        let rotation = lat_lon_to_matrix(0.0, 0.0);
        let front = GeodeticPosition::new(0.0, 0.0, 400_000.0);
        let back = GeodeticPosition::new(0.0, 180.0, 400_000.0);
        assert!(project_globe(&front, &rotation, 1.0).1);
        assert!(!project_globe(&back, &rotation, 1.0).1);
    }

    #[test]
    fn high_altitude_point_peeks_past_the_limb() {
        let rotation = lat_lon_to_matrix(0.0, 0.0);
        let geo = GeodeticPosition::new(0.0, 150.0, 36_000_000.0);
        assert!(project_globe(&geo, &rotation, 1.0).1);
    }
}
