//! 3D rotation and coordinate transformations for the globe view.

use nalgebra::{Matrix3, Vector3};
use std::f64::consts::FRAC_PI_2;

pub fn rotate_point_matrix(x: f64, y: f64, z: f64, rot: &Matrix3<f64>) -> (f64, f64, f64) {
    let v = rot * Vector3::new(x, y, z);
    (v.x, v.y, v.z)
}

/// Unit vector of a surface point; the frame matches the globe drawing
/// convention (`lat = asin(y)`, `lon = -atan2(z, x)`).
pub fn lat_lon_to_vector(lat: f64, lon: f64) -> (f64, f64, f64) {
    let (sl, cl) = (lat.sin(), lat.cos());
    (cl * lon.cos(), sl, -cl * lon.sin())
}

/// View rotation that puts the given surface point at the screen center,
/// facing the viewer, with north up.
pub fn lat_lon_to_matrix(lat: f64, lon: f64) -> Matrix3<f64> {
    let lon = -lon - FRAC_PI_2;
    let (sl, cl) = (lat.sin(), lat.cos());
    let (sn, cn) = (lon.sin(), lon.cos());
    Matrix3::new(
        cn, 0.0, sn,
        sl * sn, cl, -sl * cn,
        -cl * sn, sl, cl * cn,
    )
}

/// Rotation about the screen axis, used for camera heading.
pub fn heading_matrix(angle: f64) -> Matrix3<f64> {
    let (s, c) = (angle.sin(), angle.cos());
    Matrix3::new(
        c, s, 0.0,
        -s, c, 0.0,
        0.0, 0.0, 1.0,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-12
    }

    #[test]
    fn camera_target_lands_at_screen_center() {
        for (lat, lon) in [(0.0_f64, 0.0_f64), (45.0, 0.0), (-30.0, 120.0), (60.0, -75.0)] {
            let m = lat_lon_to_matrix(lat.to_radians(), lon.to_radians());
            let (x, y, z) = lat_lon_to_vector(lat.to_radians(), lon.to_radians());
            let (rx, ry, rz) = rotate_point_matrix(x, y, z, &m);
            assert!(close(rx, 0.0) && close(ry, 0.0) && close(rz, 1.0), "({lat},{lon})");
        }
    }

    #[test]
    fn east_of_target_appears_to_the_right() {
        let m = lat_lon_to_matrix(0.0, 0.0);
        let (x, y, z) = lat_lon_to_vector(0.0, 30.0_f64.to_radians());
        let (rx, ry, _) = rotate_point_matrix(x, y, z, &m);
        assert!(rx > 0.0);
        assert!(close(ry, 0.0));
    }

    #[test]
    fn north_of_target_appears_above() {
        let m = lat_lon_to_matrix(0.0, 0.0);
        let (x, y, z) = lat_lon_to_vector(30.0_f64.to_radians(), 0.0);
        let (_, ry, _) = rotate_point_matrix(x, y, z, &m);
        assert!(ry > 0.0);
    }

    #[test]
    fn heading_rotates_in_screen_plane() {
        let m = heading_matrix(FRAC_PI_2);
        let (rx, ry, rz) = rotate_point_matrix(0.0, 1.0, 0.0, &m);
        assert!(close(rx, 1.0) && close(ry, 0.0) && close(rz, 0.0));
    }
}
