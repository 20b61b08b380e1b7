//! Sonar-frame and attitude coordinate transforms

use nalgebra::{Matrix3, Vector3};

use crate::core::constants::D2R;

/// Converts beam steering angles (degrees) and a slant range into a vector
/// in the sonar frame.
///
/// Frame convention: x along-track, y across-track (starboard), z down.
pub fn sonar_to_cartesian(along_track_angle: f64, across_track_angle: f64, range: f64) -> Vector3<f64> {
    let along = along_track_angle * D2R;
    let across = across_track_angle * D2R;
    Vector3::new(
        range * along.sin(),
        range * along.cos() * across.sin(),
        range * along.cos() * across.cos(),
    )
}

/// Builds the vehicle-to-navigation (NED) direction cosine matrix from
/// attitude angles in degrees, composed as yaw * pitch * roll (ZYX).
pub fn imu_to_nav_matrix(roll: f64, pitch: f64, heading: f64) -> Matrix3<f64> {
    let (sr, cr) = (roll * D2R).sin_cos();
    let (sp, cp) = (pitch * D2R).sin_cos();
    let (sh, ch) = (heading * D2R).sin_cos();

    let rx = Matrix3::new(1.0, 0.0, 0.0, 0.0, cr, -sr, 0.0, sr, cr);
    let ry = Matrix3::new(cp, 0.0, sp, 0.0, 1.0, 0.0, -sp, 0.0, cp);
    let rz = Matrix3::new(ch, -sh, 0.0, sh, ch, 0.0, 0.0, 0.0, 1.0);

    rz * ry * rx
}
