//! Launch vector geometry
//!
//! Converts a ping's beam angles into a navigation-frame launch direction,
//! decomposed into the azimuth sine/cosine and the initial grazing angle.
//! Computed once per trace and reused by every layer.

use nalgebra::Matrix3;

use crate::core::SonarPing;
use crate::utils::sonar_to_cartesian;

/// Azimuth decomposition and initial grazing angle of the launch vector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LaunchGeometry {
    /// Sine of the azimuth of the horizontal component (NED)
    pub sin_azimuth: f64,
    /// Cosine of the azimuth of the horizontal component (NED)
    pub cos_azimuth: f64,
    /// Initial grazing angle beta0 (radians), measured from the horizontal
    pub grazing_angle: f64,
}

impl LaunchGeometry {
    /// Snell's law ray invariant `p = cos(beta0)/c0` for the given sound
    /// speed at the transducer.
    pub fn snell_constant(&self, surface_sound_speed: f64) -> f64 {
        self.grazing_angle.cos() / surface_sound_speed
    }
}

/// Computes the launch geometry for one ping: beam angles to a unit vector
/// in the sonar frame, rotated by the boresight then the vehicle attitude
/// into the navigation frame where the ray tracing occurs.
///
/// A vertical-only ray has no horizontal component; its azimuth sine and
/// cosine are both zero.
pub fn launch_geometry<P: SonarPing>(
    ping: &P,
    boresight: &Matrix3<f64>,
    imu_to_nav: &Matrix3<f64>,
) -> LaunchGeometry {
    let launch_sonar =
        sonar_to_cartesian(ping.along_track_angle(), ping.across_track_angle(), 1.0).normalize();

    let launch_nav = imu_to_nav * (boresight * launch_sonar);

    let horizontal_norm = (launch_nav.x * launch_nav.x + launch_nav.y * launch_nav.y).sqrt();

    // NED convention
    let (sin_azimuth, cos_azimuth) = if horizontal_norm > 0.0 {
        (launch_nav.x / horizontal_norm, launch_nav.y / horizontal_norm)
    } else {
        (0.0, 0.0)
    };

    LaunchGeometry {
        sin_azimuth,
        cos_azimuth,
        grazing_angle: launch_nav.z.asin(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::PingObservation;
    use approx::assert_relative_eq;

    fn ping(along: f64, across: f64) -> PingObservation {
        PingObservation {
            along_track_angle: along,
            across_track_angle: across,
            two_way_travel_time: 0.1,
            surface_sound_speed: 1500.0,
            transducer_depth: 0.0,
        }
    }

    #[test]
    fn vertical_ray_has_zero_azimuth_components() {
        let identity = Matrix3::identity();
        let geometry = launch_geometry(&ping(0.0, 0.0), &identity, &identity);
        assert_eq!(geometry.sin_azimuth, 0.0);
        assert_eq!(geometry.cos_azimuth, 0.0);
        assert_relative_eq!(geometry.grazing_angle, std::f64::consts::FRAC_PI_2);
    }

    #[test]
    fn across_track_beam_lands_in_the_y_azimuth() {
        let identity = Matrix3::identity();
        let geometry = launch_geometry(&ping(0.0, 20.0), &identity, &identity);
        assert_relative_eq!(geometry.sin_azimuth, 0.0);
        assert_relative_eq!(geometry.cos_azimuth, 1.0, epsilon = 1e-12);
        // grazing angle is the complement of the across-track angle
        assert_relative_eq!(
            geometry.grazing_angle,
            70.0 * crate::core::D2R,
            epsilon = 1e-12
        );
    }

    #[test]
    fn snell_constant_uses_surface_sound_speed() {
        let identity = Matrix3::identity();
        let geometry = launch_geometry(&ping(0.0, 20.0), &identity, &identity);
        assert_relative_eq!(
            geometry.snell_constant(1500.0),
            (20.0 * crate::core::D2R).sin() / 1500.0,
            epsilon = 1e-15
        );
    }

    #[test]
    fn attitude_rotation_steers_the_azimuth() {
        let identity = Matrix3::identity();
        // heading east, the starboard beam points south
        let heading = crate::utils::imu_to_nav_matrix(0.0, 0.0, 90.0);
        let geometry = launch_geometry(&ping(0.0, 45.0), &identity, &heading);
        assert_relative_eq!(geometry.sin_azimuth, -1.0, epsilon = 1e-12);
        assert_relative_eq!(geometry.cos_azimuth, 0.0, epsilon = 1e-12);
        assert_relative_eq!(geometry.grazing_angle, 45.0 * crate::core::D2R, epsilon = 1e-12);
    }
}
