//! Sidescan Georeferencing
//!
//! Computes the physical path of an acoustic pulse refracted through a
//! horizontally stratified water column: given a sound-speed profile, beam
//! launch angles, and a measured round-trip travel time, it recovers the 3D
//! displacement of the acoustic return relative to the transducer. This is
//! the geometric core of sonar georeferencing.

pub mod core;
pub mod georef;
pub mod profile;
pub mod utils;
pub mod validation;

// Re-export commonly used types
pub use crate::core::{PingObservation, Position, SidescanPing, SonarPing, SPEED_OF_SOUND_WATER};
pub use georef::{launch_geometry, LaunchGeometry, LayerStep, PlanarTrace, RayTracer};
pub use profile::{DepthSortedProfile, SoundSpeedProfile};
pub use utils::{imu_to_nav_matrix, sonar_to_cartesian};
pub use validation::RayTraceError;
