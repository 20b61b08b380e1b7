//! Shared utilities

pub mod transform;

pub use transform::{imu_to_nav_matrix, sonar_to_cartesian};
