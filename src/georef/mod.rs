//! Acoustic ray tracing through a stratified water column

pub mod launch;
pub mod propagation;
pub mod raytrace;

pub use launch::{launch_geometry, LaunchGeometry};
pub use propagation::LayerStep;
pub use raytrace::{PlanarTrace, RayTracer};
