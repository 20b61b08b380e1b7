//! Error taxonomy shared by profile validation and ray tracing

pub mod error;

pub use error::RayTraceError;
