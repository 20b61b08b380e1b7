//! Core types and constants for sonar georeferencing

pub mod constants;
pub mod types;

pub use constants::*;
pub use types::*;
