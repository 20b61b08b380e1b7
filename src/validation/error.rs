use std::fmt;

use serde::{Deserialize, Serialize};

/// Error classification for profile validation and ray tracing.
///
/// Every variant carries the offending values so a failed trace can be
/// diagnosed without re-running it. All failures are local and synchronous;
/// a failed trace leaves no state behind and cannot affect any other ping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RayTraceError {
    /// Profile constructed with no samples
    EmptyProfile,
    /// Profile depths are not strictly increasing
    UnsortedProfile {
        index: usize,
        shallow_depth: f64,
        deep_depth: f64,
    },
    /// Two adjacent profile samples share the same depth, so the interval
    /// gradient is undefined
    DegenerateProfile { z0: f64, z1: f64 },
    /// A sound-speed sample that cannot parametrize Snell's law
    NonPositiveSpeed { index: usize, speed: f64 },
    /// The Snell invariant drove a grazing-angle cosine outside [-1, 1],
    /// usually an inconsistent surface sound speed / profile pairing
    GrazingCosineOutOfRange { cos_grazing: f64, sound_speed: f64 },
    /// A horizontal ray (zero vertical component) can never cross a layer
    /// of non-zero height
    HorizontalRay { depth_span: f64 },
}

impl fmt::Display for RayTraceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RayTraceError::EmptyProfile => {
                write!(f, "sound velocity profile contains no samples")
            }
            RayTraceError::UnsortedProfile {
                index,
                shallow_depth,
                deep_depth,
            } => {
                write!(
                    f,
                    "profile depths out of order at sample {}: {} m followed by {} m",
                    index, shallow_depth, deep_depth
                )
            }
            RayTraceError::DegenerateProfile { z0, z1 } => {
                write!(
                    f,
                    "can't calculate gradient for svp samples at same depth: z0={} z1={}",
                    z0, z1
                )
            }
            RayTraceError::NonPositiveSpeed { index, speed } => {
                write!(
                    f,
                    "non-positive sound speed {} m/s at sample {}",
                    speed, index
                )
            }
            RayTraceError::GrazingCosineOutOfRange {
                cos_grazing,
                sound_speed,
            } => {
                write!(
                    f,
                    "grazing cosine {} outside [-1, 1] at sound speed {} m/s",
                    cos_grazing, sound_speed
                )
            }
            RayTraceError::HorizontalRay { depth_span } => {
                write!(
                    f,
                    "horizontal ray cannot cross a layer spanning {} m",
                    depth_span
                )
            }
        }
    }
}

impl std::error::Error for RayTraceError {}
