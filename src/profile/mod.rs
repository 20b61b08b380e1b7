//! Sound-velocity profile access
//!
//! The ray tracer only needs a read-only accessor contract over depth-sorted
//! (depth, speed) samples with precomputed per-interval gradients; any
//! concrete store may back it. [`DepthSortedProfile`] is the vector-backed
//! implementation used throughout the crate.

use serde::{Deserialize, Serialize};

use crate::validation::RayTraceError;

/// Read-only accessor contract over a depth-sorted sound-speed profile.
///
/// Implementations guarantee strictly increasing depths, so every interval
/// `[i, i+1]` has a well-defined gradient.
pub trait SoundSpeedProfile {
    /// Number of samples in the profile
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Depth of sample `i` (meters, positive down)
    fn depth(&self, i: usize) -> f64;

    /// Sound speed of sample `i` (m/s)
    fn speed(&self, i: usize) -> f64;

    /// Gradient of the interval between samples `i` and `i+1` ((m/s)/m)
    fn gradient(&self, i: usize) -> f64;

    /// Index of the first sample strictly deeper than `depth`, or `len()` as
    /// the out-of-range sentinel when the query is at or below every sample.
    ///
    /// The transducer-layer step propagates from the query depth down to the
    /// returned sample, so a sample lying exactly at the query depth is
    /// skipped: selecting it would make that step zero-height and its
    /// gradient undefined.
    fn layer_index_for_depth(&self, depth: f64) -> usize {
        let mut index = 0;
        while index < self.len() && self.depth(index) <= depth {
            index += 1;
        }
        index
    }
}

/// Vector-backed sound-velocity profile with precomputed interval gradients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepthSortedProfile {
    depths: Vec<f64>,
    speeds: Vec<f64>,
    gradients: Vec<f64>,
}

impl DepthSortedProfile {
    /// Builds a profile from (depth, speed) samples.
    ///
    /// Fails fast on an empty profile, on non-increasing depths (two samples
    /// at the same depth make the interval gradient undefined), and on
    /// non-positive speeds.
    pub fn new(samples: &[(f64, f64)]) -> Result<Self, RayTraceError> {
        if samples.is_empty() {
            return Err(RayTraceError::EmptyProfile);
        }

        for (i, &(_, speed)) in samples.iter().enumerate() {
            if speed <= 0.0 {
                return Err(RayTraceError::NonPositiveSpeed { index: i, speed });
            }
        }

        let mut gradients = Vec::with_capacity(samples.len().saturating_sub(1));
        for (i, pair) in samples.windows(2).enumerate() {
            let (z0, c0) = pair[0];
            let (z1, c1) = pair[1];
            if z1 == z0 {
                return Err(RayTraceError::DegenerateProfile { z0, z1 });
            }
            if z1 < z0 {
                return Err(RayTraceError::UnsortedProfile {
                    index: i,
                    shallow_depth: z0,
                    deep_depth: z1,
                });
            }
            gradients.push((c1 - c0) / (z1 - z0));
        }

        Ok(Self {
            depths: samples.iter().map(|&(z, _)| z).collect(),
            speeds: samples.iter().map(|&(_, c)| c).collect(),
            gradients,
        })
    }

    pub fn depths(&self) -> &[f64] {
        &self.depths
    }

    pub fn speeds(&self) -> &[f64] {
        &self.speeds
    }

    pub fn gradients(&self) -> &[f64] {
        &self.gradients
    }
}

impl SoundSpeedProfile for DepthSortedProfile {
    fn len(&self) -> usize {
        self.depths.len()
    }

    fn depth(&self, i: usize) -> f64 {
        self.depths[i]
    }

    fn speed(&self, i: usize) -> f64 {
        self.speeds[i]
    }

    fn gradient(&self, i: usize) -> f64 {
        self.gradients[i]
    }

    // depths are strictly increasing, so the scan can be a binary search
    fn layer_index_for_depth(&self, depth: f64) -> usize {
        self.depths.partition_point(|&z| z <= depth)
    }
}
