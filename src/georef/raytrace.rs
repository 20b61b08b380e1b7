//! Ray-trace accumulator and result projectors
//!
//! Walks the sound-velocity-profile layers from the transducer depth
//! downward, accumulating travel time and displacement until the target
//! one-way travel time is reached, then lands exactly on that time with a
//! partial last-layer step.

use nalgebra::{Matrix3, Vector2, Vector3};
use serde::{Deserialize, Serialize};

use super::launch::{launch_geometry, LaunchGeometry};
use super::propagation::{
    constant_celerity_step, constant_gradient_step, last_layer_step, sound_speed_gradient,
    LayerStep,
};
use crate::core::constants::DEFAULT_GRADIENT_EPSILON;
use crate::core::SonarPing;
use crate::profile::SoundSpeedProfile;
use crate::validation::RayTraceError;

/// Diagnostic planar trace: the aggregate (range, depth) displacement plus
/// every per-layer segment, in traversal order, including the final partial
/// segment. The aggregate always equals the component sum of the segments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanarTrace {
    /// Horizontal range in the vertical plane of the ray (meters)
    pub range: f64,
    /// Depth change relative to the transducer (meters, positive down)
    pub depth: f64,
    /// Committed layer segments plus the final partial segment
    pub segments: Vec<LayerStep>,
}

impl PlanarTrace {
    /// Aggregate displacement as a (range, depth) vector
    pub fn displacement(&self) -> Vector2<f64> {
        Vector2::new(self.range, self.depth)
    }
}

/// Acoustic ray tracer over a stratified water column.
///
/// Stateless between invocations: each trace owns only transient
/// accumulator state, so independent pings can be traced in parallel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayTracer {
    /// Gradients below this magnitude are treated as zero and the layer is
    /// propagated as isovelocity
    pub gradient_epsilon: f64,
}

impl Default for RayTracer {
    fn default() -> Self {
        Self {
            gradient_epsilon: DEFAULT_GRADIENT_EPSILON,
        }
    }
}

impl RayTracer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_gradient_epsilon(gradient_epsilon: f64) -> Self {
        Self { gradient_epsilon }
    }

    /// Traces one ping and returns the 3D displacement of the acoustic
    /// return relative to the transducer, in the navigation frame (NED).
    pub fn trace<S, P>(
        &self,
        ping: &S,
        svp: &P,
        boresight: &Matrix3<f64>,
        imu_to_nav: &Matrix3<f64>,
    ) -> Result<Vector3<f64>, RayTraceError>
    where
        S: SonarPing,
        P: SoundSpeedProfile,
    {
        let geometry = launch_geometry(ping, boresight, imu_to_nav);
        let (range, depth) = self.accumulate(ping, svp, &geometry, None)?;

        // re-orient the planar ray in the navigation frame
        Ok(Vector3::new(
            range * geometry.sin_azimuth,
            range * geometry.cos_azimuth,
            depth,
        ))
    }

    /// Traces one ping in the vertical plane of the ray, keeping every
    /// per-layer segment for visualization and QA tooling.
    ///
    /// The aggregate matches [`RayTracer::trace`]: same depth, and a range
    /// equal to the horizontal magnitude of the 3D result.
    pub fn trace_planar<S, P>(
        &self,
        ping: &S,
        svp: &P,
        boresight: &Matrix3<f64>,
        imu_to_nav: &Matrix3<f64>,
    ) -> Result<PlanarTrace, RayTraceError>
    where
        S: SonarPing,
        P: SoundSpeedProfile,
    {
        let geometry = launch_geometry(ping, boresight, imu_to_nav);
        let mut segments = Vec::new();
        let (range, depth) = self.accumulate(ping, svp, &geometry, Some(&mut segments))?;

        Ok(PlanarTrace {
            range,
            depth,
            segments,
        })
    }

    /// The layer-traversal loop shared by both output modes; the 3D variant
    /// simply discards the segment sink.
    ///
    /// A layer step whose cumulative time lands exactly on the target is
    /// committed, so the final partial step can legitimately be zero.
    fn accumulate<S, P>(
        &self,
        ping: &S,
        svp: &P,
        geometry: &LaunchGeometry,
        mut sink: Option<&mut Vec<LayerStep>>,
    ) -> Result<(f64, f64), RayTraceError>
    where
        S: SonarPing,
        P: SoundSpeedProfile,
    {
        if svp.is_empty() {
            return Err(RayTraceError::EmptyProfile);
        }

        let one_way_travel_time = ping.two_way_travel_time() / 2.0;
        let snell_constant = geometry.snell_constant(ping.surface_sound_speed());

        let mut cumulative_time = 0.0;
        let mut cumulative_range = 0.0;
        let mut cumulative_depth = 0.0;

        fn commit(
            step: LayerStep,
            time: &mut f64,
            range: &mut f64,
            depth: &mut f64,
            sink: &mut Option<&mut Vec<LayerStep>>,
        ) {
            *time += step.travel_time;
            *range += step.delta_r;
            *depth += step.delta_z;
            if let Some(segments) = sink.as_deref_mut() {
                segments.push(step);
            }
        }

        let cutoff_index = svp.layer_index_for_depth(ping.transducer_depth());
        let mut layer_index = cutoff_index;
        let mut overshot = false;

        if cutoff_index < svp.len() {
            // the transducer may sit mid-layer: first step runs from the
            // transducer depth down to the next profile sample, using the
            // sound speed measured at the transducer
            let transducer_gradient = sound_speed_gradient(
                ping.transducer_depth(),
                ping.surface_sound_speed(),
                svp.depth(cutoff_index),
                svp.speed(cutoff_index),
            )?;

            let step = if transducer_gradient.abs() < self.gradient_epsilon {
                constant_celerity_step(
                    ping.transducer_depth(),
                    svp.depth(cutoff_index),
                    ping.surface_sound_speed(),
                    snell_constant,
                )?
            } else {
                constant_gradient_step(
                    ping.surface_sound_speed(),
                    svp.speed(cutoff_index),
                    transducer_gradient,
                    snell_constant,
                )?
            };

            if cumulative_time + step.travel_time <= one_way_travel_time {
                commit(
                    step,
                    &mut cumulative_time,
                    &mut cumulative_range,
                    &mut cumulative_depth,
                    &mut sink,
                );
            } else {
                overshot = true;
            }
        }
        // otherwise the transducer is below the deepest sample: no profile
        // layer applies, last-layer propagation handles the whole trace

        while !overshot && layer_index + 1 < svp.len() {
            let step = if svp.gradient(layer_index).abs() < self.gradient_epsilon {
                constant_celerity_step(
                    svp.depth(layer_index),
                    svp.depth(layer_index + 1),
                    svp.speed(layer_index),
                    snell_constant,
                )?
            } else {
                constant_gradient_step(
                    svp.speed(layer_index),
                    svp.speed(layer_index + 1),
                    svp.gradient(layer_index),
                    snell_constant,
                )?
            };

            if cumulative_time + step.travel_time <= one_way_travel_time {
                layer_index += 1;
                commit(
                    step,
                    &mut cumulative_time,
                    &mut cumulative_range,
                    &mut cumulative_depth,
                    &mut sink,
                );
            } else {
                // this layer would overshoot the one-way travel time
                overshot = true;
            }
        }

        let last_layer_speed = if cutoff_index < svp.len() {
            svp.speed(layer_index)
        } else {
            ping.surface_sound_speed()
        };

        let remaining_time = one_way_travel_time - cumulative_time;
        let final_step = last_layer_step(remaining_time, last_layer_speed, snell_constant)?;
        if let Some(segments) = sink.as_deref_mut() {
            segments.push(final_step);
        }

        Ok((
            cumulative_range + final_step.delta_r,
            cumulative_depth + final_step.delta_z,
        ))
    }
}
