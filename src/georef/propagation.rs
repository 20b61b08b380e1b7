//! Per-layer propagation formulas
//!
//! Pure closed-form solutions for one water layer, parametrized by the
//! Snell constant `p = cos(beta0)/c0` computed once at launch. A layer with
//! a negligible gradient propagates in a straight line; a layer with a
//! linear sound-speed gradient propagates along a circular arc.

use serde::{Deserialize, Serialize};

use crate::validation::RayTraceError;

/// Displacement and elapsed time across one layer (or partial layer).
///
/// `delta_r` is horizontal range in the vertical plane of the ray,
/// `delta_z` is the depth change, both in meters; `travel_time` in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayerStep {
    pub delta_z: f64,
    pub delta_r: f64,
    pub travel_time: f64,
}

/// Grazing-angle cosine and sine at local sound speed `c` under the Snell
/// invariant, with the `sqrt` domain checked rather than left to produce NaN.
fn grazing_terms(snell_constant: f64, c: f64) -> Result<(f64, f64), RayTraceError> {
    let cos_bn = snell_constant * c;
    if !(-1.0..=1.0).contains(&cos_bn) || !cos_bn.is_finite() {
        return Err(RayTraceError::GrazingCosineOutOfRange {
            cos_grazing: cos_bn,
            sound_speed: c,
        });
    }
    Ok((cos_bn, (1.0 - cos_bn * cos_bn).sqrt()))
}

/// Straight-line propagation across an isovelocity layer from depth `z0`
/// down to `z1` at constant speed `c`.
pub fn constant_celerity_step(
    z0: f64,
    z1: f64,
    c: f64,
    snell_constant: f64,
) -> Result<LayerStep, RayTraceError> {
    let (cos_bn, sin_bn) = grazing_terms(snell_constant, c)?;

    let delta_z = z1 - z0;
    if sin_bn == 0.0 {
        // quasi-horizontal ray: it never reaches the next boundary
        return Err(RayTraceError::HorizontalRay { depth_span: delta_z });
    }
    let travel_time = delta_z / (c * sin_bn);
    let delta_r = cos_bn * travel_time * c;

    Ok(LayerStep {
        delta_z,
        delta_r,
        travel_time,
    })
}

/// Circular-arc propagation across a layer whose sound speed varies
/// linearly from `c0` to `c1` with gradient `g`.
///
/// The elapsed time follows the standard isogradient closed form
/// `|ln((c1/c0) * (1+sin_b0)/(1+sin_b1))| / |g|`; the displacement follows
/// from the radius of curvature `1/(p*g)` and the boundary cosines/sines.
pub fn constant_gradient_step(
    c0: f64,
    c1: f64,
    gradient: f64,
    snell_constant: f64,
) -> Result<LayerStep, RayTraceError> {
    let (cos_b0, sin_b0) = grazing_terms(snell_constant, c0)?;
    let (cos_b1, sin_b1) = grazing_terms(snell_constant, c1)?;

    if sin_b0 == 0.0 || sin_b1 == 0.0 {
        return Err(RayTraceError::HorizontalRay {
            depth_span: (cos_b1 - cos_b0) / (snell_constant * gradient),
        });
    }

    let radius_of_curvature = 1.0 / (snell_constant * gradient);

    let travel_time =
        ((1.0 / gradient.abs()) * ((c1 / c0) * ((1.0 + sin_b0) / (1.0 + sin_b1))).ln()).abs();
    let delta_z = radius_of_curvature * (cos_b1 - cos_b0);
    let delta_r = radius_of_curvature * (sin_b0 - sin_b1);

    Ok(LayerStep {
        delta_z,
        delta_r,
        travel_time,
    })
}

/// Partial straight-line propagation for the remaining travel time in the
/// last layer, so the trace lands exactly on the target one-way time.
///
/// A horizontal ray is valid here: the step simply has no vertical
/// component.
pub fn last_layer_step(
    remaining_time: f64,
    c: f64,
    snell_constant: f64,
) -> Result<LayerStep, RayTraceError> {
    let (cos_bn, sin_bn) = grazing_terms(snell_constant, c)?;
    Ok(LayerStep {
        delta_z: c * remaining_time * sin_bn,
        delta_r: c * remaining_time * cos_bn,
        travel_time: remaining_time,
    })
}

/// Sound-speed gradient between two (depth, speed) points.
///
/// Two points at the same depth leave the gradient undefined; this is
/// surfaced as a domain error, never as infinity.
pub fn sound_speed_gradient(z0: f64, c0: f64, z1: f64, c1: f64) -> Result<f64, RayTraceError> {
    if z1 == z0 {
        // happens when an svp contains multiple entries at the same depth
        return Err(RayTraceError::DegenerateProfile { z0, z1 });
    }
    Ok((c1 - c0) / (z1 - z0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    // 45 degree grazing angle at 1500 m/s
    fn snell_45() -> f64 {
        (std::f64::consts::FRAC_PI_4).cos() / 1500.0
    }

    #[test]
    fn constant_celerity_matches_plane_geometry() {
        let step = constant_celerity_step(0.0, 100.0, 1500.0, snell_45()).unwrap();
        assert_relative_eq!(step.delta_z, 100.0);
        // at 45 degrees the horizontal and vertical displacements are equal
        assert_relative_eq!(step.delta_r, 100.0, epsilon = 1e-9);
        // path length / speed
        let path = (step.delta_r * step.delta_r + step.delta_z * step.delta_z).sqrt();
        assert_relative_eq!(step.travel_time, path / 1500.0, epsilon = 1e-12);
    }

    #[test]
    fn gradient_step_approaches_celerity_step_as_gradient_vanishes() {
        // a 10 m layer with an almost-flat gradient must agree with the
        // isovelocity formula to well below the survey noise floor
        let p = snell_45();
        let g = 2e-6;
        let c0 = 1500.0;
        let c1 = c0 + g * 10.0;

        let curved = constant_gradient_step(c0, c1, g, p).unwrap();
        let straight = constant_celerity_step(0.0, 10.0, c0, p).unwrap();

        assert_relative_eq!(curved.delta_z, straight.delta_z, epsilon = 1e-6);
        assert_relative_eq!(curved.delta_r, straight.delta_r, epsilon = 1e-6);
        assert_relative_eq!(curved.travel_time, straight.travel_time, epsilon = 1e-9);
    }

    #[test]
    fn gradient_step_refracts_toward_horizontal_in_faster_water() {
        // speed increasing with depth bends the ray up: the grazing angle
        // shrinks, so range grows faster than depth compared to a straight ray
        let p = snell_45();
        let step = constant_gradient_step(1480.0, 1520.0, 0.5, p).unwrap();
        assert!(step.delta_z > 0.0);
        assert!(step.delta_r > step.delta_z);
        assert!(step.travel_time > 0.0);
    }

    #[test]
    fn last_layer_step_scales_linearly_with_time() {
        let p = snell_45();
        let one = last_layer_step(0.01, 1500.0, p).unwrap();
        let two = last_layer_step(0.02, 1500.0, p).unwrap();
        assert_relative_eq!(two.delta_r, 2.0 * one.delta_r, epsilon = 1e-12);
        assert_relative_eq!(two.delta_z, 2.0 * one.delta_z, epsilon = 1e-12);
    }

    #[test]
    fn zero_remaining_time_is_a_null_step() {
        let step = last_layer_step(0.0, 1500.0, snell_45()).unwrap();
        assert_eq!(step.delta_r, 0.0);
        assert_eq!(step.delta_z, 0.0);
        assert_eq!(step.travel_time, 0.0);
    }

    #[test]
    fn snell_domain_violation_is_surfaced() {
        // launch computed at 1500 m/s but layer speed pushes p*c past 1
        let p = 1.0 / 1500.0;
        let err = constant_celerity_step(0.0, 10.0, 1600.0, p).unwrap_err();
        assert!(matches!(err, RayTraceError::GrazingCosineOutOfRange { .. }));
    }

    #[test]
    fn horizontal_ray_cannot_cross_a_layer() {
        // cos(beta0) = 1 exactly: sin is zero, the layer is never crossed
        let p = 1.0 / 1500.0;
        let err = constant_celerity_step(0.0, 10.0, 1500.0, p).unwrap_err();
        assert!(matches!(err, RayTraceError::HorizontalRay { .. }));
        // but a horizontal partial step is fine
        let step = last_layer_step(0.1, 1500.0, p).unwrap();
        assert_relative_eq!(step.delta_z, 0.0);
        assert_relative_eq!(step.delta_r, 150.0);
    }

    #[test]
    fn layer_step_survives_json_without_precision_loss() {
        // full-precision trace output, not round literals
        let step = LayerStep {
            delta_z: 54.38998519803432,
            delta_r: 37.99258039190596,
            travel_time: 0.036716238493172284,
        };
        let json = serde_json::to_string(&step).unwrap();
        let back: LayerStep = serde_json::from_str(&json).unwrap();
        assert_eq!(back, step);
    }

    #[test]
    fn same_depth_gradient_is_a_domain_error() {
        let err = sound_speed_gradient(5.0, 1500.0, 5.0, 1490.0).unwrap_err();
        assert_eq!(err, RayTraceError::DegenerateProfile { z0: 5.0, z1: 5.0 });
        assert_relative_eq!(
            sound_speed_gradient(0.0, 1500.0, 50.0, 1480.0).unwrap(),
            -0.4
        );
    }
}
