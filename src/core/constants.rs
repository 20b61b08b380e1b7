//! Physical constants and numerical thresholds

/// Speed of sound in water under standard conditions (m/s)
pub const SPEED_OF_SOUND_WATER: f64 = 1500.0;

/// Degrees to radians conversion factor
pub const D2R: f64 = std::f64::consts::PI / 180.0;

/// Sound-speed gradients with a magnitude below this threshold are treated
/// as zero and the layer is propagated as isovelocity.
// TODO: find a physically significant value for this epsilon
pub const DEFAULT_GRADIENT_EPSILON: f64 = 1e-6;
