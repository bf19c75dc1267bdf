//! Saturation - clean solid-state style soft clipping
//!
//! A gentle cubic pre-shaping `x - k*x^3` followed by a tanh limiter whose
//! input gain rises slightly with drive. At zero drive the curve is plain
//! `tanh(x)`, so it is close to transparent for small signals only.

/// Inputs below this magnitude are passed through untouched
pub const SATURATION_EPSILON: f32 = 1e-4;

/// Cubic coefficient at full drive
pub const CUBIC_AMOUNT_MAX: f64 = 0.12;

/// Extra tanh input gain at full drive
pub const TANH_GAIN_MAX: f64 = 0.1;

/// Largest `f32` strictly below 1.0. `tanh` rounds to exactly 1.0 for large
/// arguments, which would break the `|y| < 1` bound.
const OUTPUT_CEILING: f32 = 1.0 - f32::EPSILON / 2.0;

/// Saturate one sample. `drive_norm` is drive / drive max, in `[0, 1]`.
///
/// The output magnitude is below 1.0 for every finite input.
#[inline]
pub fn saturate(x: f32, drive_norm: f32) -> f32 {
    if x.abs() < SATURATION_EPSILON {
        return x;
    }

    // f64 keeps x^3 finite for any finite f32 input
    let x = x as f64;
    let drive_norm = drive_norm as f64;

    let k = CUBIC_AMOUNT_MAX * drive_norm;
    let shaped = x - k * x * x * x;

    let gain = 1.0 + TANH_GAIN_MAX * drive_norm;
    let y = ((shaped * gain).tanh() / gain) as f32;

    y.clamp(-OUTPUT_CEILING, OUTPUT_CEILING)
}
