//! Harmonics - synthetic low-order harmonic content
//!
//! `x*|x|` contributes even-order "thickness", `x^3` odd-order "edge". The
//! result is added to the saturated signal, not blended with it.
use super::clamp_finite;

/// 2nd order amount at full drive
pub const SECOND_HARMONIC_AMOUNT: f32 = 0.15;

/// 3rd order amount at full drive
pub const THIRD_HARMONIC_AMOUNT: f32 = 0.04;

/// Harmonic content for one sample; exactly zero at zero drive.
///
/// Finite for every finite input.
#[inline]
pub fn harmonics(x: f32, drive_norm: f32) -> f32 {
    if drive_norm <= 0.0 {
        return 0.0;
    }

    // x^3 overflows f32 above ~7e12
    let x = x as f64;
    let drive_norm = drive_norm as f64;

    let second = x * x.abs() * SECOND_HARMONIC_AMOUNT as f64 * drive_norm;
    let third = x * x * x * THIRD_HARMONIC_AMOUNT as f64 * drive_norm;
    clamp_finite((second - third) as f32)
}
