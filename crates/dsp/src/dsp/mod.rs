//! DSP (Digital Signal Processing) modules
//!
//! The per-sample stages of the saturation chain, leaf to root:
//! - Smoother: one-pole parameter smoothing for drive and mix
//! - Envelope: asymmetric attack/release amplitude follower
//! - Saturation: cubic pre-shaping into a tanh soft clipper
//! - Harmonics: synthetic 2nd/3rd order content added to the saturated signal
//! - Transient: envelope-driven attack emphasis
//! - Makeup: loudness compensation for the preceding stages
//! - Chain: one channel's composition of the above
//!
//! Everything except the chain and the envelope state is a pure function of
//! its inputs, so the stages can be exercised in isolation.
pub mod chain;
pub mod envelope;
pub mod harmonics;
pub mod makeup;
pub mod saturation;
pub mod smoother;
pub mod transient;

pub use chain::ChannelChain;
pub use envelope::{EnvelopeFollower, EnvelopeState};
pub use harmonics::harmonics;
pub use makeup::makeup_gain;
pub use saturation::saturate;
pub use smoother::ParameterSmoother;
pub use transient::transient_shape;

/// Per-sample coefficient of a one-pole filter with time constant `seconds`:
/// `1 - exp(-1 / (sample_rate * seconds))`.
///
/// A non-positive product yields 1.0 (jump straight to the input) instead of
/// NaN; callers are expected to have rejected such rates at prepare time.
#[inline]
pub fn one_pole_coefficient(sample_rate: f64, seconds: f32) -> f32 {
    let samples = sample_rate * seconds as f64;
    if !(samples > 0.0 && samples.is_finite()) {
        return 1.0;
    }
    (1.0 - (-1.0 / samples).exp()) as f32
}

/// Saturate to the finite `f32` range; infinities become `±f32::MAX`
#[inline]
pub(crate) fn clamp_finite(x: f32) -> f32 {
    x.clamp(f32::MIN, f32::MAX)
}
