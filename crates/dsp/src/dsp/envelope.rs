//! Envelope Follower - running amplitude estimate with asymmetric response
//!
//! `envelope += coeff * (|x| - envelope)`, using the attack coefficient while
//! the signal rises above the estimate and the release coefficient otherwise.
//! The follower only holds coefficients; the estimate itself lives in an
//! `EnvelopeState` owned by each channel.
use super::one_pole_coefficient;

pub const DEFAULT_ATTACK_SECONDS: f32 = 0.002;
pub const DEFAULT_RELEASE_SECONDS: f32 = 0.100;

/// Per-channel envelope estimate (always >= 0)
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EnvelopeState {
    pub value: f32,
}

impl EnvelopeState {
    pub fn reset(&mut self) {
        self.value = 0.0;
    }
}

#[derive(Debug, Clone, Copy)]
pub struct EnvelopeFollower {
    attack_coeff: f32,
    release_coeff: f32,
}

impl EnvelopeFollower {
    /// Coefficients for the given rate and time constants.
    ///
    /// `sample_rate` must be positive; engines validate it at prepare time.
    pub fn new(sample_rate: f64, attack_seconds: f32, release_seconds: f32) -> Self {
        debug_assert!(sample_rate > 0.0, "sample rate must be validated before use");
        Self {
            attack_coeff: one_pole_coefficient(sample_rate, attack_seconds),
            release_coeff: one_pole_coefficient(sample_rate, release_seconds),
        }
    }

    pub fn with_default_times(sample_rate: f64) -> Self {
        Self::new(sample_rate, DEFAULT_ATTACK_SECONDS, DEFAULT_RELEASE_SECONDS)
    }

    pub fn attack_coeff(&self) -> f32 {
        self.attack_coeff
    }

    pub fn release_coeff(&self) -> f32 {
        self.release_coeff
    }

    /// Update `state` with one input sample and return the new estimate
    #[inline]
    pub fn process(&self, state: &mut EnvelopeState, input: f32) -> f32 {
        let abs_input = input.abs();
        let coeff = if abs_input > state.value {
            self.attack_coeff
        } else {
            self.release_coeff
        };

        state.value += coeff * (abs_input - state.value);
        state.value
    }
}
