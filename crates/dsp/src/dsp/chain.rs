use super::clamp_finite;
use super::envelope::{EnvelopeFollower, EnvelopeState};
use super::harmonics::harmonics;
use super::makeup::makeup_gain;
use super::saturation::saturate;
use super::transient::transient_shape;

/// Clean boost ahead of the shaper at full drive (+100%, about +6 dB)
pub const PRE_GAIN_MAX: f32 = 1.0;

/// Dry/wet crossfade, `mix` in `[0, 1]`. Exactly `dry` at `mix == 0`.
#[inline]
pub fn blend(dry: f32, wet: f32, mix: f32) -> f32 {
    if mix == 0.0 {
        return dry;
    }
    clamp_finite(dry * (1.0 - mix) + wet * mix)
}

/// One channel of the saturation chain
///
/// Owns the channel's envelope follower and its persistent envelope
/// estimate. Drive is supplied per sample by the engine so that every channel
/// sees the same smoothed value.
#[derive(Debug, Clone)]
pub struct ChannelChain {
    follower: EnvelopeFollower,
    envelope: EnvelopeState,
}

impl ChannelChain {
    pub fn new(follower: EnvelopeFollower) -> Self {
        Self {
            follower,
            envelope: EnvelopeState::default(),
        }
    }

    /// Install new envelope coefficients and zero the envelope
    pub fn prepare(&mut self, follower: EnvelopeFollower) {
        self.follower = follower;
        self.envelope.reset();
    }

    /// Current envelope estimate
    pub fn envelope(&self) -> f32 {
        self.envelope.value
    }

    /// Produce the wet sample for one dry input
    #[inline]
    pub fn process(&mut self, dry: f32, drive_norm: f32) -> f32 {
        let driven = clamp_finite(dry * (1.0 + PRE_GAIN_MAX * drive_norm));

        let mut wet = saturate(driven, drive_norm);
        wet += harmonics(driven, drive_norm);
        wet = transient_shape(wet, &self.follower, &mut self.envelope, drive_norm);
        wet * makeup_gain(drive_norm)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain() -> ChannelChain {
        ChannelChain::new(EnvelopeFollower::with_default_times(44100.0))
    }

    #[test]
    fn test_silence() {
        let mut chain = chain();
        for drive_norm in [0.0, 0.5, 1.0] {
            for _ in 0..64 {
                assert_eq!(chain.process(0.0, drive_norm), 0.0);
            }
        }
        assert_eq!(chain.envelope(), 0.0);
    }

    #[test]
    fn test_zero_drive_is_saturation_only() {
        let mut chain = chain();
        let wet = chain.process(1.0, 0.0);
        assert!((wet - 1.0_f64.tanh() as f32).abs() < 1e-6);
    }

    #[test]
    fn test_full_drive_composition() {
        let mut chain = chain();
        let follower = EnvelopeFollower::with_default_times(44100.0);
        let mut envelope = EnvelopeState::default();

        let dry = 0.4;
        let driven = dry * 2.0;
        let mut expected = saturate(driven, 1.0) + harmonics(driven, 1.0);
        expected = transient_shape(expected, &follower, &mut envelope, 1.0);
        expected *= makeup_gain(1.0);

        assert_eq!(chain.process(dry, 1.0), expected);
        assert_eq!(chain.envelope(), envelope.value);
    }

    #[test]
    fn test_prepare_zeroes_envelope() {
        let mut chain = chain();
        for _ in 0..100 {
            chain.process(0.7, 0.6);
        }
        assert!(chain.envelope() > 0.0);

        chain.prepare(EnvelopeFollower::with_default_times(96000.0));
        assert_eq!(chain.envelope(), 0.0);
    }

    #[test]
    fn test_huge_input_keeps_chain_finite() {
        let mut chain = chain();
        for dry in [1e13_f32, -1e13, f32::MAX, f32::MIN] {
            let wet = chain.process(dry, 1.0);
            assert!(wet.is_finite(), "dry = {dry}, wet = {wet}");
            assert!(chain.envelope().is_finite());
        }

        // Ordinary material afterwards is processed normally
        chain.prepare(EnvelopeFollower::with_default_times(44100.0));
        assert!((chain.process(1.0, 0.0) - 1.0_f64.tanh() as f32).abs() < 1e-6);
    }

    #[test]
    fn test_blend() {
        assert_eq!(blend(0.3, 0.9, 0.0), 0.3);
        assert_eq!(blend(0.3, f32::INFINITY, 0.0), 0.3);
        assert_eq!(blend(f32::MAX, f32::MAX, 0.5), f32::MAX);
        assert_eq!(blend(0.3, 0.9, 1.0), 0.9);
        assert!((blend(0.2, 0.6, 0.5) - 0.4).abs() < 1e-7);
    }
}
