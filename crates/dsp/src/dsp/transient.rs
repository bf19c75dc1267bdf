//! Transient Shaper - sharpens attacks against the running envelope
//!
//! Updates the channel's envelope first, then boosts the sample by the amount
//! the instantaneous level exceeds that envelope. The output depends on the
//! signal history through the envelope, so samples must be fed strictly in
//! order, one call per sample, with the channel's own state.
use super::clamp_finite;
use super::envelope::{EnvelopeFollower, EnvelopeState};

/// Boost amount at full drive
pub const TRANSIENT_AMOUNT_MAX: f32 = 0.20;

#[inline]
pub fn transient_shape(
    x: f32,
    follower: &EnvelopeFollower,
    envelope: &mut EnvelopeState,
    drive_norm: f32,
) -> f32 {
    let level = follower.process(envelope, x);

    let transient = x.abs() - level;
    if transient > 0.0 {
        let amount = TRANSIENT_AMOUNT_MAX * drive_norm;
        clamp_finite(x + x * (transient * amount * 2.0))
    } else {
        x
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn follower() -> EnvelopeFollower {
        EnvelopeFollower::with_default_times(48000.0)
    }

    #[test]
    fn test_zero_drive_passthrough() {
        let follower = follower();
        let mut envelope = EnvelopeState::default();
        for x in [0.9_f32, -0.4, 0.0, 0.6, 1.0] {
            assert_eq!(transient_shape(x, &follower, &mut envelope, 0.0), x);
        }
        assert!(envelope.value > 0.0, "Envelope tracks even at zero drive");
    }

    #[test]
    fn test_attack_is_boosted() {
        let follower = follower();
        let mut envelope = EnvelopeState::default();

        let x = 0.8;
        let y = transient_shape(x, &follower, &mut envelope, 1.0);

        let transient = x - envelope.value;
        let expected = x + x * transient * TRANSIENT_AMOUNT_MAX * 2.0;
        assert!((y - expected).abs() < 1e-6);
        assert!(y > x);
    }

    #[test]
    fn test_sustained_signal_not_boosted() {
        let follower = follower();
        let mut envelope = EnvelopeState::default();

        // Let the envelope catch up with a steady level
        for _ in 0..2000 {
            transient_shape(0.5, &follower, &mut envelope, 1.0);
        }
        // A slightly quieter sample sits below the envelope
        assert_eq!(transient_shape(0.45, &follower, &mut envelope, 1.0), 0.45);
    }

    #[test]
    fn test_polarity_preserved() {
        let follower = follower();
        let mut envelope = EnvelopeState::default();
        let y = transient_shape(-0.8, &follower, &mut envelope, 1.0);
        assert!(y < -0.8);
    }

    #[test]
    fn test_full_scale_boost_stays_finite() {
        let follower = follower();
        let mut envelope = EnvelopeState::default();

        assert_eq!(transient_shape(f32::MIN, &follower, &mut envelope, 1.0), f32::MIN);
        assert!(envelope.value.is_finite() && envelope.value > 0.0);
    }

    #[test]
    fn test_history_dependence() {
        let follower = follower();

        let mut fresh = EnvelopeState::default();
        let first = transient_shape(0.5, &follower, &mut fresh, 1.0);

        let mut primed = EnvelopeState { value: 0.5 };
        let second = transient_shape(0.5, &follower, &mut primed, 1.0);

        assert!(first > second, "Same input, different history, different output");
        assert_eq!(second, 0.5);
    }
}
