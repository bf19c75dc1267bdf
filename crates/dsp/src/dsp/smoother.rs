//! Parameter Smoother - removes zipper noise from parameter changes
//!
//! One-pole exponential ramp toward the target:
//! `current += coeff * (target - current)`, advanced exactly once per sample.
use super::one_pole_coefficient;

#[derive(Debug, Clone)]
pub struct ParameterSmoother {
    current: f32,
    target: f32,
    coeff: f32,
}

impl ParameterSmoother {
    /// Create a smoother resting at `initial`. Call `reset` before use to set
    /// the time constant; until then the smoother jumps straight to targets.
    pub fn new(initial: f32) -> Self {
        Self {
            current: initial,
            target: initial,
            coeff: 1.0,
        }
    }

    /// Recompute the coefficient for a sample rate and time constant
    pub fn reset(&mut self, sample_rate: f64, time_constant_seconds: f32) {
        self.coeff = one_pole_coefficient(sample_rate, time_constant_seconds);
    }

    /// Update the goal; the output stays continuous
    #[inline]
    pub fn set_target(&mut self, target: f32) {
        self.target = target;
    }

    /// Jump to `value` with no ramp
    pub fn snap_to(&mut self, value: f32) {
        self.current = value;
        self.target = value;
    }

    /// Advance one sample toward the target
    #[inline]
    pub fn next(&mut self) -> f32 {
        self.current += self.coeff * (self.target - self.current);
        self.current
    }

    pub fn current(&self) -> f32 {
        self.current
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    pub fn is_smoothing(&self) -> bool {
        self.current != self.target
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rests_at_initial_value() {
        let mut smoother = ParameterSmoother::new(0.5);
        smoother.reset(48000.0, 0.05);
        assert_eq!(smoother.next(), 0.5);
        assert!(!smoother.is_smoothing());
    }

    #[test]
    fn test_monotonic_rise_to_63_percent() {
        let sample_rate = 44100.0;
        let mut smoother = ParameterSmoother::new(0.0);
        smoother.reset(sample_rate, 0.05);
        smoother.set_target(10.0);

        let tau_samples = (sample_rate * 0.05) as usize;
        let mut previous = smoother.current();
        for _ in 0..tau_samples {
            let value = smoother.next();
            assert!(value > previous, "Smoothing should rise strictly");
            assert!(value < 10.0, "Smoothing should not overshoot");
            previous = value;
        }

        assert!(previous >= 6.3, "Expected >= 63% of step after one tau, got {previous}");
        assert!(previous < 6.4);
    }

    #[test]
    fn test_monotonic_fall() {
        let mut smoother = ParameterSmoother::new(1.0);
        smoother.reset(48000.0, 0.05);
        smoother.set_target(0.0);

        let mut previous = smoother.current();
        for _ in 0..2400 {
            let value = smoother.next();
            assert!(value < previous);
            assert!(value > 0.0);
            previous = value;
        }
    }

    #[test]
    fn test_target_change_is_continuous() {
        let mut smoother = ParameterSmoother::new(0.0);
        smoother.reset(48000.0, 0.05);
        smoother.set_target(1.0);
        for _ in 0..100 {
            smoother.next();
        }

        let before = smoother.current();
        smoother.set_target(0.0);
        let after = smoother.next();

        // A single step moves by at most coeff * |distance|
        assert!((after - before).abs() < 0.001);
    }

    #[test]
    fn test_snap_to() {
        let mut smoother = ParameterSmoother::new(0.0);
        smoother.reset(48000.0, 0.05);
        smoother.set_target(5.0);
        smoother.next();

        smoother.snap_to(2.0);
        assert_eq!(smoother.current(), 2.0);
        assert_eq!(smoother.target(), 2.0);
        assert_eq!(smoother.next(), 2.0);
    }

    #[test]
    fn test_unreset_smoother_jumps() {
        let mut smoother = ParameterSmoother::new(0.0);
        smoother.set_target(3.0);
        assert_eq!(smoother.next(), 3.0);
    }
}
