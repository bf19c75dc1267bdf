/// Loudness drop applied at full drive, as `1 / (1 + amount)`
pub const MAKEUP_AMOUNT: f32 = 0.5;

/// Compensation gain applied after the transient stage
#[inline]
pub fn makeup_gain(drive_norm: f32) -> f32 {
    1.0 / (1.0 + MAKEUP_AMOUNT * drive_norm)
}
