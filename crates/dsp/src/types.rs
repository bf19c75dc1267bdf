/// Interleaved 32-bit float frames, processed in place
#[derive(Debug)]
pub struct AudioBlockMut<'a> {
    /// Interleaved audio frames (len = n_frames * n_channels)
    pub frames: &'a mut [f32],
    /// Number of channels (1 for mono, 2 for stereo)
    pub channels: usize,
}

impl<'a> AudioBlockMut<'a> {
    pub fn new(frames: &'a mut [f32], channels: usize) -> Self {
        Self { frames, channels }
    }

    /// Get the number of complete frames in this block
    pub fn num_frames(&self) -> usize {
        if self.channels == 0 {
            0
        } else {
            self.frames.len() / self.channels
        }
    }

    /// Validate that the sample count is consistent with channels
    pub fn is_valid(&self) -> bool {
        self.channels > 0 && self.frames.len() % self.channels == 0
    }
}

/// Peak level in dBFS (-inf for silence)
pub fn calculate_peak_dbfs(samples: &[f32]) -> f32 {
    let peak = samples.iter().fold(0.0_f32, |acc, s| acc.max(s.abs()));
    20.0 * peak.log10()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_audio_block_validation() {
        let mut frames = vec![0.0; 480];
        let block = AudioBlockMut::new(&mut frames, 2);

        assert!(block.is_valid());
        assert_eq!(block.num_frames(), 240);
    }

    #[test]
    fn test_audio_block_invalid() {
        let mut frames = vec![0.0; 481];
        assert!(!AudioBlockMut::new(&mut frames, 2).is_valid());
        assert!(!AudioBlockMut::new(&mut frames, 0).is_valid());
        assert_eq!(AudioBlockMut::new(&mut frames, 0).num_frames(), 0);
    }

    #[test]
    fn test_peak_dbfs() {
        let peak = calculate_peak_dbfs(&[0.5, -0.25, 0.1]);
        assert!((peak - (-6.02)).abs() < 0.01);
        assert_eq!(calculate_peak_dbfs(&[0.0; 4]), f32::NEG_INFINITY);
    }
}
