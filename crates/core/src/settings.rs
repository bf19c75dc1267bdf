use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Engine configuration
///
/// Playback format plus the fixed time constants of the signal chain. Hosts
/// normally only change `sample_rate` and `block_size`; the time constants are
/// exposed so offline tools can load them from TOML alongside the format.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    pub sample_rate: f64,
    pub block_size: usize,
    /// Parameter smoothing time constant in seconds
    pub smoothing_seconds: f32,
    pub envelope_attack_seconds: f32,
    pub envelope_release_seconds: f32,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            sample_rate: 48000.0,
            block_size: 512,
            smoothing_seconds: 0.05,
            envelope_attack_seconds: 0.002,
            envelope_release_seconds: 0.100,
        }
    }
}

impl EngineSettings {
    /// Default time constants with a specific playback format
    pub fn new(sample_rate: f64, block_size: usize) -> Self {
        Self {
            sample_rate,
            block_size,
            ..Default::default()
        }
    }

    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let settings: EngineSettings = toml::from_str(text)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_toml_str(&text)?;
        tracing::debug!("Loaded engine settings from {}: {:?}", path.display(), settings);
        Ok(settings)
    }

    /// Reject values that would make coefficient computation divide by zero
    /// or produce NaN
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_sample_rate(self.sample_rate)?;
        if self.block_size == 0 {
            return Err(ConfigError::InvalidBlockSize);
        }

        for (name, value) in [
            ("smoothing_seconds", self.smoothing_seconds),
            ("envelope_attack_seconds", self.envelope_attack_seconds),
            ("envelope_release_seconds", self.envelope_release_seconds),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::InvalidTimeConstant { name, value });
            }
        }
        Ok(())
    }
}

pub fn validate_sample_rate(sample_rate: f64) -> Result<(), ConfigError> {
    if sample_rate.is_finite() && sample_rate > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidSampleRate(sample_rate))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = EngineSettings::default();
        assert_eq!(settings.sample_rate, 48000.0);
        assert_eq!(settings.block_size, 512);
        assert_eq!(settings.smoothing_seconds, 0.05);
        assert_eq!(settings.envelope_attack_seconds, 0.002);
        assert_eq!(settings.envelope_release_seconds, 0.100);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_custom_settings() {
        let settings = EngineSettings::new(96000.0, 128);
        assert_eq!(settings.sample_rate, 96000.0);
        assert_eq!(settings.block_size, 128);
        assert_eq!(settings.smoothing_seconds, 0.05);
    }

    #[test]
    fn test_from_toml_partial() {
        let settings = EngineSettings::from_toml_str("sample_rate = 44100.0\nblock_size = 256\n").unwrap();
        assert_eq!(settings.sample_rate, 44100.0);
        assert_eq!(settings.block_size, 256);
        assert_eq!(settings.envelope_release_seconds, 0.100);
    }

    #[test]
    fn test_invalid_sample_rate() {
        assert!(matches!(
            EngineSettings::new(0.0, 512).validate(),
            Err(ConfigError::InvalidSampleRate(_))
        ));
        assert!(matches!(
            EngineSettings::new(-44100.0, 512).validate(),
            Err(ConfigError::InvalidSampleRate(_))
        ));
        assert!(matches!(
            EngineSettings::new(f64::NAN, 512).validate(),
            Err(ConfigError::InvalidSampleRate(_))
        ));
    }

    #[test]
    fn test_invalid_block_size() {
        assert!(matches!(
            EngineSettings::new(48000.0, 0).validate(),
            Err(ConfigError::InvalidBlockSize)
        ));
    }

    #[test]
    fn test_invalid_time_constant() {
        let result = EngineSettings::from_toml_str("envelope_attack_seconds = 0.0");
        assert!(matches!(
            result,
            Err(ConfigError::InvalidTimeConstant { name: "envelope_attack_seconds", .. })
        ));
    }
}
