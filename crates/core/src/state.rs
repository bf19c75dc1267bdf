use crate::error::StateError;
use crate::params::ParamId;
use serde::{Deserialize, Serialize};

/// Current persisted state layout version
pub const STATE_VERSION: u32 = 1;

fn default_version() -> u32 {
    STATE_VERSION
}

fn default_drive() -> f32 {
    ParamId::Drive.spec().default
}

fn default_mix() -> f32 {
    ParamId::Mix.spec().default
}

/// Persisted plugin state
///
/// Only the parameter targets are saved. Envelope and smoothing state always
/// start fresh after the engine is prepared.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PluginState {
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default = "default_drive")]
    pub drive: f32,
    #[serde(default = "default_mix")]
    pub mix: f32,
}

impl Default for PluginState {
    fn default() -> Self {
        Self::new(default_drive(), default_mix())
    }
}

impl PluginState {
    pub fn new(drive: f32, mix: f32) -> Self {
        Self {
            version: STATE_VERSION,
            drive,
            mix,
        }
    }

    /// Serialize for the host's state blob.
    ///
    /// JSON has no NaN or infinity, so non-finite values are refused here
    /// rather than written as a blob `from_bytes` cannot read back.
    pub fn to_bytes(&self) -> Result<Vec<u8>, StateError> {
        for (id, value) in [(ParamId::Drive, self.drive), (ParamId::Mix, self.mix)] {
            if !value.is_finite() {
                return Err(StateError::NonFinite {
                    param: id.as_str(),
                    value,
                });
            }
        }
        Ok(serde_json::to_vec(self)?)
    }

    /// Parse a state blob produced by `to_bytes`
    pub fn from_bytes(data: &[u8]) -> Result<Self, StateError> {
        let state: PluginState = serde_json::from_slice(data)?;
        if state.version > STATE_VERSION {
            return Err(StateError::UnsupportedVersion {
                found: state.version,
                supported: STATE_VERSION,
            });
        }
        Ok(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_state() {
        let state = PluginState::default();
        assert_eq!(state.version, STATE_VERSION);
        assert_eq!(state.drive, 0.0);
        assert_eq!(state.mix, 100.0);
    }

    #[test]
    fn test_bytes_roundtrip() {
        let state = PluginState::new(4.2, 65.0);
        let restored = PluginState::from_bytes(&state.to_bytes().unwrap()).unwrap();
        assert_eq!(restored, state);
    }

    #[test]
    fn test_non_finite_state_not_serialized() {
        let result = PluginState::new(f32::NAN, 50.0).to_bytes();
        assert!(matches!(
            result,
            Err(StateError::NonFinite { param: "drive", .. })
        ));

        let result = PluginState::new(2.0, f32::INFINITY).to_bytes();
        assert!(matches!(result, Err(StateError::NonFinite { param: "mix", .. })));
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let state = PluginState::from_bytes(br#"{"drive": 3.0}"#).unwrap();
        assert_eq!(state.drive, 3.0);
        assert_eq!(state.mix, 100.0);
        assert_eq!(state.version, STATE_VERSION);
    }

    #[test]
    fn test_malformed_data_rejected() {
        let result = PluginState::from_bytes(b"<VT2WWhite drive=\"3\"/>");
        assert!(matches!(result, Err(StateError::Malformed(_))));
    }

    #[test]
    fn test_future_version_rejected() {
        let result = PluginState::from_bytes(br#"{"version": 9, "drive": 1.0, "mix": 50.0}"#);
        assert!(matches!(
            result,
            Err(StateError::UnsupportedVersion { found: 9, .. })
        ));
    }
}
