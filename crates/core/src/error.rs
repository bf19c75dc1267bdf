use std::path::PathBuf;
use thiserror::Error;

/// Invalid engine configuration, reported at prepare/load time only
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("sample rate must be positive and finite, got {0}")]
    InvalidSampleRate(f64),

    #[error("block size must be at least one frame")]
    InvalidBlockSize,

    #[error("{name} must be positive and finite, got {value}")]
    InvalidTimeConstant { name: &'static str, value: f32 },

    #[error("failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Plugin state that could not be saved or restored
#[derive(Debug, Error)]
pub enum StateError {
    #[error("malformed state data: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("unsupported state version {found} (expected at most {supported})")]
    UnsupportedVersion { found: u32, supported: u32 },

    #[error("{param} is not a finite number ({value})")]
    NonFinite { param: &'static str, value: f32 },
}

/// Errors from parameter lookup and text entry
#[derive(Debug, Error, PartialEq)]
pub enum ParamError {
    #[error("unknown parameter '{0}'")]
    UnknownParameter(String),

    #[error("cannot parse '{text}' as a value for {param}")]
    UnparsableValue { param: &'static str, text: String },
}
