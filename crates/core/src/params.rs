//! Parameter layout table
//!
//! The upfront description of every user parameter: range, default, step and
//! display formatting. The DSP core never reads this table; it is consumed by
//! the parameter store and by hosts that build their own controls.
use crate::error::ParamError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifies one of the user-facing parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamId {
    Drive,
    Mix,
}

impl ParamId {
    /// All parameters, in layout order
    pub const ALL: [ParamId; 2] = [ParamId::Drive, ParamId::Mix];

    /// Stable identifier used for persisted state and host automation
    pub fn as_str(&self) -> &'static str {
        self.spec().id
    }

    /// Layout entry for this parameter
    pub fn spec(&self) -> &'static ParamSpec {
        &PARAMETER_LAYOUT[self.index()]
    }

    /// Position in the layout table
    pub(crate) fn index(&self) -> usize {
        match self {
            ParamId::Drive => 0,
            ParamId::Mix => 1,
        }
    }
}

impl fmt::Display for ParamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.spec().name)
    }
}

impl FromStr for ParamId {
    type Err = ParamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ParamId::ALL
            .into_iter()
            .find(|id| id.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParamError::UnknownParameter(s.to_string()))
    }
}

/// Range, default and display description of a single parameter
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamSpec {
    pub id: &'static str,
    pub name: &'static str,
    /// Host-facing unit label
    pub label: &'static str,
    pub min: f32,
    pub max: f32,
    pub default: f32,
    pub step: f32,
    /// Decimal places shown by `format_value`
    pub decimals: usize,
    /// Suffix appended by `format_value`
    pub suffix: &'static str,
}

pub const DRIVE_MAX: f32 = 10.0;
pub const MIX_MAX: f32 = 100.0;

pub static PARAMETER_LAYOUT: [ParamSpec; 2] = [
    ParamSpec {
        id: "drive",
        name: "Drive",
        label: "Drive",
        min: 0.0,
        max: DRIVE_MAX,
        default: 0.0,
        step: 0.1,
        decimals: 1,
        suffix: "",
    },
    ParamSpec {
        id: "mix",
        name: "Mix",
        label: "%",
        min: 0.0,
        max: MIX_MAX,
        default: 100.0,
        step: 1.0,
        decimals: 0,
        suffix: "%",
    },
];

impl ParamSpec {
    /// Clamp to the range and snap to the nearest step above `min`.
    ///
    /// Non-finite input yields the default value.
    pub fn clamp(&self, value: f32) -> f32 {
        if !value.is_finite() {
            return self.default;
        }

        let clamped = value.clamp(self.min, self.max);
        if self.step <= 0.0 {
            return clamped;
        }

        let steps = ((clamped - self.min) / self.step).round();
        (self.min + steps * self.step).clamp(self.min, self.max)
    }

    /// Map a plain value to `[0, 1]`
    pub fn normalize(&self, value: f32) -> f32 {
        ((self.clamp(value) - self.min) / (self.max - self.min)).clamp(0.0, 1.0)
    }

    /// Map a `[0, 1]` value back into the plain range (clamped and snapped)
    pub fn denormalize(&self, normalized: f32) -> f32 {
        let n = if normalized.is_finite() {
            normalized.clamp(0.0, 1.0)
        } else {
            return self.default;
        };
        self.clamp(self.min + n * (self.max - self.min))
    }

    /// Display text, e.g. `"5.0"` for drive or `"100%"` for mix
    pub fn format_value(&self, value: f32) -> String {
        format!("{:.*}{}", self.decimals, value, self.suffix)
    }

    /// Parse user-entered text, tolerating whitespace and a trailing unit
    pub fn parse_value(&self, text: &str) -> Result<f32, ParamError> {
        let trimmed = text.trim();
        let number = trimmed
            .strip_suffix(self.suffix)
            .filter(|_| !self.suffix.is_empty())
            .unwrap_or(trimmed)
            .trim();

        number
            .parse::<f32>()
            .ok()
            .filter(|v| v.is_finite())
            .map(|v| self.clamp(v))
            .ok_or_else(|| ParamError::UnparsableValue {
                param: self.name,
                text: text.to_string(),
            })
    }
}
