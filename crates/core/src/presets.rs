//! Preset bank
//!
//! Named drive/mix pairs. The factory bank is compiled in; additional presets
//! can be loaded from a TOML file made of `[[preset]]` tables.
use crate::error::ConfigError;
use crate::params::ParamId;
use crate::store::ParameterStore;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Preset {
    pub name: String,
    pub drive: f32,
    pub mix: f32,
}

impl Preset {
    pub fn new(name: impl Into<String>, drive: f32, mix: f32) -> Self {
        Self {
            name: name.into(),
            drive,
            mix,
        }
    }

    /// Write both targets into the store
    pub fn apply(&self, store: &ParameterStore) {
        store.set_target(ParamId::Drive, self.drive);
        store.set_target(ParamId::Mix, self.mix);
    }
}

/// Built-in presets
pub fn factory_presets() -> Vec<Preset> {
    vec![
        Preset::new("Init", 0.0, 100.0),
        Preset::new("Subtle Polish", 2.0, 100.0),
        Preset::new("Mastering Glue", 3.5, 80.0),
        Preset::new("Acoustic Air", 5.0, 60.0),
        Preset::new("Full Color", 8.0, 100.0),
        Preset::new("Parallel Drive", 10.0, 40.0),
    ]
}

#[derive(Debug, Default, Deserialize, Serialize)]
struct PresetFile {
    #[serde(default, rename = "preset")]
    presets: Vec<Preset>,
}

#[derive(Clone, Debug)]
pub struct PresetBank {
    presets: Vec<Preset>,
}

impl Default for PresetBank {
    fn default() -> Self {
        Self::factory()
    }
}

impl PresetBank {
    /// Bank containing only the factory presets
    pub fn factory() -> Self {
        Self {
            presets: factory_presets(),
        }
    }

    /// Append presets parsed from TOML text
    pub fn extend_from_toml_str(&mut self, text: &str) -> Result<usize, ConfigError> {
        let file: PresetFile = toml::from_str(text)?;
        let count = file.presets.len();
        self.presets.extend(file.presets);
        Ok(count)
    }

    /// Factory bank plus the presets found in `path`
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let mut bank = Self::factory();
        let count = bank.extend_from_toml_str(&text)?;
        tracing::debug!("Loaded {} presets from {}", count, path.display());
        Ok(bank)
    }

    /// Case-insensitive lookup by name; later entries shadow earlier ones
    pub fn find(&self, name: &str) -> Option<&Preset> {
        self.presets
            .iter()
            .rev()
            .find(|p| p.name.eq_ignore_ascii_case(name.trim()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Preset> {
        self.presets.iter()
    }

    pub fn len(&self) -> usize {
        self.presets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }
}
