//! Configuration file loading (carpak.toml)

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default config filename, looked up in the working directory.
pub const CONFIG_FILE: &str = "carpak.toml";

fn default_level() -> String {
    "L1".to_string()
}

/// The full unifier configuration (carpak.toml)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnifierConfig {
    pub paths: PathsSection,
    #[serde(default)]
    pub settings: SettingsSection,
}

/// `[paths]` section
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsSection {
    /// Base directory holding the bracketed level folders.
    pub base: PathBuf,
}

/// `[settings]` section
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettingsSection {
    /// Level to unify when none is given on the command line.
    #[serde(default = "default_level")]
    pub level: String,
}

impl Default for SettingsSection {
    fn default() -> Self {
        Self {
            level: default_level(),
        }
    }
}

impl UnifierConfig {
    /// Load the configuration from a toml file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(Error::ConfigNotFound {
                path: path.to_path_buf(),
            });
        }
        let text = fs::read_to_string(path)?;
        Ok(toml::from_str(&text)?)
    }
}
