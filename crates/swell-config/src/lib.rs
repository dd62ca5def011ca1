//! Configuration file support for swell.
//!
//! Settings live in a TOML file under the platform config directory
//! (`~/.config/swell/config.toml` on Linux). Every key is optional; a
//! missing file yields the defaults.

mod error;

use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use swell_core::FieldTuning;

pub use error::{ConfigError, Result};

/// File name inside the config directory.
const CONFIG_FILE: &str = "config.toml";

/// Application settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Delay between frames for hosts without a display refresh signal.
    pub frame_interval_ms: u64,
    /// Animation constants.
    pub field: FieldTuning,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            frame_interval_ms: 16,
            field: FieldTuning::default(),
        }
    }
}

/// Project directories for swell, if the platform has a home directory.
pub fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", "swell")
}

/// Default location of the config file.
pub fn default_path() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE))
}

impl Config {
    /// Load from `path`, or from [`default_path`] when `None`.
    ///
    /// A file that does not exist yields the defaults. An explicit path
    /// that cannot be read is still an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let (path, explicit) = match path {
            Some(p) => (p.to_path_buf(), true),
            None => match default_path() {
                Some(p) => (p, false),
                None => {
                    tracing::debug!("no home directory, using default config");
                    return Ok(Self::default());
                }
            },
        };

        if !explicit && !path.exists() {
            tracing::debug!(path = %path.display(), "config file not found, using defaults");
            return Ok(Self::default());
        }

        let text = fs::read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;
        let config = Self::from_toml_str(&text)?;
        tracing::info!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Parse and validate TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to TOML, e.g. to write out a starter file.
    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Check that the settings describe a sensible animation.
    pub fn validate(&self) -> Result<()> {
        if self.frame_interval_ms == 0 {
            return Err(ConfigError::invalid(
                "frame_interval_ms",
                "must be at least 1",
            ));
        }
        Ok(self.field.validate()?)
    }
}
