//! Configuration error types

use std::path::PathBuf;

use swell_core::InvalidTuning;
use thiserror::Error;

/// Errors raised while loading or validating configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Config file exists but could not be read
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid TOML for this schema
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// Config could not be serialized
    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// A setting is out of range
    #[error("Invalid setting `{key}`: {reason}")]
    Invalid { key: &'static str, reason: &'static str },
}

impl ConfigError {
    pub(crate) fn invalid(key: &'static str, reason: &'static str) -> Self {
        Self::Invalid { key, reason }
    }
}

impl From<InvalidTuning> for ConfigError {
    fn from(InvalidTuning { key, reason }: InvalidTuning) -> Self {
        Self::Invalid { key, reason }
    }
}

/// Result type for configuration operations
pub type Result<T> = std::result::Result<T, ConfigError>;
