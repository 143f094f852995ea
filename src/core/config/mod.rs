//! core::config
//!
//! Configuration schema and loading.
//!
//! # Overview
//!
//! A [`GuardConfig`] is fixed for a graph when its root is first guarded
//! and is shared by every view of that graph. It names the reserved keys and
//! chooses whether callables are returned as guardable views.
//!
//! # Sources
//!
//! Resolved in this order by [`GuardConfig::load`]:
//! 1. `$LATCHWORK_CONFIG` if set (a TOML file)
//! 2. Default values
//!
//! # Example
//!
//! ```
//! use latchwork::core::config::GuardConfig;
//!
//! let config = GuardConfig::from_toml_str("guard_callables = false").unwrap();
//! assert!(!config.guard_callables);
//! assert_eq!(config.reserved.freeze, "$freeze");
//! ```

pub mod schema;

pub use schema::{GuardConfig, Reserved, ReservedKeys};

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable naming a config file.
pub const CONFIG_ENV_VAR: &str = "LATCHWORK_CONFIG";

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config: {message}")]
    ParseError {
        path: Option<PathBuf>,
        message: String,
    },

    #[error("invalid config value: {0}")]
    InvalidValue(String),
}

impl GuardConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: GuardConfig =
            toml::from_str(contents).map_err(|e| ConfigError::ParseError {
                path: None,
                message: e.to_string(),
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse, and validate a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: GuardConfig =
            toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
                path: Some(path.to_path_buf()),
                message: e.to_string(),
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `$LATCHWORK_CONFIG`, falling back to defaults.
    pub fn load() -> Result<Self, ConfigError> {
        match std::env::var_os(CONFIG_ENV_VAR) {
            Some(path) if !path.is_empty() => {
                let path = PathBuf::from(path);
                tracing::debug!(path = %path.display(), "loading guard config");
                Self::from_file(&path)
            }
            _ => Ok(Self::default()),
        }
    }
}
