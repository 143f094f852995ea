//! core::config::schema
//!
//! Configuration schema types.
//!
//! # Validation
//!
//! Config values are validated after parsing: reserved key names must be
//! non-empty and pairwise distinct, otherwise one reserved key would shadow
//! another.

use serde::{Deserialize, Serialize};

use super::ConfigError;

/// Options fixed for a guarded graph when its root is first guarded.
///
/// # Example
///
/// ```toml
/// guard_callables = true
///
/// [reserved]
/// freeze = "$freeze"
/// lock = "$lock"
/// meta = "$meta"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct GuardConfig {
    /// Return callables as guardable views rather than bare values.
    pub guard_callables: bool,

    /// Names of the reserved keys.
    pub reserved: ReservedKeys,
}

impl Default for GuardConfig {
    fn default() -> Self {
        Self {
            guard_callables: true,
            reserved: ReservedKeys::default(),
        }
    }
}

impl GuardConfig {
    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.reserved.validate()
    }
}

/// Names of the keys a node view intercepts before normal dispatch.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct ReservedKeys {
    /// Reading this key freezes the view's address.
    pub freeze: String,
    /// Reading this key type-locks the view's address.
    pub lock: String,
    /// Reading this key always fails.
    pub meta: String,
}

impl Default for ReservedKeys {
    fn default() -> Self {
        Self {
            freeze: "$freeze".to_string(),
            lock: "$lock".to_string(),
            meta: "$meta".to_string(),
        }
    }
}

/// Which reserved key a name is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reserved {
    Freeze,
    Lock,
    Meta,
}

impl ReservedKeys {
    /// Classify a key name.
    pub fn classify(&self, name: &str) -> Option<Reserved> {
        if name == self.freeze {
            Some(Reserved::Freeze)
        } else if name == self.lock {
            Some(Reserved::Lock)
        } else if name == self.meta {
            Some(Reserved::Meta)
        } else {
            None
        }
    }

    /// Validate the reserved names.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, name) in [
            ("freeze", &self.freeze),
            ("lock", &self.lock),
            ("meta", &self.meta),
        ] {
            if name.is_empty() {
                return Err(ConfigError::InvalidValue(format!(
                    "reserved.{} cannot be empty",
                    field
                )));
            }
        }

        if self.freeze == self.lock || self.freeze == self.meta || self.lock == self.meta {
            return Err(ConfigError::InvalidValue(
                "reserved key names must be distinct".to_string(),
            ));
        }

        Ok(())
    }
}
