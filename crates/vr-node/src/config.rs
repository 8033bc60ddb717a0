//! # Node Configuration
//!
//! Runtime parameters for the registry host, read from the environment.
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `VR_ADMIN` | (required) | Deployer identity, used when the store holds no admin yet |
//! | `VR_DATA_DIR` | unset | File store directory; in-memory store when unset |
//! | `VR_CLOCK` | `system` | `system` (Unix seconds) or `manual` (set from each call's `now`) |
//! | `VR_CLOCK_START` | `0` | Starting value of the manual clock |
//! | `VR_EMIT_EVENTS` | `true` | Log registry events through tracing |

use std::env;
use std::path::PathBuf;

use thiserror::Error;
use vendor_registry::{Identity, Timestamp};

/// Where `verificationDate` values come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockSource {
    /// Wall clock, Unix seconds.
    System,
    /// Host-driven counter starting at the given value.
    Manual(Timestamp),
}

/// Complete node configuration.
#[derive(Debug, Clone)]
pub struct NodeConfig {
    /// Deployer identity for a fresh store.
    pub admin: Identity,
    /// File store directory (`None` = in-memory).
    pub data_dir: Option<PathBuf>,
    /// Clock adapter selection.
    pub clock: ClockSource,
    /// Whether registry events are logged.
    pub emit_events: bool,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            admin: Identity::new(""),
            data_dir: None,
            clock: ClockSource::System,
            emit_events: true,
        }
    }
}

/// Configuration errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// No deployer identity was given.
    #[error("VR_ADMIN must name the deployer identity")]
    MissingAdmin,

    /// `VR_CLOCK` holds an unknown adapter name.
    #[error("VR_CLOCK must be `system` or `manual`, got {0:?}")]
    UnknownClock(String),

    /// A numeric variable did not parse.
    #[error("{name} must be an unsigned integer, got {value:?}")]
    InvalidNumber {
        /// Variable name.
        name: &'static str,
        /// Raw value.
        value: String,
    },
}

impl NodeConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(admin) = lookup("VR_ADMIN") {
            config.admin = Identity::new(admin.trim());
        }

        config.data_dir = lookup("VR_DATA_DIR")
            .filter(|dir| !dir.trim().is_empty())
            .map(PathBuf::from);

        let start = match lookup("VR_CLOCK_START") {
            Some(value) => value.trim().parse().map_err(|_| ConfigError::InvalidNumber {
                name: "VR_CLOCK_START",
                value,
            })?,
            None => 0,
        };

        config.clock = match lookup("VR_CLOCK").as_deref().map(str::trim) {
            None | Some("") | Some("system") => ClockSource::System,
            Some("manual") => ClockSource::Manual(start),
            Some(other) => return Err(ConfigError::UnknownClock(other.to_string())),
        };

        if let Some(flag) = lookup("VR_EMIT_EVENTS") {
            config.emit_events = !matches!(
                flag.trim().to_lowercase().as_str(),
                "0" | "false" | "no" | "off"
            );
        }

        Ok(config)
    }

    /// Check the configuration before any store is touched.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.admin.is_empty() {
            return Err(ConfigError::MissingAdmin);
        }
        Ok(())
    }
}
