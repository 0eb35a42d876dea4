//! Peripheral configuration.
//!
//! Everything has a default matching the deployed hub, so an empty JSON
//! object (or no file at all) yields a working peripheral. Nothing here is
//! ever written back to disk.

use core::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::gatt::{LOCAL_NAME, ServiceDescriptor};

/// Longest local name that still fits a legacy advertising PDU next to
/// the flags and a 128-bit service UUID.
pub const MAX_LOCAL_NAME_LEN: usize = 29;

/// Core peripheral configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PeripheralConfig {
    /// Advertised local name
    pub local_name: String,
    /// Service and characteristic identifiers
    pub service: ServiceDescriptor,
    /// Reject frames with bad magic or a length field that disagrees with
    /// the payload. Off by default: deployed hubs accept both.
    pub strict_framing: bool,
    /// Pretty-print response JSON
    pub pretty_json: bool,
}

impl Default for PeripheralConfig {
    fn default() -> Self {
        Self {
            local_name: LOCAL_NAME.to_owned(),
            service: ServiceDescriptor::ACTIVE_HUB,
            strict_framing: false,
            pretty_json: true,
        }
    }
}

impl PeripheralConfig {
    /// Read a JSON config file. Missing fields take their defaults; the
    /// result is validated before it is returned.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(format!("{}: {}", path.display(), e)))?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(text).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the transport could not honour.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.local_name.is_empty() {
            return Err(ConfigError::Invalid("local_name is empty"));
        }
        if self.local_name.len() > MAX_LOCAL_NAME_LEN {
            return Err(ConfigError::Invalid("local_name longer than 29 bytes"));
        }
        if !self.service.ids_distinct() {
            return Err(ConfigError::Invalid(
                "service and characteristic ids must be distinct",
            ));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The file could not be read.
    Io(String),
    /// The file is not valid config JSON.
    Parse(String),
    /// A field failed validation. Names the field and why.
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(msg) => write!(f, "I/O error: {}", msg),
            Self::Parse(msg) => write!(f, "parse error: {}", msg),
            Self::Invalid(msg) => write!(f, "validation failed: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}
