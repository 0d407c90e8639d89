//! Reconciliation configuration
//!
//! Pure data: parsed from the `[reconcile]` table of a TOML document.
//! Reading files is the job of the infrastructure layer.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Protocol major version from which the secondary image slot is declared
/// in window capabilities.
pub const DEFAULT_SECONDARY_GRAPHIC_MIN_MAJOR: u8 = 5;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid reconcile config: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReconcileConfig {
    /// Below this major version the secondary slot is assumed supported
    /// whenever the primary slot is.
    pub secondary_graphic_min_protocol_major: u8,

    /// Log every outbound payload as JSON at debug level.
    pub trace_payloads: bool,
}

impl Default for ReconcileConfig {
    fn default() -> Self {
        Self {
            secondary_graphic_min_protocol_major: DEFAULT_SECONDARY_GRAPHIC_MIN_MAJOR,
            trace_payloads: false,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct ConfigDocument {
    #[serde(default)]
    reconcile: ReconcileConfig,
}

impl ReconcileConfig {
    /// Parse the `[reconcile]` table; a missing table yields defaults.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let document: ConfigDocument = toml::from_str(source)?;
        Ok(document.reconcile)
    }
}
