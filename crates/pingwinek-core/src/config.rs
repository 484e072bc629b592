//! Session configuration supplied by the host app.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Storage keys for the persisted collections.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StorageKeys {
    pub children: String,
    pub history: String,
    pub temperature_log: String,
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self {
            children: "children".into(),
            history: "dose_history".into(),
            temperature_log: "temperature_log".into(),
        }
    }
}

/// Core configuration. Every field is optional in JSON.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CoreConfig {
    /// SQLite file; `None` keeps everything in memory
    pub database_path: Option<PathBuf>,
    pub storage_keys: StorageKeys,
    /// Start the catalog with the built-in medications
    pub seed_default_catalog: bool,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            database_path: None,
            storage_keys: StorageKeys::default(),
            seed_default_catalog: true,
        }
    }
}

impl CoreConfig {
    /// Parse a JSON config; missing fields fall back to defaults.
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
