//! Storage configuration

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// JSON option file used by the file-backed store
    /// Env: RG_SETTINGS_PATH
    pub settings_path: String,

    /// Key the settings record is persisted under
    /// Env: RG_SETTINGS_KEY
    pub settings_key: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            settings_path: "./data/roleguard-options.json".to_string(),
            settings_key: "roleguard_settings".to_string(),
        }
    }
}

impl StorageConfig {
    pub fn merge(&mut self, other: Self) {
        *self = other;
    }

    pub fn apply_env_vars(&mut self) {
        if let Ok(path) = env::var("RG_SETTINGS_PATH") {
            self.settings_path = path;
        }
        if let Ok(key) = env::var("RG_SETTINGS_KEY") {
            self.settings_key = key;
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.settings_key.trim().is_empty() {
            bail!("storage.settings_key cannot be empty");
        }
        Ok(())
    }
}
