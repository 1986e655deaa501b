//! Configuration system for Roleguard
//!
//! Runtime configuration is separate from the policy [`Settings`](crate::settings::Settings):
//! it says *where* settings live and *how* the process logs, never *what* is restricted.
//!
//! # Configuration Hierarchy
//!
//! Values are resolved in the following order (highest priority wins):
//!
//! 1. **Environment Variables** - `RG_*`
//! 2. **Config File** (roleguard.toml) - Override defaults
//! 3. **Defaults** - Lowest priority
//!
//! # Example
//!
//! ```no_run
//! use roleguard_core::config::RoleguardConfig;
//!
//! let config = RoleguardConfig::load()?;
//! let config = RoleguardConfig::load_from("/etc/roleguard/roleguard.toml")?;
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod logging;
pub mod policy;
pub mod storage;

pub use logging::LoggingConfig;
pub use policy::PolicyConfig;
pub use storage::StorageConfig;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default config file looked up by [`RoleguardConfig::load`]
pub const DEFAULT_CONFIG_FILE: &str = "roleguard.toml";

/// Complete Roleguard configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RoleguardConfig {
    pub storage: StorageConfig,
    pub policy: PolicyConfig,
    pub logging: LoggingConfig,
}

impl RoleguardConfig {
    /// Load configuration with full supersedence chain
    pub fn load() -> Result<Self> {
        Self::load_from(DEFAULT_CONFIG_FILE)
    }

    /// Load configuration from a specific file, falling back to defaults if it is absent
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let mut config = Self::default();

        if path.exists() {
            let file_config = Self::from_file(path)
                .with_context(|| format!("Failed to load config from {}", path.display()))?;
            config.merge(file_config);
        }

        config.apply_env_vars();
        config.validate()?;

        Ok(config)
    }

    /// Load configuration from TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse TOML config: {}", path.as_ref().display()))
    }

    /// Merge another config into this one (other takes priority)
    pub fn merge(&mut self, other: Self) {
        self.storage.merge(other.storage);
        self.policy.merge(other.policy);
        self.logging.merge(other.logging);
    }

    /// Apply environment variables to configuration
    pub fn apply_env_vars(&mut self) {
        self.storage.apply_env_vars();
        self.policy.apply_env_vars();
        self.logging.apply_env_vars();
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        self.storage.validate()?;
        self.policy.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = RoleguardConfig::default();
        assert_eq!(config.storage.settings_key, "roleguard_settings");
        assert_eq!(config.policy.default_managed_role, "admin_manager");
        assert_eq!(config.logging.level, "info");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[policy]\ndefault_managed_role = \"shop_manager\"").unwrap();

        let config = RoleguardConfig::from_file(file.path()).unwrap();
        assert_eq!(config.policy.default_managed_role, "shop_manager");
        assert_eq!(config.storage.settings_key, "roleguard_settings");
        assert_eq!(config.logging.format, "human");
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = RoleguardConfig::load_from(dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.storage.settings_key, "roleguard_settings");
    }

    #[test]
    fn test_invalid_toml_is_reported() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[storage\nsettings_key = ").unwrap();

        let err = RoleguardConfig::load_from(file.path()).unwrap_err();
        assert!(err.to_string().contains("Failed to load config"));
    }
}
