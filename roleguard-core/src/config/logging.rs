//! Logging configuration

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// error | warn | info | debug | trace
    pub level: String,
    /// human | json
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "info".to_string(), format: "human".to_string() }
    }
}

impl LoggingConfig {
    pub fn merge(&mut self, other: Self) {
        *self = other;
    }

    pub fn apply_env_vars(&mut self) {
        if let Ok(level) = env::var("RG_LOG_LEVEL") {
            self.level = level;
        }
        if let Ok(format) = env::var("RG_LOG_FORMAT") {
            self.format = format;
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.level.parse::<log::LevelFilter>().is_err() {
            bail!("logging.level '{}' is not a valid log level", self.level);
        }
        if !matches!(self.format.as_str(), "human" | "json") {
            bail!("logging.format must be 'human' or 'json', got '{}'", self.format);
        }
        Ok(())
    }
}
