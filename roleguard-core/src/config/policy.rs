//! Policy runtime configuration

use crate::rbac::ADMINISTRATOR_ROLE;
use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::env;

#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyConfig {
    /// Role stripped of the restricted capabilities at activation
    /// Env: RG_DEFAULT_MANAGED_ROLE
    pub default_managed_role: String,

    /// Shared token accepted by [`StaticTokenVerifier`](crate::export::StaticTokenVerifier)
    /// Env: RG_EXPORT_TOKEN
    #[serde(skip_serializing)]
    pub export_token: Option<String>,
}

impl std::fmt::Debug for PolicyConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PolicyConfig")
            .field("default_managed_role", &self.default_managed_role)
            .field("export_token", &self.export_token.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self { default_managed_role: "admin_manager".to_string(), export_token: None }
    }
}

impl PolicyConfig {
    pub fn merge(&mut self, other: Self) {
        *self = other;
    }

    pub fn apply_env_vars(&mut self) {
        if let Ok(role) = env::var("RG_DEFAULT_MANAGED_ROLE") {
            self.default_managed_role = role;
        }
        if let Ok(token) = env::var("RG_EXPORT_TOKEN") {
            if !token.is_empty() {
                self.export_token = Some(token);
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.default_managed_role.trim().is_empty() {
            bail!("policy.default_managed_role cannot be empty");
        }
        if self.default_managed_role == ADMINISTRATOR_ROLE {
            bail!("policy.default_managed_role cannot be the administrator role");
        }
        Ok(())
    }
}
