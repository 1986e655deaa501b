//! Host snapshot: the role and plugin inventories a real host would supply

use anyhow::{Context, Result};
use roleguard_core::policy::PluginInventory;
use roleguard_core::rbac::MemoryRoleRegistry;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HostSnapshot {
    pub roles: MemoryRoleRegistry,
    pub plugins: PluginInventory,
}

impl HostSnapshot {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read host snapshot: {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse host snapshot: {}", path.display()))
    }

    /// Write the snapshot back, e.g. after capabilities were removed
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)
            .with_context(|| format!("Failed to write host snapshot: {}", path.display()))
    }
}
