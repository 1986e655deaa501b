pub mod check;
pub mod roles;
pub mod settings;

use crate::host::HostSnapshot;
use anyhow::{anyhow, Result};
use roleguard_core::app::AccessControl;
use roleguard_core::config::RoleguardConfig;
use roleguard_core::rbac::Actor;
use roleguard_core::settings::FileOptionStore;
use std::path::{Path, PathBuf};

/// Shared state for every command
pub struct Context {
    pub config: RoleguardConfig,
    host: Option<PathBuf>,
}

impl Context {
    pub fn new(config: RoleguardConfig, host: Option<PathBuf>) -> Self {
        Self { config, host }
    }

    pub fn control(&self) -> AccessControl<FileOptionStore> {
        AccessControl::open(&self.config)
    }

    pub fn host_path(&self) -> Result<&Path> {
        self.host.as_deref().ok_or_else(|| anyhow!("--host <file> is required for this command"))
    }

    pub fn host(&self) -> Result<HostSnapshot> {
        HostSnapshot::load(self.host_path()?)
    }
}

/// Build the acting account from a comma-separated role list
pub fn actor(roles: &str) -> Actor {
    Actor::new("cli", roles.split(',').map(str::trim).filter(|r| !r.is_empty()))
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use roleguard_core::policy::{PluginInventory, RESTRICTED_CAPABILITIES};
    use roleguard_core::rbac::{MemoryRoleRegistry, Role, ADMINISTRATOR_ROLE};
    use tempfile::TempDir;

    /// A context with its option file and host snapshot inside a temp dir
    pub fn context() -> (TempDir, Context) {
        let tmp = tempfile::tempdir().unwrap();

        let manager = RESTRICTED_CAPABILITIES
            .iter()
            .fold(Role::new("Admin Manager"), |role, cap| role.with_capability(*cap))
            .with_capability("edit_posts");
        let snapshot = HostSnapshot {
            roles: MemoryRoleRegistry::new()
                .with_role(ADMINISTRATOR_ROLE, Role::new("Administrator"))
                .with_role("admin_manager", manager)
                .with_role("editor", Role::new("Editor").with_capability("edit_blocks")),
            plugins: PluginInventory::new()
                .with_plugin("advanced-access-manager/aam.php", "Advanced Access Manager")
                .with_plugin("greenshiftquery/greenshiftquery.php", "Greenshift Query")
                .with_plugin("akismet/akismet.php", "Akismet")
                .with_plugin("unrelated/plugin.php", "Unrelated"),
        };
        let host = tmp.path().join("host.json");
        snapshot.save(&host).unwrap();

        let mut config = RoleguardConfig::default();
        config.storage.settings_path = tmp.path().join("options.json").display().to_string();

        (tmp, Context::new(config, Some(host)))
    }
}
