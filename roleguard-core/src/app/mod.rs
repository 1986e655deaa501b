//! Access control façade
//!
//! [`AccessControl`] composes the settings store, the classification in
//! [`rbac`](crate::rbac) and the policies in [`policy`](crate::policy) into the
//! calls a host makes at each point of its request pipeline.
//!
//! # Example
//!
//! ```no_run
//! use roleguard_core::app::AccessControl;
//! use roleguard_core::config::RoleguardConfig;
//! use roleguard_core::guard::Screen;
//! use roleguard_core::rbac::Actor;
//! use roleguard_core::settings::MemoryOptionStore;
//!
//! let control = AccessControl::with_config(&RoleguardConfig::default(), MemoryOptionStore::new());
//! let request = control.request(Actor::new("7", ["admin_manager"]));
//! request.check_screen(&Screen::from_admin_path("plugins.php"))?;
//! # Ok::<(), roleguard_core::Error>(())
//! ```

mod page;
mod request;

pub use page::{EditorOption, PluginOption, RoleOption, SettingsPage};
pub use request::{AdminAsset, PluginAction, RequestPolicy, SetupNotice};

use crate::config::{PolicyConfig, RoleguardConfig};
use crate::export::{self, RoleExport, TokenVerifier};
use crate::guard::require_administrator;
use crate::policy::capabilities::{self, CapabilityRemoval};
use crate::policy::plugins::PluginInventory;
use crate::rbac::{Actor, RoleRegistry};
use crate::settings::{FileOptionStore, OptionStore, Sanitized, SettingsStore};
use crate::Result;
use serde_json::Value;

const ACTIVATION_DENIED: &str = "You do not have permission to activate this plugin.";
const UNINSTALL_DENIED: &str = "Uninstallation requires Administrator privileges.";
const SETTINGS_DENIED: &str = "Access denied: Requires Administrator privileges.";

/// Roleguard entry point for a host application
#[derive(Debug)]
pub struct AccessControl<S: OptionStore> {
    policy: PolicyConfig,
    settings: SettingsStore<S>,
}

impl AccessControl<FileOptionStore> {
    /// Open the file-backed option store named by `config`
    pub fn open(config: &RoleguardConfig) -> Self {
        let store = FileOptionStore::new(&config.storage.settings_path);
        Self::with_config(config, store)
    }
}

impl<S: OptionStore> AccessControl<S> {
    /// Create with default configuration
    pub fn new(store: S) -> Self {
        Self::with_config(&RoleguardConfig::default(), store)
    }

    pub fn with_config(config: &RoleguardConfig, store: S) -> Self {
        Self {
            policy: config.policy.clone(),
            settings: SettingsStore::new(store, config.storage.settings_key.clone()),
        }
    }

    pub fn policy_config(&self) -> &PolicyConfig {
        &self.policy
    }

    pub fn settings(&self) -> &SettingsStore<S> {
        &self.settings
    }

    /// Evaluate an actor for one request
    ///
    /// Settings are read once; a read failure evaluates against the defaults.
    pub fn request(&self, actor: Actor) -> RequestPolicy {
        RequestPolicy::new(actor, self.settings.load_or_defaults())
    }

    /// Strip the restricted capabilities from every target role
    ///
    /// Safe to call on every initialization.
    pub fn enforce_capabilities(&self, roles: &mut dyn RoleRegistry) -> Vec<CapabilityRemoval> {
        let settings = self.settings.load_or_defaults();
        capabilities::enforce_for_target_roles(roles, &settings)
    }

    /// First-time setup: store the defaults and restrict the default managed role
    pub fn activate(
        &self,
        actor: &Actor,
        roles: &mut dyn RoleRegistry,
    ) -> Result<Vec<CapabilityRemoval>> {
        require_administrator(actor, ACTIVATION_DENIED)?;

        self.settings.save(&self.settings.defaults())?;
        let removed = capabilities::apply_defaults(roles, &self.policy.default_managed_role);

        log::info!(
            "Activated by actor {}; restricted role '{}'",
            actor.id,
            self.policy.default_managed_role
        );
        Ok(removed)
    }

    /// Remove every trace of the persisted settings
    pub fn uninstall(&self, actor: &Actor) -> Result<()> {
        require_administrator(actor, UNINSTALL_DENIED)?;
        self.settings.delete()
    }

    /// View model for the settings screen
    pub fn settings_page(
        &self,
        actor: &Actor,
        roles: &dyn RoleRegistry,
        inventory: &PluginInventory,
    ) -> Result<SettingsPage> {
        require_administrator(actor, SETTINGS_DENIED)?;
        let settings = self.settings.load_or_defaults();
        Ok(SettingsPage::build(&settings, roles, inventory))
    }

    /// Sanitize and persist a settings-form submission
    pub fn submit_settings(
        &self,
        actor: &Actor,
        raw: &Value,
        roles: &dyn RoleRegistry,
    ) -> Result<Sanitized> {
        require_administrator(actor, SETTINGS_DENIED)?;

        let sanitized = self.settings.sanitize_and_save(raw, &roles.editable_roles())?;
        for issue in &sanitized.issues {
            log::debug!("Settings form: {}", issue);
        }
        Ok(sanitized)
    }

    /// Download the static role export
    pub fn export_role(
        &self,
        actor: &Actor,
        token: &str,
        verifier: &dyn TokenVerifier,
    ) -> Result<RoleExport> {
        export::export_role(actor, token, verifier)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::StaticTokenVerifier;
    use crate::policy::RESTRICTED_CAPABILITIES;
    use crate::rbac::{MemoryRoleRegistry, Role, ADMINISTRATOR_ROLE};
    use crate::settings::{MemoryOptionStore, Settings};
    use crate::Error;
    use serde_json::json;

    fn admin() -> Actor {
        Actor::new("1", [ADMINISTRATOR_ROLE])
    }

    fn manager() -> Actor {
        Actor::new("7", ["admin_manager"])
    }

    fn roles() -> MemoryRoleRegistry {
        let manager = RESTRICTED_CAPABILITIES
            .iter()
            .fold(Role::new("Admin Manager"), |role, cap| role.with_capability(*cap));
        MemoryRoleRegistry::new()
            .with_role(ADMINISTRATOR_ROLE, Role::new("Administrator"))
            .with_role("admin_manager", manager)
            .with_role("editor", Role::new("Editor").with_capability("edit_blocks"))
    }

    #[test]
    fn test_activate_requires_administrator() {
        let control = AccessControl::new(MemoryOptionStore::new());
        let mut roles = roles();

        match control.activate(&manager(), &mut roles) {
            Err(Error::Unauthorized(msg)) => assert_eq!(msg, ACTIVATION_DENIED),
            other => panic!("expected Unauthorized, got {:?}", other),
        }
        assert!(control.settings().inner().is_empty());
        assert!(roles.has_capability("admin_manager", "edit_blocks"));
    }

    #[test]
    fn test_activate_stores_defaults_and_restricts_role() {
        let control = AccessControl::new(MemoryOptionStore::new());
        let mut roles = roles();

        let removed = control.activate(&admin(), &mut roles).unwrap();
        assert_eq!(removed.len(), RESTRICTED_CAPABILITIES.len());
        assert_eq!(control.settings().load().unwrap(), Settings::defaults());
        assert!(roles.has_capability("editor", "edit_blocks"));
    }

    #[test]
    fn test_uninstall() {
        let control = AccessControl::new(MemoryOptionStore::new());
        control.activate(&admin(), &mut roles()).unwrap();

        assert!(matches!(control.uninstall(&manager()), Err(Error::Unauthorized(_))));
        assert!(!control.settings().inner().is_empty());

        control.uninstall(&admin()).unwrap();
        assert!(control.settings().inner().is_empty());
    }

    #[test]
    fn test_submit_settings() {
        let control = AccessControl::new(MemoryOptionStore::new());
        let form = json!({
            "target_roles": ["editor", "administrator"],
            "protected_patterns": "seo, cache",
            "editor_restrictions": {"disable_list_view": "1"}
        });

        assert!(matches!(
            control.submit_settings(&manager(), &form, &roles()),
            Err(Error::Unauthorized(_))
        ));

        let saved = control.submit_settings(&admin(), &form, &roles()).unwrap();
        assert!(!saved.settings.enabled);
        assert_eq!(saved.settings.target_roles, vec!["editor"]);
        assert_eq!(control.settings().load().unwrap(), saved.settings);
    }

    #[test]
    fn test_request_uses_stored_settings() {
        let control = AccessControl::new(MemoryOptionStore::new());
        let form = json!({"enabled": "1", "target_roles": ["editor"]});
        control.submit_settings(&admin(), &form, &roles()).unwrap();

        assert!(control.request(Actor::new("3", ["editor"])).is_managed());
        assert!(!control.request(manager()).is_managed());
    }

    #[test]
    fn test_enforce_capabilities_follows_settings() {
        let control = AccessControl::new(MemoryOptionStore::new());
        let mut roles = roles();

        let removed = control.enforce_capabilities(&mut roles);
        assert_eq!(removed.len(), RESTRICTED_CAPABILITIES.len());
        assert!(control.enforce_capabilities(&mut roles).is_empty());
        assert!(roles.has_capability("editor", "edit_blocks"));
    }

    #[test]
    fn test_settings_page_requires_administrator() {
        let control = AccessControl::new(MemoryOptionStore::new());
        let inventory = PluginInventory::new();

        assert!(matches!(
            control.settings_page(&manager(), &roles(), &inventory),
            Err(Error::Unauthorized(_))
        ));
        assert!(control.settings_page(&admin(), &roles(), &inventory).is_ok());
    }

    #[test]
    fn test_export_role() {
        let control = AccessControl::new(MemoryOptionStore::new());
        let verifier = StaticTokenVerifier::new(Some("t0k3n".to_string()));

        assert!(control.export_role(&admin(), "t0k3n", &verifier).is_ok());
        assert!(control.export_role(&manager(), "t0k3n", &verifier).is_err());
    }
}
