//! Per-request policy evaluation

use crate::guard::{self, Screen, SETTINGS_PAGE_SLUG};
use crate::policy::editor::StyleSheet;
use crate::policy::plugins::{self, PluginInventory, OWN_PLUGIN_PATH};
use crate::rbac::{classify, manager_role_exists, Access, Actor, RoleRegistry};
use crate::settings::Settings;
use crate::Result;

/// Static stylesheet shipped with Roleguard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdminAsset {
    pub handle: &'static str,
    pub file_name: &'static str,
    pub css: &'static str,
}

/// Enqueued for managed actors on every admin screen
pub const EDITOR_ASSET: AdminAsset = AdminAsset {
    handle: "roleguard-editor-css",
    file_name: "editor.css",
    css: include_str!("../../assets/editor.css"),
};

/// Enqueued for administrators on the settings screen
pub const SETTINGS_ASSET: AdminAsset = AdminAsset {
    handle: "roleguard-admin-css",
    file_name: "admin.css",
    css: include_str!("../../assets/admin.css"),
};

/// One action link on a plugin listing row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginAction {
    pub key: String,
    pub label: String,
    pub url: String,
}

impl PluginAction {
    pub fn new(key: impl Into<String>, label: impl Into<String>, url: impl Into<String>) -> Self {
        Self { key: key.into(), label: label.into(), url: url.into() }
    }

    /// Link to the settings screen
    pub fn settings() -> Self {
        Self::new("settings", "Settings", format!("admin.php?page={}", SETTINGS_PAGE_SLUG))
    }
}

/// Admin notice shown while no manager role exists
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetupNotice {
    pub title: &'static str,
    pub steps: Vec<&'static str>,
    pub note: &'static str,
}

impl SetupNotice {
    fn manager_role_setup() -> Self {
        Self {
            title: "Manager Role Setup",
            steps: vec![
                "Install and activate Advanced Access Manager",
                "Download the pre-configured manager role",
                "Import the downloaded file under Settings > Export/Import in the access manager",
            ],
            note: "This will only add the Manager role without affecting existing roles.",
        }
    }
}

/// Restriction decisions for one actor during one request
///
/// Built by [`AccessControl::request`](super::AccessControl::request); holds
/// the settings snapshot read at the start of the request.
#[derive(Debug, Clone)]
pub struct RequestPolicy {
    actor: Actor,
    access: Access,
    settings: Settings,
}

impl RequestPolicy {
    pub fn new(actor: Actor, settings: Settings) -> Self {
        let access = classify(&actor, &settings);
        log::debug!("Actor {} classified as {}", actor.id, access);
        Self { actor, access, settings }
    }

    pub fn actor(&self) -> &Actor {
        &self.actor
    }

    pub fn access(&self) -> Access {
        self.access
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn is_managed(&self) -> bool {
        self.access.is_managed()
    }

    pub fn is_administrator(&self) -> bool {
        self.access.is_administrator()
    }

    /// Plugin inventory filtered for this actor
    pub fn visible_plugins(&self, inventory: &PluginInventory) -> PluginInventory {
        plugins::restricted_view(inventory, self.access, &self.settings)
    }

    /// Navigation guard for `screen`
    pub fn check_screen(&self, screen: &Screen) -> Result<()> {
        guard::check_navigation(screen, self.access)
    }

    /// Editor stylesheet to inject on `screen`, if any
    pub fn editor_styles(&self, screen: &Screen) -> Option<StyleSheet> {
        (self.is_managed() && screen.is_block_editor())
            .then(|| StyleSheet::for_settings(&self.settings))
    }

    /// Whether the reusable-content entry stays in the admin navigation
    pub fn show_reusable_blocks_in_menu(&self) -> bool {
        !self.is_managed()
    }

    /// Whether the settings menu entry is registered
    pub fn show_settings_menu(&self) -> bool {
        self.is_administrator()
    }

    /// Adjust the action links of one plugin listing row
    ///
    /// On this system's own row non-administrators lose `deactivate` and
    /// administrators gain a settings link. Other rows are untouched.
    pub fn plugin_actions(&self, plugin: &str, mut actions: Vec<PluginAction>) -> Vec<PluginAction> {
        if plugin != OWN_PLUGIN_PATH {
            return actions;
        }

        if self.is_administrator() {
            if !actions.iter().any(|a| a.key == "settings") {
                actions.insert(0, PluginAction::settings());
            }
        } else {
            actions.retain(|a| a.key != "deactivate");
        }
        actions
    }

    /// Setup notice for administrators on a host without a manager role
    pub fn setup_notice(&self, roles: &dyn RoleRegistry) -> Option<SetupNotice> {
        (self.is_administrator() && !manager_role_exists(roles))
            .then(SetupNotice::manager_role_setup)
    }

    /// Static stylesheets to enqueue on `screen`
    pub fn admin_assets(&self, screen: &Screen) -> Vec<AdminAsset> {
        let mut assets = Vec::new();
        if self.is_managed() {
            assets.push(EDITOR_ASSET);
        }
        if self.is_administrator() && screen.is_settings() {
            assets.push(SETTINGS_ASSET);
        }
        assets
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rbac::{MemoryRoleRegistry, Role, ADMINISTRATOR_ROLE};
    use crate::Error;

    fn policy(roles: &[&str]) -> RequestPolicy {
        RequestPolicy::new(Actor::new("9", roles.iter().copied()), Settings::defaults())
    }

    fn own_row_actions() -> Vec<PluginAction> {
        vec![
            PluginAction::new("deactivate", "Deactivate", "plugins.php?action=deactivate"),
            PluginAction::new("edit", "Edit", "plugin-editor.php"),
        ]
    }

    #[test]
    fn test_managed_request() {
        let request = policy(&["admin_manager"]);

        assert!(request.is_managed());
        assert!(!request.show_reusable_blocks_in_menu());
        assert!(!request.show_settings_menu());
        assert!(matches!(
            request.check_screen(&Screen::Plugins),
            Err(Error::Forbidden(_))
        ));
        assert!(request.editor_styles(&Screen::BlockEditor).is_some());
        assert!(request.editor_styles(&Screen::Other("index.php".into())).is_none());
        assert_eq!(request.admin_assets(&Screen::Settings), vec![EDITOR_ASSET]);
    }

    #[test]
    fn test_administrator_request() {
        let request = policy(&[ADMINISTRATOR_ROLE, "admin_manager"]);

        assert!(!request.is_managed());
        assert!(request.show_reusable_blocks_in_menu());
        assert!(request.show_settings_menu());
        assert!(request.check_screen(&Screen::Plugins).is_ok());
        assert!(request.editor_styles(&Screen::BlockEditor).is_none());
        assert_eq!(request.admin_assets(&Screen::Settings), vec![SETTINGS_ASSET]);
        assert!(request.admin_assets(&Screen::Plugins).is_empty());
    }

    #[test]
    fn test_own_plugin_row_actions() {
        let admin = policy(&[ADMINISTRATOR_ROLE]);
        let actions = admin.plugin_actions(OWN_PLUGIN_PATH, own_row_actions());
        assert_eq!(actions[0], PluginAction::settings());
        assert_eq!(actions.len(), 3);

        for roles in [&["admin_manager"][..], &["editor"][..]] {
            let actions = policy(roles).plugin_actions(OWN_PLUGIN_PATH, own_row_actions());
            assert!(actions.iter().all(|a| a.key != "deactivate"));
            assert!(actions.iter().all(|a| a.key != "settings"));
        }
    }

    #[test]
    fn test_other_plugin_rows_untouched() {
        let request = policy(&["admin_manager"]);
        let actions = request.plugin_actions("akismet/akismet.php", own_row_actions());
        assert_eq!(actions, own_row_actions());
    }

    #[test]
    fn test_setup_notice() {
        let without_manager =
            MemoryRoleRegistry::new().with_role("editor", Role::new("Editor"));
        let with_manager =
            MemoryRoleRegistry::new().with_role("shop", Role::new("Shop Manager"));

        let admin = policy(&[ADMINISTRATOR_ROLE]);
        let notice = admin.setup_notice(&without_manager).unwrap();
        assert_eq!(notice.title, "Manager Role Setup");
        assert_eq!(notice.steps.len(), 3);
        assert!(admin.setup_notice(&with_manager).is_none());

        assert!(policy(&["editor"]).setup_notice(&without_manager).is_none());
    }
}
