//! Settings screen view model

use crate::policy::plugins::{is_system_protected, PluginInventory, PluginPath};
use crate::rbac::{RoleId, RoleRegistry};
use crate::settings::{RestrictionKey, Settings};
use serde::Serialize;

pub const PAGE_TITLE: &str = "Manager Access Control";
pub const MENU_TITLE: &str = "Manager Access";

/// A selectable target role
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoleOption {
    pub id: RoleId,
    pub name: String,
    pub checked: bool,
}

/// A selectable protected plugin
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PluginOption {
    pub path: PluginPath,
    pub name: String,
    pub checked: bool,
    /// System-protected: rendered checked and disabled, never submitted
    pub locked: bool,
}

/// One editor restriction checkbox
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EditorOption {
    pub key: &'static str,
    pub label: &'static str,
    pub checked: bool,
    pub locked: bool,
    pub badge: Option<&'static str>,
    pub description: Option<&'static str>,
}

/// Everything the host needs to render the settings form
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SettingsPage {
    pub title: &'static str,
    /// Label of the settings entry in the admin menu
    pub menu_title: &'static str,
    pub enabled: bool,
    pub roles: Vec<RoleOption>,
    pub plugins: Vec<PluginOption>,
    /// Patterns as the comma-separated text field value
    pub patterns: String,
    pub editor_options: Vec<EditorOption>,
    pub custom_css: String,
}

impl SettingsPage {
    pub(crate) fn build(
        settings: &Settings,
        roles: &dyn RoleRegistry,
        inventory: &PluginInventory,
    ) -> Self {
        let roles = roles
            .editable_roles()
            .into_iter()
            .map(|id| RoleOption {
                name: roles.display_name(&id).unwrap_or_else(|| id.clone()),
                checked: settings.targets_role(&id),
                id,
            })
            .collect();

        let plugins = inventory
            .iter()
            .map(|plugin| {
                let locked = is_system_protected(&plugin.path);
                PluginOption {
                    path: plugin.path.clone(),
                    name: plugin.name.clone(),
                    checked: locked || settings.protected_plugins.contains(&plugin.path),
                    locked,
                }
            })
            .collect();

        let editor_options = RestrictionKey::ALL
            .into_iter()
            .map(|key| {
                let locked = key.is_locked();
                EditorOption {
                    key: key.as_str(),
                    label: key.label(),
                    checked: locked || settings.editor_restrictions.get(key),
                    locked,
                    badge: locked.then_some("Experimental"),
                    description: locked.then_some("Always enabled"),
                }
            })
            .collect();

        Self {
            title: PAGE_TITLE,
            menu_title: MENU_TITLE,
            enabled: settings.enabled,
            roles,
            plugins,
            patterns: settings.protected_patterns.join(", "),
            editor_options,
            custom_css: settings.custom_css.clone(),
        }
    }
}
