//! Settings model
//!
//! One [`Settings`] record drives every restriction. It is persisted as an
//! opaque JSON blob through an [`OptionStore`] and is never trusted as
//! complete: every read merges the stored fields over [`Settings::defaults`],
//! so keys added in later versions always have a value.
//!
//! Writes go through [`sanitize`] first; the sanitizer is total and never
//! fails, it only degrades malformed fields to their defaults.

mod file;
mod memory;
pub mod sanitize;
mod store;

pub use file::FileOptionStore;
pub use memory::MemoryOptionStore;
pub use sanitize::{sanitize, sanitize_text, sanitize_textarea, InputIssue, Sanitized};
pub use store::{OptionStore, SettingsStore};

use crate::policy::plugins::PluginPath;
use crate::rbac::{RoleId, ADMINISTRATOR_ROLE};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One editor restriction flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RestrictionKey {
    HideReusableBlocks,
    HideBlockSettings,
    HideGreenshiftButtons,
    HideReusablePopover,
    DisableListView,
    /// Always forced on. Note the inversion: the drag-handle style rule hides
    /// drag handles unconditionally, whatever this flag says.
    ShowDragHandles,
}

impl RestrictionKey {
    /// The fixed key set, in settings-form order
    pub const ALL: [RestrictionKey; 6] = [
        RestrictionKey::HideReusableBlocks,
        RestrictionKey::HideBlockSettings,
        RestrictionKey::HideGreenshiftButtons,
        RestrictionKey::HideReusablePopover,
        RestrictionKey::DisableListView,
        RestrictionKey::ShowDragHandles,
    ];

    /// Stored / form field name
    pub fn as_str(self) -> &'static str {
        match self {
            RestrictionKey::HideReusableBlocks => "hide_reusable_blocks",
            RestrictionKey::HideBlockSettings => "hide_block_settings",
            RestrictionKey::HideGreenshiftButtons => "hide_greenshift_buttons",
            RestrictionKey::HideReusablePopover => "hide_reusable_popover",
            RestrictionKey::DisableListView => "disable_list_view",
            RestrictionKey::ShowDragHandles => "show_drag_handles",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|key| key.as_str() == name)
    }

    /// Settings-page label
    pub fn label(self) -> &'static str {
        match self {
            RestrictionKey::HideReusableBlocks => {
                "Hide reusable blocks library & conversion options"
            }
            RestrictionKey::HideBlockSettings => "Hide block settings panel (three-dot menu)",
            RestrictionKey::HideGreenshiftButtons => {
                "Hide GreenShift controls (editor toolbar & inspector)"
            }
            RestrictionKey::HideReusablePopover => "Hide \"Add to Reusable blocks\" option",
            RestrictionKey::DisableListView => "Disable document outline / list view",
            RestrictionKey::ShowDragHandles => "Enable block drag handles",
        }
    }

    /// Locked keys are rendered checked and disabled, and forced on by the sanitizer
    pub fn is_locked(self) -> bool {
        self == RestrictionKey::ShowDragHandles
    }
}

impl std::fmt::Display for RestrictionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Editor restriction flags; exactly the fixed key set of [`RestrictionKey`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditorRestrictions {
    pub hide_reusable_blocks: bool,
    pub hide_block_settings: bool,
    pub hide_greenshift_buttons: bool,
    pub hide_reusable_popover: bool,
    pub disable_list_view: bool,
    pub show_drag_handles: bool,
}

impl Default for EditorRestrictions {
    fn default() -> Self {
        Self {
            hide_reusable_blocks: true,
            hide_block_settings: true,
            hide_greenshift_buttons: true,
            hide_reusable_popover: true,
            disable_list_view: false,
            show_drag_handles: true,
        }
    }
}

impl EditorRestrictions {
    pub fn get(&self, key: RestrictionKey) -> bool {
        match key {
            RestrictionKey::HideReusableBlocks => self.hide_reusable_blocks,
            RestrictionKey::HideBlockSettings => self.hide_block_settings,
            RestrictionKey::HideGreenshiftButtons => self.hide_greenshift_buttons,
            RestrictionKey::HideReusablePopover => self.hide_reusable_popover,
            RestrictionKey::DisableListView => self.disable_list_view,
            RestrictionKey::ShowDragHandles => self.show_drag_handles,
        }
    }

    pub fn set(&mut self, key: RestrictionKey, value: bool) {
        let slot = match key {
            RestrictionKey::HideReusableBlocks => &mut self.hide_reusable_blocks,
            RestrictionKey::HideBlockSettings => &mut self.hide_block_settings,
            RestrictionKey::HideGreenshiftButtons => &mut self.hide_greenshift_buttons,
            RestrictionKey::HideReusablePopover => &mut self.hide_reusable_popover,
            RestrictionKey::DisableListView => &mut self.disable_list_view,
            RestrictionKey::ShowDragHandles => &mut self.show_drag_handles,
        };
        *slot = value;
    }

    /// Builder-style variant of [`EditorRestrictions::set`]
    pub fn with(mut self, key: RestrictionKey, value: bool) -> Self {
        self.set(key, value);
        self
    }

    /// All flags off except the locked drag-handle flag
    pub fn none() -> Self {
        let mut restrictions = Self::default();
        for key in RestrictionKey::ALL {
            restrictions.set(key, key.is_locked());
        }
        restrictions
    }
}

/// The single policy configuration record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Master switch; when false no restriction applies
    pub enabled: bool,

    /// Roles subject to restriction; never contains the administrator role
    pub target_roles: Vec<RoleId>,

    /// Plugins hidden by exact path, on top of the system-protected list
    pub protected_plugins: Vec<PluginPath>,

    /// Case-insensitive substrings; any plugin path containing one is hidden
    pub protected_patterns: Vec<String>,

    pub editor_restrictions: EditorRestrictions,

    /// Appended verbatim after the generated editor rules
    pub custom_css: String,
}

/// Role targeted by the default settings
pub const DEFAULT_TARGET_ROLE: &str = "admin_manager";

impl Default for Settings {
    fn default() -> Self {
        Self::defaults()
    }
}

impl Settings {
    /// The canonical default settings
    pub fn defaults() -> Self {
        Self {
            enabled: true,
            target_roles: vec![DEFAULT_TARGET_ROLE.to_string()],
            protected_plugins: vec![],
            protected_patterns: vec![],
            editor_restrictions: EditorRestrictions::default(),
            custom_css: String::new(),
        }
    }

    /// Check if a role is one of the target roles
    pub fn targets_role(&self, role: &str) -> bool {
        self.target_roles.iter().any(|r| r == role)
    }

    /// Merge a stored blob over the defaults
    ///
    /// A present, well-typed field replaces the default. Absent fields keep
    /// the default; ill-typed fields keep the default and log a warning.
    /// `editor_restrictions` merges key by key and unknown keys are dropped.
    pub fn merge_stored(stored: &Value) -> Self {
        let mut settings = Self::defaults();

        let Some(object) = stored.as_object() else {
            if !stored.is_null() {
                log::warn!("Stored settings are not an object; using defaults");
            }
            return settings;
        };

        let enabled = object.get("enabled").or_else(|| object.get("enable_restrictions"));
        if let Some(value) = enabled {
            match value.as_bool() {
                Some(flag) => settings.enabled = flag,
                None => log::warn!("Stored field 'enabled' is not a boolean; keeping default"),
            }
        }

        if let Some(roles) = stored_string_list(object.get("target_roles"), "target_roles") {
            settings.target_roles = roles
                .into_iter()
                .filter(|role| {
                    let keep = role != ADMINISTRATOR_ROLE;
                    if !keep {
                        log::warn!("Dropping administrator role from stored target roles");
                    }
                    keep
                })
                .collect();
        }

        if let Some(plugins) =
            stored_string_list(object.get("protected_plugins"), "protected_plugins")
        {
            settings.protected_plugins = plugins;
        }

        if let Some(patterns) =
            stored_string_list(object.get("protected_patterns"), "protected_patterns")
        {
            settings.protected_patterns = patterns;
        }

        match object.get("editor_restrictions") {
            None => {}
            Some(Value::Object(flags)) => {
                for key in RestrictionKey::ALL {
                    match flags.get(key.as_str()).map(Value::as_bool) {
                        None => {}
                        Some(Some(flag)) => settings.editor_restrictions.set(key, flag),
                        Some(None) => log::warn!(
                            "Stored editor restriction '{}' is not a boolean; keeping default",
                            key
                        ),
                    }
                }
            }
            Some(_) => log::warn!("Stored field 'editor_restrictions' is not an object"),
        }
        settings.editor_restrictions.show_drag_handles = true;

        if let Some(value) = object.get("custom_css") {
            match value.as_str() {
                Some(css) => settings.custom_css = css.to_string(),
                None => log::warn!("Stored field 'custom_css' is not a string; keeping default"),
            }
        }

        settings
    }

    /// Read one field by its stored name, with a fallback
    pub fn get(&self, key: &str, default: Value) -> Value {
        serde_json::to_value(self)
            .ok()
            .and_then(|value| value.get(key).cloned())
            .filter(|value| !value.is_null())
            .unwrap_or(default)
    }

    /// Render these settings back into the raw settings-form shape
    ///
    /// Unchecked boxes are absent, like a browser submission.
    pub fn to_form(&self) -> Value {
        let mut form = serde_json::Map::new();

        if self.enabled {
            form.insert("enabled".to_string(), Value::from("1"));
        }
        form.insert("target_roles".to_string(), Value::from(self.target_roles.clone()));
        form.insert("protected_plugins".to_string(), Value::from(self.protected_plugins.clone()));
        form.insert("protected_patterns".to_string(), Value::from(self.protected_patterns.join(", ")));

        let mut flags = serde_json::Map::new();
        for key in RestrictionKey::ALL {
            if self.editor_restrictions.get(key) {
                flags.insert(key.as_str().to_string(), Value::from("1"));
            }
        }
        form.insert("editor_restrictions".to_string(), Value::Object(flags));
        form.insert("custom_css".to_string(), Value::from(self.custom_css.clone()));

        Value::Object(form)
    }
}

fn stored_string_list(value: Option<&Value>, field: &str) -> Option<Vec<String>> {
    let value = value?;
    let Some(items) = value.as_array() else {
        log::warn!("Stored field '{}' is not a list; keeping default", field);
        return None;
    };

    let mut list = Vec::with_capacity(items.len());
    for item in items {
        match item.as_str() {
            Some(text) => list.push(text.to_string()),
            None => log::warn!("Skipping non-string entry in stored field '{}'", field),
        }
    }
    Some(list)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_defaults() {
        let settings = Settings::defaults();
        assert!(settings.enabled);
        assert_eq!(settings.target_roles, vec!["admin_manager"]);
        assert!(settings.protected_plugins.is_empty());
        assert!(settings.editor_restrictions.hide_reusable_popover);
        assert!(!settings.editor_restrictions.disable_list_view);
        assert!(settings.editor_restrictions.show_drag_handles);
        assert_eq!(settings.custom_css, "");
    }

    #[test]
    fn test_merge_fills_missing_keys() {
        // A blob written before the editor restrictions existed
        let stored = json!({
            "enable_restrictions": false,
            "target_roles": ["shop_manager"],
            "protected_plugins": ["akismet/akismet.php"]
        });

        let settings = Settings::merge_stored(&stored);
        assert!(!settings.enabled);
        assert_eq!(settings.target_roles, vec!["shop_manager"]);
        assert_eq!(settings.protected_plugins, vec!["akismet/akismet.php"]);
        assert!(settings.protected_patterns.is_empty());
        assert_eq!(settings.editor_restrictions, EditorRestrictions::default());
        assert_eq!(settings.custom_css, "");
    }

    #[test]
    fn test_merge_editor_restrictions_key_by_key() {
        let stored = json!({
            "editor_restrictions": {
                "hide_block_settings": false,
                "disable_list_view": true,
                "legacy_flag": true
            }
        });

        let settings = Settings::merge_stored(&stored);
        let flags = settings.editor_restrictions;
        assert!(!flags.hide_block_settings);
        assert!(flags.disable_list_view);
        assert!(flags.hide_reusable_blocks);
        assert!(flags.hide_greenshift_buttons);
    }

    #[test]
    fn test_merge_degrades_ill_typed_fields() {
        let stored = json!({
            "enabled": "yes",
            "target_roles": "editor",
            "protected_patterns": ["greenshift", 7],
            "editor_restrictions": ["hide_block_settings"],
            "custom_css": 12
        });

        let settings = Settings::merge_stored(&stored);
        assert!(settings.enabled);
        assert_eq!(settings.target_roles, vec!["admin_manager"]);
        assert_eq!(settings.protected_patterns, vec!["greenshift"]);
        assert_eq!(settings.editor_restrictions, EditorRestrictions::default());
        assert_eq!(settings.custom_css, "");
    }

    #[test]
    fn test_merge_drops_administrator_and_forces_drag_handles() {
        let stored = json!({
            "target_roles": ["administrator", "editor"],
            "editor_restrictions": { "show_drag_handles": false }
        });

        let settings = Settings::merge_stored(&stored);
        assert_eq!(settings.target_roles, vec!["editor"]);
        assert!(settings.editor_restrictions.show_drag_handles);
    }

    #[test]
    fn test_non_object_blob_yields_defaults() {
        assert_eq!(Settings::merge_stored(&json!("garbage")), Settings::defaults());
        assert_eq!(Settings::merge_stored(&Value::Null), Settings::defaults());
    }

    #[test]
    fn test_get_with_fallback() {
        let settings = Settings::defaults();
        assert_eq!(settings.get("enabled", json!(false)), json!(true));
        assert_eq!(settings.get("target_roles", json!([])), json!(["admin_manager"]));
        assert_eq!(settings.get("no_such_key", json!("fallback")), json!("fallback"));
    }

    #[test]
    fn test_restriction_key_names() {
        for key in RestrictionKey::ALL {
            assert_eq!(RestrictionKey::from_name(key.as_str()), Some(key));
        }
        assert_eq!(RestrictionKey::from_name("unknown"), None);
        assert!(RestrictionKey::ShowDragHandles.is_locked());
        assert!(!RestrictionKey::DisableListView.is_locked());
    }

    #[test]
    fn test_to_form_omits_unchecked_boxes() {
        let settings = Settings {
            enabled: false,
            protected_patterns: vec!["greenshift".to_string(), "seo".to_string()],
            editor_restrictions: EditorRestrictions::none(),
            ..Settings::defaults()
        };

        let form = settings.to_form();
        assert!(form.get("enabled").is_none());
        assert_eq!(form["protected_patterns"], json!("greenshift, seo"));
        assert_eq!(form["editor_restrictions"], json!({ "show_drag_handles": "1" }));
    }
}
