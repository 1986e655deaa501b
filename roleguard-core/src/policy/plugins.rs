//! Plugin visibility filter

use crate::patterns::PatternMatcher;
use crate::rbac::{classify, Access, Actor};
use crate::settings::Settings;
use serde::{Deserialize, Serialize};

/// Stable plugin identifier, e.g. `"akismet/akismet.php"`
pub type PluginPath = String;

/// This system's own plugin entry
pub const OWN_PLUGIN_PATH: &str = "manager-access-control/manager-access-control.php";

/// Always hidden from managed actors; not configurable
pub const SYSTEM_PROTECTED_PLUGINS: [&str; 4] = [
    "advanced-access-manager/aam.php",
    "greenshift-animation-and-page-builder-blocks/plugin.php",
    "greenshiftquery/greenshiftquery.php",
    OWN_PLUGIN_PATH,
];

/// Check if a plugin path is on the system-protected list
pub fn is_system_protected(path: &str) -> bool {
    SYSTEM_PROTECTED_PLUGINS.contains(&path)
}

/// One installed plugin as reported by the host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginDescriptor {
    pub path: PluginPath,
    pub name: String,
}

impl PluginDescriptor {
    pub fn new(path: impl Into<PluginPath>, name: impl Into<String>) -> Self {
        Self { path: path.into(), name: name.into() }
    }
}

/// Ordered plugin inventory, keyed by path
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PluginInventory {
    plugins: Vec<PluginDescriptor>,
}

impl PluginInventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a plugin; a later entry with the same path replaces the earlier one in place
    pub fn insert(&mut self, plugin: PluginDescriptor) {
        match self.plugins.iter_mut().find(|p| p.path == plugin.path) {
            Some(existing) => *existing = plugin,
            None => self.plugins.push(plugin),
        }
    }

    pub fn with_plugin(mut self, path: impl Into<PluginPath>, name: impl Into<String>) -> Self {
        self.insert(PluginDescriptor::new(path, name));
        self
    }

    pub fn get(&self, path: &str) -> Option<&PluginDescriptor> {
        self.plugins.iter().find(|p| p.path == path)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.get(path).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PluginDescriptor> {
        self.plugins.iter()
    }

    pub fn paths(&self) -> Vec<&str> {
        self.plugins.iter().map(|p| p.path.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }
}

impl FromIterator<PluginDescriptor> for PluginInventory {
    fn from_iter<T: IntoIterator<Item = PluginDescriptor>>(iter: T) -> Self {
        let mut inventory = Self::new();
        for plugin in iter {
            inventory.insert(plugin);
        }
        inventory
    }
}

/// Why a plugin is hidden from managed actors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HiddenReason {
    SystemProtected,
    Selected,
    Pattern(String),
}

/// Work out which plugins of `inventory` a managed actor must not see
///
/// Sources are checked in order: system-protected list, exact selections,
/// patterns. Each hidden plugin is reported once, with the first source that
/// hides it.
pub fn hidden_plugins(inventory: &PluginInventory, settings: &Settings) -> Vec<(PluginPath, HiddenReason)> {
    inventory
        .iter()
        .filter_map(|plugin| {
            let path = plugin.path.as_str();
            let reason = if is_system_protected(path) {
                HiddenReason::SystemProtected
            } else if settings.protected_plugins.iter().any(|p| p == path) {
                HiddenReason::Selected
            } else {
                let result = PatternMatcher::match_any(&settings.protected_patterns, path);
                HiddenReason::Pattern(result.pattern?)
            };
            Some((plugin.path.clone(), reason))
        })
        .collect()
}

/// The plugin inventory as visible to `actor`
///
/// Administrators and unrestricted actors get the inventory unchanged.
pub fn filter_visible_plugins(
    inventory: &PluginInventory,
    actor: &Actor,
    settings: &Settings,
) -> PluginInventory {
    restricted_view(inventory, classify(actor, settings), settings)
}

pub(crate) fn restricted_view(
    inventory: &PluginInventory,
    access: Access,
    settings: &Settings,
) -> PluginInventory {
    if !access.is_managed() {
        return inventory.clone();
    }

    let hidden = hidden_plugins(inventory, settings);
    for (path, reason) in &hidden {
        log::debug!("Hiding plugin {} ({:?})", path, reason);
    }

    inventory
        .iter()
        .filter(|plugin| !hidden.iter().any(|(path, _)| *path == plugin.path))
        .cloned()
        .collect()
}
