//! Host role inventory

use super::{RoleId, ADMINISTRATOR_ROLE};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// A role as known to the host: slug, display name and capabilities
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    /// Display name, e.g. "Shop Manager"
    pub name: String,

    /// Capabilities currently granted by this role
    #[serde(default)]
    pub capabilities: BTreeSet<String>,
}

impl Role {
    /// Create a new role
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), capabilities: BTreeSet::new() }
    }

    /// Add a capability
    pub fn with_capability(mut self, capability: impl Into<String>) -> Self {
        self.capabilities.insert(capability.into());
        self
    }

    /// Check if role has a capability
    pub fn has_capability(&self, capability: &str) -> bool {
        self.capabilities.contains(capability)
    }
}

/// The host's role store
///
/// Roleguard only ever reads role names and *removes* capabilities; it never
/// grants one.
pub trait RoleRegistry {
    /// All role slugs known to the host
    fn role_ids(&self) -> Vec<RoleId>;

    /// Display name of a role
    fn display_name(&self, role: &str) -> Option<String>;

    /// Check if a role currently has a capability
    fn has_capability(&self, role: &str, capability: &str) -> bool;

    /// Remove a capability from a role; returns true if it was present
    fn remove_capability(&mut self, role: &str, capability: &str) -> bool;

    /// Check if a role exists
    fn contains(&self, role: &str) -> bool {
        self.role_ids().iter().any(|r| r == role)
    }

    /// Roles an administrator may select as targets
    fn editable_roles(&self) -> BTreeSet<RoleId> {
        self.role_ids().into_iter().filter(|r| r != ADMINISTRATOR_ROLE).collect()
    }
}

/// In-memory role registry, used by the CLI host and in tests
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemoryRoleRegistry {
    roles: BTreeMap<RoleId, Role>,
}

impl MemoryRoleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a role under a slug
    pub fn with_role(mut self, id: impl Into<RoleId>, role: Role) -> Self {
        self.roles.insert(id.into(), role);
        self
    }

    pub fn role(&self, id: &str) -> Option<&Role> {
        self.roles.get(id)
    }
}

impl RoleRegistry for MemoryRoleRegistry {
    fn role_ids(&self) -> Vec<RoleId> {
        self.roles.keys().cloned().collect()
    }

    fn display_name(&self, role: &str) -> Option<String> {
        self.roles.get(role).map(|r| r.name.clone())
    }

    fn has_capability(&self, role: &str, capability: &str) -> bool {
        self.roles.get(role).is_some_and(|r| r.has_capability(capability))
    }

    fn remove_capability(&mut self, role: &str, capability: &str) -> bool {
        self.roles.get_mut(role).is_some_and(|r| r.capabilities.remove(capability))
    }

    fn contains(&self, role: &str) -> bool {
        self.roles.contains_key(role)
    }
}

/// Heuristic: does this role look like a "manager" role?
///
/// Matches "manager" case-insensitively in the slug or the display name. This
/// is a naming convention, not an identity check; a role called "Manager of
/// Nothing" matches too.
pub fn looks_like_manager_role(slug: &str, name: &str) -> bool {
    slug.to_lowercase().contains("manager") || name.to_lowercase().contains("manager")
}

/// Heuristic: does the host have any role that looks like a manager role?
pub fn manager_role_exists(registry: &dyn RoleRegistry) -> bool {
    registry.role_ids().iter().any(|slug| {
        let name = registry.display_name(slug).unwrap_or_default();
        looks_like_manager_role(slug, &name)
    })
}
