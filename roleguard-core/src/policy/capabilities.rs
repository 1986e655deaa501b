//! Capability restrictions for target roles
//!
//! Capabilities are removed, never granted. Removal is idempotent: running
//! the enforcement on every initialization leaves a role unchanged after the
//! first pass.

use crate::rbac::{RoleId, RoleRegistry, ADMINISTRATOR_ROLE};
use crate::settings::Settings;

/// Reusable-content capabilities a target role loses
pub const RESTRICTED_CAPABILITIES: [&str; 10] = [
    "edit_blocks",
    "edit_others_blocks",
    "publish_blocks",
    "delete_blocks",
    "delete_others_blocks",
    "read_private_blocks",
    "edit_published_blocks",
    "delete_published_blocks",
    "edit_private_blocks",
    "delete_private_blocks",
];

/// One capability removal instruction, or record of one performed
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct CapabilityRemoval {
    pub role: RoleId,
    pub capability: &'static str,
}

/// Capability removals the host should perform for the current settings
///
/// Empty when restrictions are disabled.
pub fn removal_plan(settings: &Settings) -> Vec<CapabilityRemoval> {
    if !settings.enabled {
        return Vec::new();
    }

    settings
        .target_roles
        .iter()
        .filter(|role| role.as_str() != ADMINISTRATOR_ROLE)
        .flat_map(|role| {
            RESTRICTED_CAPABILITIES
                .iter()
                .copied()
                .map(move |capability| CapabilityRemoval { role: role.clone(), capability })
        })
        .collect()
}

/// Remove the restricted capabilities from one role
///
/// Returns the removals that actually changed the registry. An unknown role
/// is skipped.
pub fn apply_defaults(registry: &mut dyn RoleRegistry, role: &str) -> Vec<CapabilityRemoval> {
    if role == ADMINISTRATOR_ROLE {
        log::warn!("Refusing to restrict capabilities of the administrator role");
        return Vec::new();
    }
    if !registry.contains(role) {
        log::debug!("Role '{}' not present, skipping capability restriction", role);
        return Vec::new();
    }

    let removed: Vec<CapabilityRemoval> = RESTRICTED_CAPABILITIES
        .iter()
        .copied()
        .filter(|capability| registry.remove_capability(role, capability))
        .map(|capability| CapabilityRemoval { role: role.to_string(), capability })
        .collect();

    if !removed.is_empty() {
        log::info!("Removed {} capabilities from role '{}'", removed.len(), role);
    }
    removed
}

/// Apply [`apply_defaults`] to every target role
///
/// Does nothing while restrictions are disabled.
pub fn enforce_for_target_roles(
    registry: &mut dyn RoleRegistry,
    settings: &Settings,
) -> Vec<CapabilityRemoval> {
    if !settings.enabled {
        return Vec::new();
    }

    let mut removed = Vec::new();
    for role in &settings.target_roles {
        removed.extend(apply_defaults(registry, role));
    }
    removed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rbac::{MemoryRoleRegistry, Role};

    fn manager_role() -> Role {
        RESTRICTED_CAPABILITIES
            .iter()
            .fold(Role::new("Admin Manager"), |role, cap| role.with_capability(*cap))
            .with_capability("edit_posts")
    }

    fn registry() -> MemoryRoleRegistry {
        MemoryRoleRegistry::new()
            .with_role("admin_manager", manager_role())
            .with_role(ADMINISTRATOR_ROLE, manager_role())
    }

    #[test]
    fn test_apply_defaults_removes_only_restricted() {
        let mut roles = registry();
        let removed = apply_defaults(&mut roles, "admin_manager");

        assert_eq!(removed.len(), RESTRICTED_CAPABILITIES.len());
        for cap in RESTRICTED_CAPABILITIES {
            assert!(!roles.has_capability("admin_manager", cap));
        }
        assert!(roles.has_capability("admin_manager", "edit_posts"));
    }

    #[test]
    fn test_enforce_is_idempotent() {
        let settings = Settings::defaults();
        let mut roles = registry();

        let first = enforce_for_target_roles(&mut roles, &settings);
        let after_first = roles.clone();
        let second = enforce_for_target_roles(&mut roles, &settings);

        assert_eq!(first.len(), RESTRICTED_CAPABILITIES.len());
        assert!(second.is_empty());
        assert_eq!(roles, after_first);
    }

    #[test]
    fn test_administrator_never_touched() {
        let mut roles = registry();
        assert!(apply_defaults(&mut roles, ADMINISTRATOR_ROLE).is_empty());
        assert!(roles.has_capability(ADMINISTRATOR_ROLE, "edit_blocks"));
    }

    #[test]
    fn test_disabled_settings_enforce_nothing() {
        let settings = Settings { enabled: false, ..Settings::defaults() };
        let mut roles = registry();

        assert!(enforce_for_target_roles(&mut roles, &settings).is_empty());
        assert!(removal_plan(&settings).is_empty());
        assert!(roles.has_capability("admin_manager", "edit_blocks"));
    }

    #[test]
    fn test_missing_role_is_skipped() {
        let settings =
            Settings { target_roles: vec!["ghost".to_string()], ..Settings::defaults() };
        let mut roles = registry();
        assert!(enforce_for_target_roles(&mut roles, &settings).is_empty());
    }

    #[test]
    fn test_removal_plan_covers_each_target_role() {
        let settings = Settings {
            target_roles: vec!["admin_manager".to_string(), "shop_manager".to_string()],
            ..Settings::defaults()
        };
        let plan = removal_plan(&settings);

        assert_eq!(plan.len(), 2 * RESTRICTED_CAPABILITIES.len());
        assert!(plan.contains(&CapabilityRemoval {
            role: "shop_manager".to_string(),
            capability: "read_private_blocks",
        }));
    }
}
