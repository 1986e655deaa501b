//! Role-based access classification
//!
//! Every restriction in this crate is gated on one question: is the current
//! actor a *managed* actor? The answer is computed here and nowhere else.
//!
//! Administrator status is checked first and always wins. An actor holding the
//! administrator role is never managed, even when another of its roles is a
//! target role and restrictions are enabled.
//!
//! # Example
//! ```rust,ignore
//! let actor = Actor::new("42", ["admin_manager"]);
//! let settings = Settings::defaults();
//! assert_eq!(classify(&actor, &settings), Access::Managed);
//! ```

mod context;
mod roles;

pub use context::Actor;
pub use roles::{looks_like_manager_role, manager_role_exists, MemoryRoleRegistry, Role, RoleRegistry};

use crate::settings::Settings;

/// Role identifier (slug), e.g. `"editor"`
pub type RoleId = String;

/// The built-in administrator role. It can never be a target role.
pub const ADMINISTRATOR_ROLE: &str = "administrator";

/// Access class of an actor for one request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Access {
    /// Holds the administrator role; bypasses every restriction
    Administrator,
    /// Holds a target role while restrictions are enabled
    Managed,
    /// Neither of the above; no restriction applies
    Unrestricted,
}

impl Access {
    pub fn is_administrator(self) -> bool {
        self == Access::Administrator
    }

    pub fn is_managed(self) -> bool {
        self == Access::Managed
    }
}

impl std::fmt::Display for Access {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Access::Administrator => write!(f, "administrator"),
            Access::Managed => write!(f, "managed"),
            Access::Unrestricted => write!(f, "unrestricted"),
        }
    }
}

/// True iff the actor holds the administrator role
pub fn is_administrator(actor: &Actor) -> bool {
    actor.has_role(ADMINISTRATOR_ROLE)
}

/// True iff restrictions are enabled, the actor holds a target role, and the
/// actor is not an administrator
pub fn is_managed(actor: &Actor, settings: &Settings) -> bool {
    classify(actor, settings).is_managed()
}

/// Classify an actor against the current settings
pub fn classify(actor: &Actor, settings: &Settings) -> Access {
    if is_administrator(actor) {
        return Access::Administrator;
    }

    if settings.enabled && actor.roles.iter().any(|role| settings.targets_role(role)) {
        Access::Managed
    } else {
        Access::Unrestricted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings_targeting(roles: &[&str]) -> Settings {
        Settings {
            target_roles: roles.iter().map(|r| r.to_string()).collect(),
            ..Settings::defaults()
        }
    }

    #[test]
    fn test_managed_actor() {
        let settings = settings_targeting(&["admin_manager"]);
        let actor = Actor::new("7", ["admin_manager"]);
        assert_eq!(classify(&actor, &settings), Access::Managed);
        assert!(is_managed(&actor, &settings));
    }

    #[test]
    fn test_disabled_settings_never_manage() {
        let settings = Settings { enabled: false, ..settings_targeting(&["admin_manager"]) };
        let actor = Actor::new("7", ["admin_manager"]);
        assert_eq!(classify(&actor, &settings), Access::Unrestricted);
    }

    #[test]
    fn test_administrator_precedence() {
        let settings = settings_targeting(&["admin_manager"]);
        let actor = Actor::new("1", [ADMINISTRATOR_ROLE, "admin_manager"]);
        assert!(is_administrator(&actor));
        assert!(!is_managed(&actor, &settings));
        assert_eq!(classify(&actor, &settings), Access::Administrator);
    }

    #[test]
    fn test_untargeted_role_is_unrestricted() {
        let settings = settings_targeting(&["admin_manager"]);
        let actor = Actor::new("9", ["editor", "author"]);
        assert_eq!(classify(&actor, &settings), Access::Unrestricted);
    }

    #[test]
    fn test_actor_without_roles() {
        let settings = settings_targeting(&["admin_manager"]);
        let actor = Actor::new("0", Vec::<String>::new());
        assert_eq!(classify(&actor, &settings), Access::Unrestricted);
    }
}
