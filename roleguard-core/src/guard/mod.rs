//! Screen guards
//!
//! Declarative protection for admin screens:
//! - Listing screens hidden from managed actors are denied outright
//!   ([`Error::Forbidden`]), not merely filtered
//! - Administrator-only screens and operations require the administrator
//!   role ([`Error::Unauthorized`])
//!
//! Example:
//! ```ignore
//! let screen = Screen::from_admin_path("edit.php?post_type=wp_block");
//! check_navigation(&screen, classify(&actor, &settings))?;
//! ```

mod screen;

pub use screen::{Screen, SETTINGS_PAGE_SLUG};

use crate::rbac::{is_administrator, Access, Actor};
use crate::{Error, Result};

/// Denial message for the plugin listing
pub const PLUGINS_FORBIDDEN: &str = "You do not have sufficient permissions to access this page.";

/// Denial message for the reusable-content listing
pub const REUSABLE_BLOCKS_FORBIDDEN: &str = "Access to reusable blocks is restricted.";

/// Refusal message for the settings screen
pub const ADMIN_REQUIRED: &str = "Access denied: Requires Administrator privileges.";

/// Screen guard definition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreenGuard {
    /// Deny managed actors with this message
    DenyManaged { message: &'static str },

    /// Deny everyone but administrators with this message
    RequireAdministrator { message: &'static str },
}

impl ScreenGuard {
    /// The guard protecting `screen`, if any
    pub fn for_screen(screen: &Screen) -> Option<Self> {
        match screen {
            Screen::Plugins => Some(ScreenGuard::DenyManaged { message: PLUGINS_FORBIDDEN }),
            Screen::ReusableBlocks => {
                Some(ScreenGuard::DenyManaged { message: REUSABLE_BLOCKS_FORBIDDEN })
            }
            Screen::Settings => Some(ScreenGuard::RequireAdministrator { message: ADMIN_REQUIRED }),
            Screen::BlockEditor | Screen::Other(_) => None,
        }
    }

    /// Check an actor's access class against this guard
    pub fn check(&self, access: Access) -> Result<()> {
        match self {
            ScreenGuard::DenyManaged { message } if access.is_managed() => {
                Err(Error::Forbidden(message.to_string()))
            }
            ScreenGuard::RequireAdministrator { message } if !access.is_administrator() => {
                Err(Error::Unauthorized(message.to_string()))
            }
            _ => Ok(()),
        }
    }
}

/// Decide whether an actor of class `access` may open `screen`
pub fn check_navigation(screen: &Screen, access: Access) -> Result<()> {
    let Some(guard) = ScreenGuard::for_screen(screen) else {
        return Ok(());
    };

    guard.check(access).inspect_err(|e| {
        log::warn!("Denied navigation to {} for {} actor: {}", screen, access, e);
    })
}

/// Refuse an administrator-only operation for anyone else
pub fn require_administrator(actor: &Actor, message: &str) -> Result<()> {
    if is_administrator(actor) {
        return Ok(());
    }

    log::warn!("Refused administrator-only operation for actor {}: {}", actor.id, message);
    Err(Error::Unauthorized(message.to_string()))
}
