//! Prelude module for convenient imports.
//!
//! ```rust,ignore
//! use roleguard_core::prelude::*;
//! ```

// === Host entry points ===
pub use crate::app::{AccessControl, PluginAction, RequestPolicy, SettingsPage};

// === Configuration ===
pub use crate::config::RoleguardConfig;
pub use crate::logging::init_logging;

// === Settings ===
pub use crate::settings::{
    FileOptionStore, MemoryOptionStore, OptionStore, RestrictionKey, Settings, SettingsStore,
};

// === Actors and roles ===
pub use crate::rbac::{Access, Actor, MemoryRoleRegistry, Role, RoleRegistry};

// === Policies ===
pub use crate::guard::Screen;
pub use crate::policy::{PluginDescriptor, PluginInventory, StyleRule, StyleSheet};

// === Export ===
pub use crate::export::{RoleExport, StaticTokenVerifier, TokenVerifier};

// === Errors ===
pub use crate::{Error, Result};
