//! Roleguard - Core
//!
//! Role-based access restrictions for a content-management admin interface.
//!
//! # Overview
//!
//! An administrator designates one or more non-administrator roles as
//! *target roles*. Accounts holding a target role (while restrictions are
//! enabled) are *managed actors*, and for them Roleguard decides:
//!
//! - which installed plugins are hidden, and which listing screens are denied
//! - which reusable-content capabilities their roles lose
//! - which style rules are injected into the block editor
//!
//! Roleguard owns no users, roles, plugins or pages. The host supplies them
//! per call and renders whatever Roleguard decides.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use roleguard_core::prelude::*;
//!
//! let config = RoleguardConfig::load()?;
//! let control = AccessControl::open(&config);
//!
//! let request = control.request(Actor::new("42", ["admin_manager"]));
//! request.check_screen(&Screen::from_admin_path("plugins.php"))?;
//! let visible = request.visible_plugins(&inventory);
//! ```
//!
//! # Architecture
//!
//! - [`settings`] - Settings model, defaults, merge-on-load, sanitizer, option stores
//! - [`rbac`] - Actor classification (administrator, managed, unrestricted)
//! - [`policy`] - Plugin filter, capability restrictions, editor style rules
//! - [`guard`] - Screen identification and navigation guards
//! - [`app`] - [`AccessControl`](app::AccessControl) façade for hosts
//! - [`export`] - Static role export download
//! - [`config`] / [`logging`] - Runtime configuration and logger setup

pub mod app;
pub mod config; // Configuration system with TOML support
pub mod export;
pub mod guard;
pub mod logging; // env_logger backend for the log facade
pub mod patterns; // Case-insensitive substring patterns
pub mod policy;
pub mod rbac; // Actor classification and host role registry
pub mod settings;

// Prelude module for convenient imports
pub mod prelude;

pub use app::{AccessControl, RequestPolicy};
pub use rbac::{Access, Actor};
pub use settings::Settings;

/// Main result type for Roleguard
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for Roleguard
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Administrator-only operation attempted by someone else
    #[error("{0}")]
    Unauthorized(String),

    /// Managed actor navigated to a restricted screen
    #[error("{0}")]
    Forbidden(String),

    /// Host persistence failure
    #[error("Storage error: {0}")]
    Storage(String),

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    /// True for access denials, which hosts render as an access-denied page
    pub fn is_denial(&self) -> bool {
        matches!(self, Error::Unauthorized(_) | Error::Forbidden(_))
    }
}
