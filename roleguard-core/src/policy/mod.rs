//! Restriction policies
//!
//! Three independent, pure computations over the current [`Settings`](crate::settings::Settings)
//! and host-supplied inventories:
//!
//! - [`plugins`] - which plugins a managed actor may see
//! - [`capabilities`] - which capabilities target roles lose
//! - [`editor`] - which style rules are injected into the block editor
//!
//! Each is gated by the managed-actor check in [`rbac`](crate::rbac); for
//! any other actor they pass their input through unchanged.

pub mod capabilities;
pub mod editor;
pub mod plugins;

pub use capabilities::{
    apply_defaults, enforce_for_target_roles, removal_plan, CapabilityRemoval,
    RESTRICTED_CAPABILITIES,
};
pub use editor::{generate_style_rules, InlineStyle, StyleRule, StyleSheet};
pub use plugins::{
    filter_visible_plugins, hidden_plugins, HiddenReason, PluginDescriptor, PluginInventory,
    PluginPath, OWN_PLUGIN_PATH, SYSTEM_PROTECTED_PLUGINS,
};
