//! Settings persistence

use super::{sanitize, Sanitized, Settings};
use crate::rbac::RoleId;
use crate::Result;
use serde_json::Value;
use std::collections::BTreeSet;

/// The host's key-value persistence
///
/// Writes are a single atomic replace of the value under a key; concurrent
/// writers are serialized by the backend, not by Roleguard.
pub trait OptionStore: Send + Sync {
    /// Read the value stored under `key`, if any
    fn load(&self, key: &str) -> Result<Option<Value>>;

    /// Replace the value stored under `key`
    fn save(&self, key: &str, value: &Value) -> Result<()>;

    /// Remove `key`; removing an absent key is not an error
    fn delete(&self, key: &str) -> Result<()>;
}

/// Typed access to the settings record kept in an [`OptionStore`]
#[derive(Debug, Clone)]
pub struct SettingsStore<S: OptionStore> {
    store: S,
    key: String,
}

impl<S: OptionStore> SettingsStore<S> {
    /// Create a settings store persisting under `key`
    pub fn new(store: S, key: impl Into<String>) -> Self {
        Self { store, key: key.into() }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn inner(&self) -> &S {
        &self.store
    }

    /// The canonical defaults
    pub fn defaults(&self) -> Settings {
        Settings::defaults()
    }

    /// Load the stored record merged over the defaults
    ///
    /// A missing record yields the defaults.
    pub fn load(&self) -> Result<Settings> {
        let stored = self.store.load(&self.key)?;
        Ok(match stored {
            Some(value) => Settings::merge_stored(&value),
            None => Settings::defaults(),
        })
    }

    /// Load for request-time evaluation; never fails
    ///
    /// A backend failure is logged and the defaults are used instead, which
    /// keep restrictions enabled and the system plugins hidden.
    pub fn load_or_defaults(&self) -> Settings {
        self.load().unwrap_or_else(|e| {
            log::error!("Failed to read settings '{}', falling back to defaults: {}", self.key, e);
            Settings::defaults()
        })
    }

    /// Persist an already-sanitized record verbatim
    pub fn save(&self, settings: &Settings) -> Result<()> {
        let value = serde_json::to_value(settings)?;
        self.store.save(&self.key, &value)?;
        log::info!(
            "Saved settings '{}' (enabled: {}, target roles: {:?})",
            self.key,
            settings.enabled,
            settings.target_roles
        );
        Ok(())
    }

    /// Sanitize a raw form submission and persist the result
    pub fn sanitize_and_save(
        &self,
        raw: &Value,
        editable_roles: &BTreeSet<RoleId>,
    ) -> Result<Sanitized> {
        let sanitized = sanitize(raw, editable_roles);
        self.save(&sanitized.settings)?;
        Ok(sanitized)
    }

    /// Remove the persisted record
    pub fn delete(&self) -> Result<()> {
        self.store.delete(&self.key)?;
        log::info!("Deleted settings '{}'", self.key);
        Ok(())
    }

    /// Read one field with a fallback; equivalent to `load()[key] ?? default`
    pub fn get_setting(&self, key: &str, default: Value) -> Value {
        self.load_or_defaults().get(key, default)
    }
}
