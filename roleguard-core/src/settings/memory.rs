//! In-memory option storage
//!
//! Suitable for tests and single-process hosts; values are lost on restart.

use super::store::OptionStore;
use crate::{Error, Result};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// Thread-safe option storage using `RwLock<HashMap>`
#[derive(Debug, Clone, Default)]
pub struct MemoryOptionStore {
    options: Arc<RwLock<HashMap<String, Value>>>,
}

impl MemoryOptionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently stored
    pub fn len(&self) -> usize {
        self.options.read().map(|options| options.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn poisoned<T>(_: T) -> Error {
    Error::Storage("option store lock poisoned".to_string())
}

impl OptionStore for MemoryOptionStore {
    fn load(&self, key: &str) -> Result<Option<Value>> {
        let options = self.options.read().map_err(poisoned)?;
        Ok(options.get(key).cloned())
    }

    fn save(&self, key: &str, value: &Value) -> Result<()> {
        let mut options = self.options.write().map_err(poisoned)?;
        options.insert(key.to_string(), value.clone());
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<()> {
        let mut options = self.options.write().map_err(poisoned)?;
        options.remove(key);
        Ok(())
    }
}
