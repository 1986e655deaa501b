//! JSON-file option storage
//!
//! All options live in one JSON object file (`{ "<key>": <value>, ... }`).
//! Every write rewrites the whole file through a temp file and a rename, so a
//! reader never sees a half-written record.

use super::store::OptionStore;
use crate::{Error, Result};
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// File-backed option storage
#[derive(Debug)]
pub struct FileOptionStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileOptionStore {
    /// Use `path` as the option file; it is created on first write
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), write_lock: Mutex::new(()) }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<Map<String, Value>> {
        if !self.path.exists() {
            return Ok(Map::new());
        }

        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(Map::new());
        }

        match serde_json::from_str::<Value>(&content)? {
            Value::Object(options) => Ok(options),
            _ => Err(Error::Storage(format!(
                "option file {} does not contain a JSON object",
                self.path.display()
            ))),
        }
    }

    fn write_all(&self, options: &Map<String, Value>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_vec_pretty(options)?)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    fn update(&self, apply: impl FnOnce(&mut Map<String, Value>)) -> Result<()> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| Error::Storage("option file lock poisoned".to_string()))?;
        let mut options = self.read_all()?;
        apply(&mut options);
        self.write_all(&options)
    }
}

impl OptionStore for FileOptionStore {
    fn load(&self, key: &str) -> Result<Option<Value>> {
        Ok(self.read_all()?.remove(key))
    }

    fn save(&self, key: &str, value: &Value) -> Result<()> {
        self.update(|options| {
            options.insert(key.to_string(), value.clone());
        })
    }

    fn delete(&self, key: &str) -> Result<()> {
        if !self.path.exists() {
            return Ok(());
        }
        self.update(|options| {
            options.remove(key);
        })
    }
}
