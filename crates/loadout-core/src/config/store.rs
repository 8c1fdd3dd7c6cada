//! Key-Value Store
//!
//! Small persisted string map holding user settings such as the registered
//! external config path. `JsonFileStore` keeps the whole map as one JSON
//! object on disk and rewrites it on every mutation.

use serde_json::{Map, Value};
use std::fs;
use std::path::PathBuf;
use std::sync::RwLock;
use tracing::{debug, info, warn};

use crate::common::{LoadoutError, LoadoutResult};

/// Key under which the external client config directory is stored
pub const EXTERNAL_CONFIG_PATH_KEY: &str = "externalConfigPath";

/// Opaque string store injected into the components that need settings
pub trait ConfigStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> LoadoutResult<()>;
    fn delete(&self, key: &str) -> LoadoutResult<()>;
}

// ── JsonFileStore ───────────────────────────────────────────────────────────

pub struct JsonFileStore {
    path: PathBuf,
    values: RwLock<Map<String, Value>>,
}

impl JsonFileStore {
    /// Open (or lazily create) the store at `path`.
    ///
    /// A missing file is an empty store; a corrupt file is an error so a
    /// bad edit is never silently overwritten.
    pub fn open(path: impl Into<PathBuf>) -> LoadoutResult<Self> {
        let path = path.into();
        let values = if path.exists() {
            let data = fs::read_to_string(&path)?;
            if data.trim().is_empty() {
                Map::new()
            } else {
                match serde_json::from_str::<Value>(&data)? {
                    Value::Object(map) => map,
                    other => {
                        return Err(LoadoutError::Config(format!(
                            "Store {:?} must contain a JSON object, found {}",
                            path, other
                        )))
                    }
                }
            }
        } else {
            debug!("Store file {:?} does not exist yet", path);
            Map::new()
        };

        info!("Config store opened at {:?} ({} keys)", path, values.len());
        Ok(Self {
            path,
            values: RwLock::new(values),
        })
    }

    fn flush(&self, values: &Map<String, Value>) -> LoadoutResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(values)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

impl ConfigStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<String> {
        let values = match self.values.read() {
            Ok(v) => v,
            Err(poisoned) => poisoned.into_inner(),
        };
        values.get(key).and_then(|v| v.as_str()).map(String::from)
    }

    fn set(&self, key: &str, value: &str) -> LoadoutResult<()> {
        let mut values = self
            .values
            .write()
            .map_err(|_| LoadoutError::Config("Store lock poisoned".to_string()))?;
        values.insert(key.to_string(), Value::String(value.to_string()));
        self.flush(&values)?;
        debug!("Store key '{}' updated", key);
        Ok(())
    }

    fn delete(&self, key: &str) -> LoadoutResult<()> {
        let mut values = self
            .values
            .write()
            .map_err(|_| LoadoutError::Config("Store lock poisoned".to_string()))?;
        if values.remove(key).is_none() {
            warn!("Store key '{}' was not set", key);
            return Ok(());
        }
        self.flush(&values)
    }
}

// ── MemoryStore ─────────────────────────────────────────────────────────────

/// Non-persistent store, used by tests and one-shot tooling
#[derive(Default)]
pub struct MemoryStore {
    values: RwLock<Map<String, Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(key: &str, value: &str) -> Self {
        let mut map = Map::new();
        map.insert(key.to_string(), Value::String(value.to_string()));
        Self {
            values: RwLock::new(map),
        }
    }
}

impl ConfigStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        let values = match self.values.read() {
            Ok(v) => v,
            Err(poisoned) => poisoned.into_inner(),
        };
        values.get(key).and_then(|v| v.as_str()).map(String::from)
    }

    fn set(&self, key: &str, value: &str) -> LoadoutResult<()> {
        let mut values = self
            .values
            .write()
            .map_err(|_| LoadoutError::Config("Store lock poisoned".to_string()))?;
        values.insert(key.to_string(), Value::String(value.to_string()));
        Ok(())
    }

    fn delete(&self, key: &str) -> LoadoutResult<()> {
        let mut values = self
            .values
            .write()
            .map_err(|_| LoadoutError::Config("Store lock poisoned".to_string()))?;
        values.remove(key);
        Ok(())
    }
}
