//! Key/value persistence for saved filters
//!
//! Values are JSON documents under string keys. [`JsonFileStore`] keeps every
//! key in a single JSON object file; [`MemoryStore`] is process-local and can
//! enforce a byte quota.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use parking_lot::RwLock;
use serde_json::{Map, Value};

use crate::error::StoreError;

/// Default store filename
const STORE_FILENAME: &str = "filters.json";

/// Storage backend contract
pub trait PersistenceStore: Send + Sync {
    /// Store `value` under `key`, replacing any previous value
    fn save(&self, key: &str, value: &Value) -> Result<(), StoreError>;

    /// Read the value under `key`
    fn load(&self, key: &str) -> Result<Option<Value>, StoreError>;

    /// Delete `key` if present
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

/// Store backed by one JSON file on disk
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Store at the platform data directory
    pub fn new() -> Result<Self, StoreError> {
        Ok(Self::with_path(Self::default_path()?))
    }

    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<data dir>/logsift/filters.json`
    pub fn default_path() -> Result<PathBuf, StoreError> {
        ProjectDirs::from("", "", "logsift")
            .map(|dirs| dirs.data_dir().join(STORE_FILENAME))
            .ok_or(StoreError::NoDataDir)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<Map<String, Value>, StoreError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Map::new()),
            Err(source) => {
                return Err(StoreError::Io {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        if content.trim().is_empty() {
            return Ok(Map::new());
        }
        Ok(serde_json::from_str(&content)?)
    }

    fn write_all(&self, map: &Map<String, Value>) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|source| StoreError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let content = serde_json::to_string_pretty(map)?;

        // Write to a sibling temp file and rename it into place
        let temp_path = self.path.with_extension("tmp");
        fs::write(&temp_path, content).map_err(|source| StoreError::Io {
            path: temp_path.clone(),
            source,
        })?;
        fs::rename(&temp_path, &self.path).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })
    }
}

impl PersistenceStore for JsonFileStore {
    fn save(&self, key: &str, value: &Value) -> Result<(), StoreError> {
        let mut map = self.read_all()?;
        map.insert(key.to_string(), value.clone());
        self.write_all(&map)
    }

    fn load(&self, key: &str) -> Result<Option<Value>, StoreError> {
        Ok(self.read_all()?.remove(key))
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        let mut map = self.read_all()?;
        if map.remove(key).is_some() {
            self.write_all(&map)?;
        }
        Ok(())
    }
}

/// In-memory store with an optional quota on the serialized size of all values
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: RwLock<HashMap<String, String>>,
    quota: Option<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject saves that would push the total size past `bytes`
    pub fn with_quota(bytes: usize) -> Self {
        Self {
            values: RwLock::new(HashMap::new()),
            quota: Some(bytes),
        }
    }

    /// Total serialized size of stored values
    pub fn used_bytes(&self) -> usize {
        self.values.read().values().map(String::len).sum()
    }
}

impl PersistenceStore for MemoryStore {
    fn save(&self, key: &str, value: &Value) -> Result<(), StoreError> {
        let serialized = serde_json::to_string(value)?;
        let mut values = self.values.write();

        if let Some(quota) = self.quota {
            let others: usize = values
                .iter()
                .filter(|(k, _)| k.as_str() != key)
                .map(|(_, v)| v.len())
                .sum();
            let needed = others + serialized.len();
            if needed > quota {
                return Err(StoreError::QuotaExceeded { needed, quota });
            }
        }

        values.insert(key.to_string(), serialized);
        Ok(())
    }

    fn load(&self, key: &str) -> Result<Option<Value>, StoreError> {
        self.values
            .read()
            .get(key)
            .map(|s| serde_json::from_str(s))
            .transpose()
            .map_err(StoreError::from)
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.values.write().remove(key);
        Ok(())
    }
}
