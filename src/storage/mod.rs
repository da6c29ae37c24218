//! Durable key-value storage for persisted preference records
//!
//! Each key maps to one JSON document. Records are wrapped in a small
//! envelope carrying a schema version so future layouts can be told apart.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use thiserror::Error;
use tracing::{debug, warn};

/// Current envelope version written by this crate
pub const RECORD_VERSION: u32 = 0;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to encode record: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("Invalid storage key: {0:?}")]
    InvalidKey(String),
}

/// Minimal key-value backend
pub trait KeyValueStore {
    /// Read the raw value for a key, `None` if it was never written
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Overwrite the value for a key
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// On-disk envelope around a persisted record
#[derive(Debug, Serialize, Deserialize)]
struct Envelope<T> {
    state: T,
    #[serde(default)]
    version: u32,
}

/// Load a record, treating absent or malformed data as "not present"
pub fn load_record<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> Option<T> {
    let raw = match store.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            debug!("No stored record for {}", key);
            return None;
        }
        Err(e) => {
            warn!("Failed to read {}: {}", key, e);
            return None;
        }
    };

    match serde_json::from_str::<Envelope<T>>(&raw) {
        Ok(envelope) => Some(envelope.state),
        Err(e) => {
            warn!("Ignoring malformed record {}: {}", key, e);
            None
        }
    }
}

/// Serialize a record into its envelope and write it
pub fn save_record<T: Serialize>(
    store: &mut dyn KeyValueStore,
    key: &str,
    state: &T,
) -> Result<(), StorageError> {
    let envelope = Envelope {
        state,
        version: RECORD_VERSION,
    };
    let raw = serde_json::to_string(&envelope)?;
    store.set(key, &raw)
}

/// Stores every key as `<dir>/<key>.json`
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(StorageError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key)?;
        match std::fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        std::fs::create_dir_all(&self.dir)?;

        // Write then rename so a crash never leaves a half-written record
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, value)?;
        std::fs::rename(&tmp, &path)?;
        Ok(())
    }
}

/// In-memory store; clones share the same map
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw value currently held for a key
    pub fn raw(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Sample {
        value: u32,
    }

    #[test]
    fn test_memory_round_trip() {
        let mut store = MemoryStore::new();
        save_record(&mut store, "sample", &Sample { value: 7 }).unwrap();

        let loaded: Option<Sample> = load_record(&store, "sample");
        assert_eq!(loaded, Some(Sample { value: 7 }));
        assert!(store.raw("sample").unwrap().contains("\"version\":0"));
    }

    #[test]
    fn test_missing_and_malformed_are_absent() {
        let mut store = MemoryStore::new();
        assert_eq!(load_record::<Sample>(&store, "sample"), None);

        store.set("sample", "{not json").unwrap();
        assert_eq!(load_record::<Sample>(&store, "sample"), None);

        store.set("sample", r#"{"state":{"value":"seven"}}"#).unwrap();
        assert_eq!(load_record::<Sample>(&store, "sample"), None);
    }

    #[test]
    fn test_file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(dir.path().join("nested"));

        assert_eq!(store.get("portfolio-theme").unwrap(), None);
        store.set("portfolio-theme", "{}").unwrap();
        assert_eq!(store.get("portfolio-theme").unwrap(), Some("{}".to_string()));
        assert!(dir.path().join("nested/portfolio-theme.json").exists());
    }

    #[test]
    fn test_file_store_rejects_path_keys() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(dir.path());
        assert!(matches!(
            store.set("../escape", "{}"),
            Err(StorageError::InvalidKey(_))
        ));
    }
}
