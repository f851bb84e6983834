//! Local key-value store
//!
//! String keys map to one JSON file each under the data directory.
//! Every successful write broadcasts a [`StoreChange`] so independent
//! consumers (the storefront preview) can follow along without sharing
//! any in-memory state with the writer.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tokio::sync::broadcast;

/// Storage key for the site settings record.
pub const SETTINGS_KEY: &str = "websiteSettings";

/// Storage key for the product catalog.
pub const CATALOG_KEY: &str = "adminProducts";

/// Change events buffered per subscriber before the oldest are dropped.
const CHANGE_CHANNEL_CAPACITY: usize = 32;

/// Errors from the store layer.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("corrupt record under key '{key}': {source}")]
    Corrupt {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("could not serialize record for key '{key}': {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Broadcast after every successful write. Carries the key and the new
/// serialized value, nothing else; delivery is best-effort.
#[derive(Debug, Clone)]
pub struct StoreChange {
    pub key: String,
    pub new_value: String,
}

/// String-keyed, string-valued persistent store.
pub struct LocalStore {
    root: PathBuf,
    changes: broadcast::Sender<StoreChange>,
}

impl LocalStore {
    /// Open a store rooted at `root`, creating the directory if needed.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let root = root.into();
        std::fs::create_dir_all(&root)?;
        let (changes, _) = broadcast::channel(CHANGE_CHANNEL_CAPACITY);
        tracing::info!("Opened local store at {:?}", root);
        Ok(Self { root, changes })
    }

    /// Default data directory: `STOREFRONT_ADMIN_DATA` if set, otherwise
    /// `storefront-data/` next to the executable.
    pub fn default_dir() -> PathBuf {
        if let Ok(dir) = std::env::var("STOREFRONT_ADMIN_DATA") {
            return PathBuf::from(dir);
        }
        std::env::current_exe()
            .unwrap_or_else(|_| PathBuf::from("."))
            .parent()
            .map(|p| p.to_path_buf())
            .unwrap_or_else(|| PathBuf::from("."))
            .join("storefront-data")
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.json"))
    }

    /// Read the raw value stored under `key`, `None` if nothing has been
    /// stored yet.
    pub fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        match std::fs::read_to_string(self.key_path(key)) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Write `value` under `key` and broadcast the change.
    pub fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        std::fs::write(self.key_path(key), value)?;
        tracing::info!("Stored {} bytes under key '{}'", value.len(), key);

        // A send error only means nobody is subscribed right now.
        let _ = self.changes.send(StoreChange {
            key: key.to_string(),
            new_value: value.to_string(),
        });
        Ok(())
    }

    /// Deserialize the record stored under `key`.
    pub fn get_record<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StoreError> {
        match self.get(key)? {
            Some(raw) => {
                let record = serde_json::from_str(&raw).map_err(|source| StoreError::Corrupt {
                    key: key.to_string(),
                    source,
                })?;
                Ok(Some(record))
            }
            None => Ok(None),
        }
    }

    /// Serialize `record` and store it under `key`.
    pub fn put_record<T: Serialize>(&self, key: &str, record: &T) -> Result<(), StoreError> {
        let raw = serde_json::to_string_pretty(record).map_err(|source| StoreError::Encode {
            key: key.to_string(),
            source,
        })?;
        self.set(key, &raw)
    }

    /// Subscribe to change events. A receiver that falls behind misses
    /// the oldest events.
    pub fn subscribe(&self) -> broadcast::Receiver<StoreChange> {
        self.changes.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_key_reads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::open(dir.path()).unwrap();
        assert!(store.get("nothingHere").unwrap().is_none());
    }

    #[test]
    fn set_then_get_returns_the_value() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::open(dir.path()).unwrap();
        store.set("greeting", r#"{"hello":true}"#).unwrap();
        assert_eq!(store.get("greeting").unwrap().unwrap(), r#"{"hello":true}"#);
    }

    #[test]
    fn record_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::open(dir.path()).unwrap();
        store.put_record("numbers", &vec![1u32, 2, 3]).unwrap();
        let back: Vec<u32> = store.get_record("numbers").unwrap().unwrap();
        assert_eq!(back, [1, 2, 3]);
    }

    #[test]
    fn writes_broadcast_to_subscribers() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::open(dir.path()).unwrap();
        let mut rx = store.subscribe();

        store.set("k", "v").unwrap();

        let change = rx.try_recv().unwrap();
        assert_eq!(change.key, "k");
        assert_eq!(change.new_value, "v");
    }

    #[test]
    fn corrupt_record_is_a_typed_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::open(dir.path()).unwrap();
        store.set("bad", "not json").unwrap();

        let result: Result<Option<Vec<u32>>, StoreError> = store.get_record("bad");
        assert!(matches!(result, Err(StoreError::Corrupt { .. })));
    }
}
