//! The persistence backend: a very small key-value store holding serialized ledger state.
//!
//! `FileStorage` keeps each key in `<dir>/<key>.json`. `MemoryStorage` keeps everything in a map
//! and is what the tests use when they do not care about the filesystem.

use crate::{utils, Result};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tracing::trace;

/// The key under which the record sequence is stored.
pub const TRANSACTIONS_KEY: &str = "transactions";

/// A string key-value store.
#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// Returns the value stored under `key`, or `None` if nothing has been stored there.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Replaces whatever is stored under `key` with `value`.
    async fn set(&self, key: &str, value: &str) -> Result<()>;
}

/// Stores each key as a JSON file in a directory.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The file that holds `key`.
    pub fn path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

#[async_trait::async_trait]
impl Storage for FileStorage {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path(key);
        trace!("get {key} from {}", path.display());
        if !path.is_file() {
            return Ok(None);
        }
        utils::read(&path).await.map(Some)
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let path = self.path(key);
        trace!("set {key} at {}", path.display());
        utils::write_atomic(&path, value).await
    }
}

/// Keeps values in memory. Clones share the same map, so a test can hold on to one clone and
/// inspect what a store wrote through another.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    data: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a `MemoryStorage` that already holds `value` under `key`.
    pub fn with_value(key: impl Into<String>, value: impl Into<String>) -> Self {
        let storage = Self::new();
        storage.insert(key, value);
        storage
    }

    fn insert(&self, key: impl Into<String>, value: impl Into<String>) {
        let mut data = self.data.lock().unwrap_or_else(|e| e.into_inner());
        data.insert(key.into(), value.into());
    }

    fn lookup(&self, key: &str) -> Option<String> {
        let data = self.data.lock().unwrap_or_else(|e| e.into_inner());
        data.get(key).cloned()
    }
}

#[async_trait::async_trait]
impl Storage for MemoryStorage {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.lookup(key))
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        self.insert(key, value);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_file_storage_missing_key() {
        let dir = TempDir::new().unwrap();
        let storage = FileStorage::new(dir.path());
        assert_eq!(storage.get(TRANSACTIONS_KEY).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_file_storage_set_then_get() {
        let dir = TempDir::new().unwrap();
        let storage = FileStorage::new(dir.path());
        storage.set(TRANSACTIONS_KEY, "[]").await.unwrap();
        assert!(dir.path().join("transactions.json").is_file());
        assert_eq!(
            storage.get(TRANSACTIONS_KEY).await.unwrap().as_deref(),
            Some("[]")
        );

        storage.set(TRANSACTIONS_KEY, "[1,2]").await.unwrap();
        assert_eq!(
            storage.get(TRANSACTIONS_KEY).await.unwrap().as_deref(),
            Some("[1,2]")
        );
    }

    #[tokio::test]
    async fn test_memory_storage_clones_share_data() {
        let storage = MemoryStorage::new();
        let observer = storage.clone();
        storage.set("k", "v").await.unwrap();
        assert_eq!(observer.get("k").await.unwrap().as_deref(), Some("v"));
        assert_eq!(observer.get("other").await.unwrap(), None);
    }
}
