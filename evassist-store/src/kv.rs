//! String key-value storage.
//!
//! [`KeyValueStore`] is the persistence seam for small client-side state.
//! [`MemoryKvStore`] backs tests; [`FileKvStore`] keeps every key in one
//! JSON map written atomically.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::sync::{Mutex, RwLock};
use tracing::debug;

use crate::error::StoreError;
use crate::persistence::{load_json_if_exists, save_json};

/// A batch of writes; `None` removes the key.
pub type KvBatch = Vec<(String, Option<String>)>;

/// Asynchronous string key-value storage.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Reads a key.
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Writes a key, replacing any previous value.
    async fn set(&self, key: &str, value: String) -> Result<(), StoreError> {
        self.write_batch(vec![(key.to_string(), Some(value))]).await
    }

    /// Removes a key. Removing a missing key is not an error.
    async fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.write_batch(vec![(key.to_string(), None)]).await
    }

    /// Applies every write in `batch` as one replacement.
    async fn write_batch(&self, batch: KvBatch) -> Result<(), StoreError>;
}

fn apply(map: &mut BTreeMap<String, String>, batch: KvBatch) {
    for (key, value) in batch {
        match value {
            Some(v) => {
                map.insert(key, v);
            }
            None => {
                map.remove(&key);
            }
        }
    }
}

// ============================================================================
// Memory Store
// ============================================================================

/// In-memory store.
#[derive(Debug, Default)]
pub struct MemoryKvStore {
    entries: RwLock<BTreeMap<String, String>>,
}

impl MemoryKvStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of keys.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Returns true if no keys are stored.
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl KeyValueStore for MemoryKvStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn write_batch(&self, batch: KvBatch) -> Result<(), StoreError> {
        apply(&mut *self.entries.write().await, batch);
        Ok(())
    }
}

// ============================================================================
// File Store
// ============================================================================

/// Store backed by a single JSON object on disk.
///
/// Writes are serialized through a mutex and land via temp file plus
/// rename, so readers see either the old map or the new one.
#[derive(Debug)]
pub struct FileKvStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileKvStore {
    /// Creates a store at `path`. The file is created on first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Returns the backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> Result<BTreeMap<String, String>, StoreError> {
        Ok(load_json_if_exists(&self.path).await?.unwrap_or_default())
    }
}

#[async_trait]
impl KeyValueStore for FileKvStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.load().await?.remove(key))
    }

    async fn write_batch(&self, batch: KvBatch) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().await;
        let mut map = self.load().await?;
        let count = batch.len();
        apply(&mut map, batch);
        save_json(&self.path, &map).await?;
        debug!(path = %self.path.display(), count, "Wrote key-value batch");
        Ok(())
    }
}
