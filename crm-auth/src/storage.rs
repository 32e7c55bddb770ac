//! Durable key-value storage
//!
//! A persisted slot surviving restarts, used only to remember a login.

use crm_core::{storage_error, CrmResult};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};
use tracing::{debug, info};

/// String-valued key-value store
pub trait KeyValueStore: Send + Sync {
    /// Value stored under `key`, if any
    fn get(&self, key: &str) -> CrmResult<Option<String>>;

    /// Store `value` under `key`, replacing any previous value
    fn set(&self, key: &str, value: &str) -> CrmResult<()>;

    /// Remove `key`; removing an absent key succeeds
    fn remove(&self, key: &str) -> CrmResult<()>;
}

/// One `<key>.json` file per key inside a data directory
#[derive(Debug, Clone)]
pub struct FileKeyValueStore {
    storage_dir: PathBuf,
}

impl FileKeyValueStore {
    /// Create a store rooted at `storage_dir`, creating the directory if needed
    pub fn new<P: AsRef<Path>>(storage_dir: P) -> CrmResult<Self> {
        let storage_dir = storage_dir.as_ref().to_path_buf();

        std::fs::create_dir_all(&storage_dir).map_err(|e| {
            storage_error!(
                format!("Failed to create {}", storage_dir.display()),
                "storage",
                e
            )
        })?;

        info!("Key-value storage initialized at: {}", storage_dir.display());

        Ok(Self { storage_dir })
    }

    pub fn storage_dir(&self) -> &Path {
        &self.storage_dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.storage_dir.join(format!("{}.json", key))
    }
}

impl KeyValueStore for FileKeyValueStore {
    fn get(&self, key: &str) -> CrmResult<Option<String>> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }

        let value = std::fs::read_to_string(&path).map_err(|e| {
            storage_error!(format!("Failed to read {}", path.display()), "storage", e)
        })?;

        debug!("Read key {} from {}", key, path.display());
        Ok(Some(value))
    }

    fn set(&self, key: &str, value: &str) -> CrmResult<()> {
        let path = self.path_for(key);

        std::fs::write(&path, value).map_err(|e| {
            storage_error!(format!("Failed to write {}", path.display()), "storage", e)
        })?;

        debug!("Wrote key {} to {}", key, path.display());
        Ok(())
    }

    fn remove(&self, key: &str) -> CrmResult<()> {
        let path = self.path_for(key);

        if path.exists() {
            std::fs::remove_file(&path).map_err(|e| {
                storage_error!(format!("Failed to delete {}", path.display()), "storage", e)
            })?;
            debug!("Deleted key file: {}", path.display());
        }

        Ok(())
    }
}

/// In-process store; clones share the same map, so a clone outlives a
/// dropped session store the way a file outlives a process
#[derive(Debug, Clone, Default)]
pub struct MemoryKeyValueStore {
    entries: Arc<RwLock<HashMap<String, String>>>,
}

impl MemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock_poisoned() -> crm_core::CrmError {
        storage_error!("memory store lock poisoned", "storage")
    }
}

impl KeyValueStore for MemoryKeyValueStore {
    fn get(&self, key: &str) -> CrmResult<Option<String>> {
        let entries = self.entries.read().map_err(|_| Self::lock_poisoned())?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> CrmResult<()> {
        let mut entries = self.entries.write().map_err(|_| Self::lock_poisoned())?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> CrmResult<()> {
        let mut entries = self.entries.write().map_err(|_| Self::lock_poisoned())?;
        entries.remove(key);
        Ok(())
    }
}
