//! Durable key-value persistence for the conversation list.

use anyhow::{Context, Result};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Key under which the full serialized conversation list is stored.
pub const CONVERSATIONS_KEY: &str = "edugen_conversations";

/// Synchronous string key-value storage.
///
/// The store writes the full conversation list on every mutating operation
/// and reads it once at initialization, so a single `get`/`set` pair is the
/// whole contract.
pub trait StorageBackend: Send {
    /// Read the value stored under `key`, if any.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

/// File-backed storage: one JSON file per key inside a data directory.
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Create the storage, making the data directory if it doesn't exist.
    pub fn new<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = Self::expand_tilde(dir.as_ref())?;

        if !dir.exists() {
            fs::create_dir_all(&dir)
                .with_context(|| format!("Failed to create data directory: {}", dir.display()))?;
        }

        Ok(Self { dir })
    }

    /// Expand ~ to home directory
    fn expand_tilde(path: &Path) -> Result<PathBuf> {
        let path_str = path.to_string_lossy();
        if path_str.starts_with("~/") {
            let home = std::env::var("HOME").context("HOME environment variable not set")?;
            Ok(PathBuf::from(home).join(&path_str[2..]))
        } else if path_str == "~" {
            let home = std::env::var("HOME").context("HOME environment variable not set")?;
            Ok(PathBuf::from(home))
        } else {
            Ok(path.to_path_buf())
        }
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl StorageBackend for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.key_path(key);
        if !path.exists() {
            return Ok(None);
        }
        let value = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Ok(Some(value))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let path = self.key_path(key);
        fs::write(&path, value).with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(())
    }
}

/// In-memory storage. Clones share the same underlying map, which lets tests
/// reload a store from the state a previous instance wrote.
#[derive(Clone, Default)]
pub struct MemoryStorage {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StorageBackend for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let entries = self
            .entries
            .lock()
            .map_err(|_| anyhow::anyhow!("storage mutex poisoned"))?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| anyhow::anyhow!("storage mutex poisoned"))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
