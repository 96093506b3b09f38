//! Persistent key/value storage for the session flag.
//!
//! The dashboard keeps exactly one piece of mutable state: whether the current
//! user has logged in. It lives behind [`SessionStore`] so the gate can run
//! against an in-memory double in tests and a JSON file on disk in the CLI,
//! the same way a browser keeps it in local storage.

use std::{
    collections::BTreeMap,
    fs, io,
    path::{Path, PathBuf},
    sync::{Mutex, PoisonError},
};
use thiserror::Error;
use tracing::warn;

/// Key under which the authentication flag is stored
pub const SESSION_KEY: &str = "isAuthenticated";

/// The only value that counts as authenticated
pub const AUTHENTICATED: &str = "true";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to write session store {path}: {source}")]
    Write { path: PathBuf, source: io::Error },
    #[error("failed to encode session store: {0}")]
    Encode(#[from] serde_json::Error),
}

/// String key/value storage with local-storage semantics
///
/// Reads never fail: an unreadable backend behaves like an empty one.
/// Writes report failures so callers can tell the user their login did not stick.
pub trait SessionStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
    /// Removing an absent key is a no-op.
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

/// Process-lifetime store, mostly for tests
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<BTreeMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.remove(key);
        Ok(())
    }
}

/// Store backed by a flat JSON object on disk
///
/// Every operation re-reads the file, so two processes sharing a state file
/// see each other's logins and logouts.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    // Serializes read-modify-write cycles within this process
    lock: Mutex<()>,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> BTreeMap<String, String> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return BTreeMap::new(),
            Err(e) => {
                warn!("Cannot read session store {}: {}", self.path.display(), e);
                return BTreeMap::new();
            }
        };
        serde_json::from_str(&raw).unwrap_or_else(|e| {
            warn!("Ignoring corrupt session store {}: {}", self.path.display(), e);
            BTreeMap::new()
        })
    }

    fn save(&self, entries: &BTreeMap<String, String>) -> Result<(), StoreError> {
        let write_err = |source| StoreError::Write {
            path: self.path.clone(),
            source,
        };
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(write_err)?;
        }
        let encoded = serde_json::to_string_pretty(entries)?;
        fs::write(&self.path, encoded).map_err(write_err)
    }
}

impl SessionStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        self.load().remove(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut entries = self.load();
        entries.insert(key.to_string(), value.to_string());
        self.save(&entries)
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut entries = self.load();
        if entries.remove(key).is_none() && !self.path.exists() {
            return Ok(());
        }
        self.save(&entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nanoid::nanoid;

    fn scratch_file() -> PathBuf {
        std::env::temp_dir()
            .join(format!("voc-dash-store-{}", nanoid!(8)))
            .join("session.json")
    }

    #[test]
    fn test_memory_store_roundtrip() {
        let store = MemoryStore::new();
        assert_eq!(store.get(SESSION_KEY), None);

        store.set(SESSION_KEY, AUTHENTICATED).unwrap();
        assert_eq!(store.get(SESSION_KEY).as_deref(), Some("true"));

        store.remove(SESSION_KEY).unwrap();
        assert_eq!(store.get(SESSION_KEY), None);
    }

    #[test]
    fn test_memory_store_remove_absent_is_noop() {
        let store = MemoryStore::new();
        store.remove("missing").unwrap();
        store.remove("missing").unwrap();
        assert_eq!(store.get("missing"), None);
    }

    #[test]
    fn test_file_store_persists_across_instances() {
        let path = scratch_file();

        FileStore::new(&path).set(SESSION_KEY, AUTHENTICATED).unwrap();
        let reopened = FileStore::new(&path);
        assert_eq!(reopened.get(SESSION_KEY).as_deref(), Some("true"));

        reopened.remove(SESSION_KEY).unwrap();
        assert_eq!(FileStore::new(&path).get(SESSION_KEY), None);

        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_file_store_missing_file_reads_empty() {
        let store = FileStore::new(scratch_file());
        assert_eq!(store.get(SESSION_KEY), None);
        // Removing from a store that was never written must not create it
        store.remove(SESSION_KEY).unwrap();
        assert!(!store.path().exists());
    }

    #[test]
    fn test_file_store_corrupt_file_reads_empty() {
        let path = scratch_file();
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "not json").unwrap();

        let store = FileStore::new(&path);
        assert_eq!(store.get(SESSION_KEY), None);

        // A write replaces the corrupt contents
        store.set(SESSION_KEY, AUTHENTICATED).unwrap();
        assert_eq!(store.get(SESSION_KEY).as_deref(), Some("true"));

        let _ = fs::remove_dir_all(path.parent().unwrap());
    }
}
