//! Durable storage backends.
//!
//! The preference store talks to durable storage through [`StorageBackend`]
//! so the fallback chain can be exercised against failing doubles in tests.
//! The real backend keeps one file per key under the app's config
//! directory; storage may be absent, unwritable, or full, and every one of
//! those conditions is a recoverable [`StorageError`], never a panic.

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use thiserror::Error;

/// Why a durable-storage operation failed.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The medium is full; the caller may free space and retry.
    #[error("storage quota exceeded")]
    QuotaExceeded,
    /// Storage cannot be used at all (missing directory, no permission).
    #[error("storage unavailable: {0}")]
    Unavailable(String),
    /// Any other I/O failure.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// String key/value storage, durable across sessions.
pub trait StorageBackend {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
    /// All keys currently stored. Used by the quota-recovery pass.
    fn keys(&self) -> Result<Vec<String>, StorageError>;
}

/// File-per-key storage rooted in the user's config directory.
///
/// Follows the platform convention via `dirs` (`~/.config/wisteria` on
/// Linux). A machine with no resolvable config directory behaves like
/// storage that is entirely absent: every operation reports
/// [`StorageError::Unavailable`].
#[derive(Debug, Clone)]
pub struct FileStorage {
    root: Option<PathBuf>,
}

impl FileStorage {
    const APP_DIR: &'static str = "wisteria";

    pub fn new() -> Self {
        Self {
            root: dirs::config_dir().map(|p| p.join(Self::APP_DIR)),
        }
    }

    /// Storage rooted at an explicit directory. Tests use this with a
    /// temporary directory.
    pub fn with_root(root: PathBuf) -> Self {
        Self { root: Some(root) }
    }

    fn root(&self) -> Result<&PathBuf, StorageError> {
        self.root
            .as_ref()
            .ok_or_else(|| StorageError::Unavailable("no config directory".to_string()))
    }

    fn map_io(e: std::io::Error) -> StorageError {
        match e.kind() {
            ErrorKind::StorageFull | ErrorKind::QuotaExceeded => StorageError::QuotaExceeded,
            ErrorKind::PermissionDenied => StorageError::Unavailable(e.to_string()),
            _ => StorageError::Io(e),
        }
    }
}

impl Default for FileStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl StorageBackend for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.root()?.join(key);
        match fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(Self::map_io(e)),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let root = self.root()?.clone();
        fs::create_dir_all(&root).map_err(Self::map_io)?;
        fs::write(root.join(key), value).map_err(Self::map_io)
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        let path = self.root()?.join(key);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(Self::map_io(e)),
        }
    }

    fn keys(&self) -> Result<Vec<String>, StorageError> {
        let root = self.root()?;
        let entries = match fs::read_dir(root) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(Self::map_io(e)),
        };
        let mut keys = Vec::new();
        for entry in entries {
            let entry = entry.map_err(Self::map_io)?;
            if entry.file_type().map_err(Self::map_io)?.is_file() {
                keys.push(entry.file_name().to_string_lossy().into_owned());
            }
        }
        Ok(keys)
    }
}

/// Plain in-process storage. Never fails; useful as a session-only backend
/// and as a well-behaved test double.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    map: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StorageBackend for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.map.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.map.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.map.remove(key);
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>, StorageError> {
        Ok(self.map.keys().cloned().collect())
    }
}
