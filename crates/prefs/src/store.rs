//! The preference store and its fallback chain.

use std::collections::HashMap;

use wisteria_logger::Logger;

use crate::storage::{FileStorage, StorageBackend, StorageError};

/// Storage key used when the caller does not supply one.
pub const DEFAULT_PREFERENCE_KEY: &str = "wisteria-theme-preference";

/// Substring identifying theme-related keys; the quota-recovery pass only
/// evicts keys carrying this marker so unrelated preferences survive.
pub const THEME_KEY_MARKER: &str = "wisteria-theme";

const AVAILABILITY_PROBE_KEY: &str = "wisteria-storage-probe";

/// What happened to a `save`.
///
/// `success` is about the user-visible contract ("the preference is
/// remembered for this session"), not durability: a save that lands in the
/// in-memory fallback still succeeds, with `durable == false` and a message
/// saying so.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveOutcome {
    pub success: bool,
    pub durable: bool,
    pub message: Option<String>,
}

/// Persists single string preferences per key, degrading from durable
/// storage to an in-process map when the durable side is absent or full.
///
/// No storage failure ever escapes to the caller; the worst case is a
/// preference that survives only until the process exits, plus a logged
/// warning.
#[derive(Debug)]
pub struct PreferenceStore<B: StorageBackend> {
    backend: B,
    memory: HashMap<String, String>,
    logger: Logger,
}

impl PreferenceStore<FileStorage> {
    /// Store backed by the platform config directory.
    pub fn open(logger: Logger) -> Self {
        Self::with_backend(FileStorage::new(), logger)
    }
}

impl<B: StorageBackend> PreferenceStore<B> {
    pub fn with_backend(backend: B, logger: Logger) -> Self {
        Self {
            backend,
            memory: HashMap::new(),
            logger,
        }
    }

    /// Probe durable storage with a throwaway write-and-remove.
    pub fn is_available(&mut self) -> bool {
        self.backend.set(AVAILABILITY_PROBE_KEY, "probe").is_ok()
            && self.backend.remove(AVAILABILITY_PROBE_KEY).is_ok()
    }

    /// Save under the default key.
    pub fn save(&mut self, id: &str) -> SaveOutcome {
        self.save_with_key(id, DEFAULT_PREFERENCE_KEY)
    }

    /// Save `id` under `key`, falling back on storage trouble.
    ///
    /// Quota exhaustion gets one recovery attempt: other theme-namespaced
    /// keys are evicted and the write retried before giving up on
    /// durability. Any other storage failure goes straight to the
    /// in-memory fallback.
    pub fn save_with_key(&mut self, id: &str, key: &str) -> SaveOutcome {
        if id.is_empty() {
            return SaveOutcome {
                success: false,
                durable: false,
                message: Some("theme preference id must be a non-empty string".to_string()),
            };
        }

        match self.backend.set(key, id) {
            Ok(()) => SaveOutcome {
                success: true,
                durable: true,
                message: None,
            },
            Err(StorageError::QuotaExceeded) => {
                self.logger.warn(format!(
                    "storage quota exceeded saving '{key}'; evicting other theme keys"
                ));
                self.evict_theme_keys(key);
                match self.backend.set(key, id) {
                    Ok(()) => SaveOutcome {
                        success: true,
                        durable: true,
                        message: Some("saved after clearing older theme keys".to_string()),
                    },
                    Err(e) => self.fall_back_to_memory(key, id, &e),
                }
            }
            Err(e) => self.fall_back_to_memory(key, id, &e),
        }
    }

    /// Load from the default key.
    pub fn load(&self) -> Option<String> {
        self.load_with_key(DEFAULT_PREFERENCE_KEY)
    }

    /// Load the value under `key`; absence of a preference is `None`, never
    /// an error. Falls through to the in-memory store when the durable read
    /// fails or holds nothing.
    pub fn load_with_key(&self, key: &str) -> Option<String> {
        match self.backend.get(key) {
            Ok(Some(value)) => Some(value),
            Ok(None) => self.memory.get(key).cloned(),
            Err(e) => {
                self.logger
                    .warn(format!("durable read of '{key}' failed: {e}; using memory"));
                self.memory.get(key).cloned()
            }
        }
    }

    /// Clear the default key.
    pub fn clear(&mut self) -> bool {
        self.clear_with_key(DEFAULT_PREFERENCE_KEY)
    }

    /// Best-effort removal from both stores; true if either side removed
    /// something (or the durable removal at least went through).
    pub fn clear_with_key(&mut self, key: &str) -> bool {
        let durable = self.backend.remove(key).is_ok();
        let memory = self.memory.remove(key).is_some();
        durable || memory
    }

    fn evict_theme_keys(&mut self, keep: &str) {
        let keys = match self.backend.keys() {
            Ok(keys) => keys,
            Err(e) => {
                self.logger
                    .warn(format!("cannot list keys for quota recovery: {e}"));
                return;
            }
        };
        for key in keys {
            if key != keep && key.contains(THEME_KEY_MARKER) {
                let _ = self.backend.remove(&key);
            }
        }
    }

    fn fall_back_to_memory(&mut self, key: &str, id: &str, err: &StorageError) -> SaveOutcome {
        self.logger.warn(format!(
            "falling back to in-memory storage for '{key}': {err}"
        ));
        self.memory.insert(key.to_string(), id.to_string());
        SaveOutcome {
            success: true,
            durable: false,
            message: Some("preference kept in memory for this session".to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use wisteria_logger::LogLevel;

    /// Durable storage with scripted failures.
    #[derive(Default)]
    struct FlakyStorage {
        map: HashMap<String, String>,
        /// When set, every `set` under this capacity rule fails with
        /// QuotaExceeded unless the key is already present or space frees
        /// up.
        capacity: Option<usize>,
        /// When true, every operation fails as unavailable.
        offline: bool,
    }

    impl FlakyStorage {
        fn unavailable() -> StorageError {
            StorageError::Unavailable("scripted outage".to_string())
        }
    }

    impl StorageBackend for FlakyStorage {
        fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
            if self.offline {
                return Err(Self::unavailable());
            }
            Ok(self.map.get(key).cloned())
        }

        fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
            if self.offline {
                return Err(Self::unavailable());
            }
            if let Some(capacity) = self.capacity {
                if !self.map.contains_key(key) && self.map.len() >= capacity {
                    return Err(StorageError::QuotaExceeded);
                }
            }
            self.map.insert(key.to_string(), value.to_string());
            Ok(())
        }

        fn remove(&mut self, key: &str) -> Result<(), StorageError> {
            if self.offline {
                return Err(Self::unavailable());
            }
            self.map.remove(key);
            Ok(())
        }

        fn keys(&self) -> Result<Vec<String>, StorageError> {
            if self.offline {
                return Err(Self::unavailable());
            }
            Ok(self.map.keys().cloned().collect())
        }
    }

    fn logger() -> Logger {
        Logger::new(50, LogLevel::Debug)
    }

    #[test]
    fn test_save_load_clear_roundtrip() {
        let mut store = PreferenceStore::with_backend(MemoryStorage::new(), logger());
        let outcome = store.save("dark");
        assert!(outcome.success && outcome.durable);
        assert_eq!(outcome.message, None);
        assert_eq!(store.load(), Some("dark".to_string()));

        assert!(store.clear());
        assert_eq!(store.load(), None);
    }

    #[test]
    fn test_empty_id_is_rejected() {
        let mut store = PreferenceStore::with_backend(MemoryStorage::new(), logger());
        let outcome = store.save("");
        assert!(!outcome.success);
        assert!(outcome.message.unwrap().contains("non-empty"));
        assert_eq!(store.load(), None);
    }

    #[test]
    fn test_last_write_wins() {
        let mut store = PreferenceStore::with_backend(MemoryStorage::new(), logger());
        store.save("dark");
        store.save("ocean");
        assert_eq!(store.load(), Some("ocean".to_string()));
    }

    #[test]
    fn test_independent_keys_do_not_collide() {
        let mut store = PreferenceStore::with_backend(MemoryStorage::new(), logger());
        store.save_with_key("dark", "wisteria-theme-preference");
        store.save_with_key("compact", "wisteria-theme-density");
        assert_eq!(
            store.load_with_key("wisteria-theme-density"),
            Some("compact".to_string())
        );
        assert_eq!(store.load(), Some("dark".to_string()));
    }

    #[test]
    fn test_quota_recovery_evicts_theme_keys_and_retries() {
        let mut backend = FlakyStorage::default();
        backend.set("wisteria-theme-old", "stale").unwrap();
        backend.set("wisteria-theme-draft", "stale").unwrap();
        backend.set("unrelated-pref", "keep-me").unwrap();
        backend.capacity = Some(3);

        let mut store = PreferenceStore::with_backend(backend, logger());
        let outcome = store.save("dark");

        assert!(outcome.success && outcome.durable);
        assert!(outcome.message.unwrap().contains("clearing older theme keys"));
        assert_eq!(store.load(), Some("dark".to_string()));
        // Unrelated keys survive the recovery pass.
        assert_eq!(
            store.load_with_key("unrelated-pref"),
            Some("keep-me".to_string())
        );
        assert_eq!(store.load_with_key("wisteria-theme-old"), None);
    }

    #[test]
    fn test_quota_with_no_reclaimable_keys_falls_back_to_memory() {
        let mut backend = FlakyStorage::default();
        backend.set("unrelated-a", "x").unwrap();
        backend.set("unrelated-b", "y").unwrap();
        backend.capacity = Some(2);

        let log = logger();
        let mut store = PreferenceStore::with_backend(backend, log.clone());
        let outcome = store.save("dark");

        assert!(outcome.success);
        assert!(!outcome.durable);
        assert!(outcome.message.unwrap().contains("memory"));
        // Durable side holds nothing for the key, memory does.
        assert_eq!(store.load(), Some("dark".to_string()));
        assert!(log
            .entries()
            .iter()
            .any(|e| e.message.contains("falling back to in-memory storage")));
    }

    #[test]
    fn test_offline_storage_save_and_load_use_memory() {
        let backend = FlakyStorage {
            offline: true,
            ..FlakyStorage::default()
        };
        let mut store = PreferenceStore::with_backend(backend, logger());

        assert!(!store.is_available());

        let outcome = store.save("dark");
        assert!(outcome.success);
        assert!(!outcome.durable);
        // Durable reads also fail; the memory path serves the value.
        assert_eq!(store.load(), Some("dark".to_string()));
    }

    #[test]
    fn test_clear_reports_memory_only_removal() {
        let backend = FlakyStorage {
            offline: true,
            ..FlakyStorage::default()
        };
        let mut store = PreferenceStore::with_backend(backend, logger());
        store.save("dark");
        assert!(store.clear());
        assert_eq!(store.load(), None);
        // Nothing left anywhere: both sides fail or are empty.
        assert!(!store.clear());
    }

    #[test]
    fn test_is_available_with_working_backend() {
        let mut store = PreferenceStore::with_backend(MemoryStorage::new(), logger());
        assert!(store.is_available());
    }
}
