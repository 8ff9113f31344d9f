//! User preference persistence for wisteria.
//!
//! Theme choices survive restarts via [`FileStorage`] when the platform
//! config directory is usable, and degrade to session-only memory when it
//! is not. Saving never fails from the caller's point of view; the
//! [`SaveOutcome`] says how durable the result is.

mod storage;
mod store;

pub use storage::{FileStorage, MemoryStorage, StorageBackend, StorageError};
pub use store::{PreferenceStore, SaveOutcome, DEFAULT_PREFERENCE_KEY, THEME_KEY_MARKER};

/// Maximum accepted length for a stored theme id, exclusive.
pub const MAX_PREFERENCE_ID_LEN: usize = 50;

/// Whether `id` is a plausible theme identifier worth persisting or
/// trusting after a load. Accepts lowercase ASCII letters, digits, and
/// hyphens, shorter than [`MAX_PREFERENCE_ID_LEN`].
pub fn validate_theme_preference(id: &str) -> bool {
    !id.is_empty()
        && id.len() < MAX_PREFERENCE_ID_LEN
        && id
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}
