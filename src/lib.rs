//! Theme and accessibility core for the Wisteria wishlist app.
//!
//! This facade wires the member crates together into one [`ThemeService`]:
//! a built-in theme registry, WCAG 2.1 validation with bounded caching of
//! everything derived from a theme, and a preference store that degrades
//! gracefully when durable storage misbehaves.
//!
//! ```no_run
//! use wisteria::{ThemeService, Logger, LogLevel};
//!
//! let mut service = ThemeService::new(Logger::new(200, LogLevel::Info));
//! service.select_theme("dark");
//! let theme = service.preferred_theme();
//! let report = service.accessibility_report(&theme.id);
//! ```

use std::collections::BTreeMap;
use std::sync::Arc;

pub use wisteria_a11y::{
    suggestions, summary, AccessibilityChecker, CacheSizes, ContrastResult, ThemeAccessibilityResult,
    ThemeCaches,
};
pub use wisteria_cache::BoundedCache;
pub use wisteria_color::{
    contrast_ratio, meets_wcag_aa, meets_wcag_aaa, relative_luminance, ColorError, AAA_LARGE,
    AAA_NORMAL, AA_LARGE, AA_NORMAL,
};
pub use wisteria_logger::{LogEntry, LogLevel, Logger};
pub use wisteria_prefs::{
    validate_theme_preference, FileStorage, MemoryStorage, PreferenceStore, SaveOutcome,
    StorageBackend, StorageError,
};
pub use wisteria_theme::{
    all_theme_ids, all_themes, default_theme, get_by_id, ColorTheme, ThemeColors,
};

/// One-stop theme subsystem: registry, accessibility validation, derived
/// CSS, and preference persistence behind a single handle.
///
/// Selecting an unknown or malformed theme id is rejected up front, and a
/// stored preference that no longer resolves falls back to the default
/// theme rather than erroring.
pub struct ThemeService<B: StorageBackend = FileStorage> {
    caches: Arc<ThemeCaches>,
    checker: AccessibilityChecker,
    prefs: PreferenceStore<B>,
    logger: Logger,
}

impl ThemeService<FileStorage> {
    /// Service with preferences stored in the platform config directory.
    pub fn new(logger: Logger) -> Self {
        Self::with_store(PreferenceStore::open(logger.clone()), logger)
    }
}

impl<B: StorageBackend> ThemeService<B> {
    pub fn with_store(prefs: PreferenceStore<B>, logger: Logger) -> Self {
        let caches = Arc::new(ThemeCaches::new());
        let checker = AccessibilityChecker::new(Arc::clone(&caches), logger.clone());
        Self {
            caches,
            checker,
            prefs,
            logger,
        }
    }

    /// Persist `id` as the preferred theme. Returns false when the id is
    /// not a valid identifier or names no registered theme.
    pub fn select_theme(&mut self, id: &str) -> bool {
        if !validate_theme_preference(id) {
            self.logger
                .warn(format!("rejecting malformed theme id '{id}'"));
            return false;
        }
        if self.caches.theme(id).is_none() {
            self.logger.warn(format!("unknown theme id '{id}'"));
            return false;
        }
        let outcome = self.prefs.save(id);
        if let Some(message) = &outcome.message {
            self.logger.info(format!("theme '{id}' saved: {message}"));
        }
        outcome.success
    }

    /// The theme to render with right now.
    ///
    /// Resolves the stored preference; a missing, malformed, or stale id
    /// yields the default theme.
    pub fn preferred_theme(&self) -> ColorTheme {
        if let Some(id) = self.prefs.load() {
            if validate_theme_preference(&id) {
                if let Some(theme) = self.caches.theme(&id) {
                    return theme;
                }
                self.logger
                    .warn(format!("stored theme '{id}' is gone; using default"));
            } else {
                self.logger
                    .warn(format!("stored theme id '{id}' is malformed; using default"));
            }
        }
        default_theme().clone()
    }

    /// Forget the stored preference; subsequent loads yield the default.
    pub fn clear_preference(&mut self) -> bool {
        self.prefs.clear()
    }

    /// Cached WCAG compliance report for a registered theme.
    pub fn accessibility_report(&self, id: &str) -> Option<Arc<ThemeAccessibilityResult>> {
        let theme = self.caches.theme(id)?;
        Some(self.checker.validate_theme(&theme))
    }

    /// Cached CSS custom-property map for a registered theme.
    pub fn theme_css_variables(&self, id: &str) -> Option<Arc<BTreeMap<String, String>>> {
        let theme = self.caches.theme(id)?;
        Some(self.caches.css_variables(&theme))
    }

    /// Cached focus-ring style declaration for a registered theme.
    pub fn focus_ring_style(&self, id: &str) -> Option<String> {
        let theme = self.caches.theme(id)?;
        Some(self.caches.focus_ring_style(&theme))
    }

    pub fn checker(&self) -> &AccessibilityChecker {
        &self.checker
    }

    pub fn caches(&self) -> &Arc<ThemeCaches> {
        &self.caches
    }

    pub fn logger(&self) -> &Logger {
        &self.logger
    }
}
