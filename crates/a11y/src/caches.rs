//! Process-wide caches for derived theme data.
//!
//! One typed [`BoundedCache`] per derived-data kind, held behind a single
//! [`ThemeCaches`] registry that is constructed once at startup and passed
//! by reference into whatever needs it. Tests build a fresh registry each
//! for isolation; nothing here is a module-level global.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use wisteria_cache::BoundedCache;
use wisteria_theme::{self as themes, ColorTheme};

use crate::report::ThemeAccessibilityResult;

/// Theme-object cache policy.
pub const THEME_CACHE_CAPACITY: usize = 20;
pub const THEME_CACHE_MAX_AGE: Duration = Duration::from_secs(10 * 60);

/// Accessibility-report cache policy.
pub const ACCESSIBILITY_CACHE_CAPACITY: usize = 50;
pub const ACCESSIBILITY_CACHE_MAX_AGE: Duration = Duration::from_secs(5 * 60);

/// CSS-variable-map cache policy.
pub const CSS_VARIABLES_CACHE_CAPACITY: usize = 20;
pub const CSS_VARIABLES_CACHE_MAX_AGE: Duration = Duration::from_secs(10 * 60);

/// Focus-style cache policy.
pub const FOCUS_STYLE_CACHE_CAPACITY: usize = 20;
pub const FOCUS_STYLE_CACHE_MAX_AGE: Duration = Duration::from_secs(10 * 60);

/// Contrast-ratio memo policy.
pub const CONTRAST_CACHE_CAPACITY: usize = 100;
pub const CONTRAST_CACHE_MAX_AGE: Duration = Duration::from_secs(10 * 60);

/// Entry counts per cache, for debugging and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheSizes {
    pub themes: usize,
    pub contrast: usize,
    pub accessibility: usize,
    pub css_variables: usize,
    pub focus_styles: usize,
}

/// Registry of every derived-data cache.
///
/// Report and CSS-map values are held as `Arc`s, so a cache hit hands back
/// the identical object that the original computation produced.
#[derive(Debug)]
pub struct ThemeCaches {
    themes: Mutex<BoundedCache<String, ColorTheme>>,
    /// Keyed by the ordered (foreground, background) pair; swapping the
    /// arguments is a deliberate cache miss even though the ratio is
    /// symmetric, matching the validator's historical call pattern.
    contrast: Mutex<BoundedCache<(String, String), f64>>,
    accessibility: Mutex<BoundedCache<String, Arc<ThemeAccessibilityResult>>>,
    css_variables: Mutex<BoundedCache<String, Arc<BTreeMap<String, String>>>>,
    focus_styles: Mutex<BoundedCache<String, String>>,
}

impl ThemeCaches {
    pub fn new() -> Self {
        Self {
            themes: Mutex::new(BoundedCache::new(THEME_CACHE_CAPACITY, THEME_CACHE_MAX_AGE)),
            contrast: Mutex::new(BoundedCache::new(
                CONTRAST_CACHE_CAPACITY,
                CONTRAST_CACHE_MAX_AGE,
            )),
            accessibility: Mutex::new(BoundedCache::new(
                ACCESSIBILITY_CACHE_CAPACITY,
                ACCESSIBILITY_CACHE_MAX_AGE,
            )),
            css_variables: Mutex::new(BoundedCache::new(
                CSS_VARIABLES_CACHE_CAPACITY,
                CSS_VARIABLES_CACHE_MAX_AGE,
            )),
            focus_styles: Mutex::new(BoundedCache::new(
                FOCUS_STYLE_CACHE_CAPACITY,
                FOCUS_STYLE_CACHE_MAX_AGE,
            )),
        }
    }

    /// Registry lookup memoized through the theme-object cache.
    pub fn theme(&self, id: &str) -> Option<ColorTheme> {
        if let Ok(mut cache) = self.themes.lock() {
            if let Some(theme) = cache.get(&id.to_string()) {
                return Some(theme);
            }
        }
        let theme = themes::get_by_id(id)?.clone();
        if let Ok(mut cache) = self.themes.lock() {
            cache.set(id.to_string(), theme.clone());
        }
        Some(theme)
    }

    /// CSS variable map for a theme, built once per cache lifetime.
    pub fn css_variables(&self, theme: &ColorTheme) -> Arc<BTreeMap<String, String>> {
        if let Ok(mut cache) = self.css_variables.lock() {
            if let Some(vars) = cache.get(&theme.id) {
                return vars;
            }
        }
        let vars = Arc::new(themes::css_variables(theme));
        if let Ok(mut cache) = self.css_variables.lock() {
            cache.set(theme.id.clone(), vars.clone());
        }
        vars
    }

    /// Focus-ring style string for a theme.
    pub fn focus_ring_style(&self, theme: &ColorTheme) -> String {
        if let Ok(mut cache) = self.focus_styles.lock() {
            if let Some(style) = cache.get(&theme.id) {
                return style;
            }
        }
        let style = themes::focus_ring_style(theme);
        if let Ok(mut cache) = self.focus_styles.lock() {
            cache.set(theme.id.clone(), style.clone());
        }
        style
    }

    pub(crate) fn cached_contrast(&self, fg: &str, bg: &str) -> Option<f64> {
        let key = (fg.to_string(), bg.to_string());
        self.contrast.lock().ok()?.get(&key)
    }

    pub(crate) fn store_contrast(&self, fg: &str, bg: &str, ratio: f64) {
        if let Ok(mut cache) = self.contrast.lock() {
            cache.set((fg.to_string(), bg.to_string()), ratio);
        }
    }

    pub(crate) fn cached_report(&self, theme_id: &str) -> Option<Arc<ThemeAccessibilityResult>> {
        self.accessibility.lock().ok()?.get(&theme_id.to_string())
    }

    pub(crate) fn store_report(&self, theme_id: String, report: Arc<ThemeAccessibilityResult>) {
        if let Ok(mut cache) = self.accessibility.lock() {
            cache.set(theme_id, report);
        }
    }

    /// Empty every cache.
    pub fn clear_all(&self) {
        if let Ok(mut c) = self.themes.lock() {
            c.clear();
        }
        if let Ok(mut c) = self.contrast.lock() {
            c.clear();
        }
        if let Ok(mut c) = self.accessibility.lock() {
            c.clear();
        }
        if let Ok(mut c) = self.css_variables.lock() {
            c.clear();
        }
        if let Ok(mut c) = self.focus_styles.lock() {
            c.clear();
        }
    }

    /// Proactively drop expired entries from every cache.
    ///
    /// Purely an optimization; expiry is always also checked lazily.
    pub fn evict_expired(&self) {
        if let Ok(mut c) = self.themes.lock() {
            c.evict_expired();
        }
        if let Ok(mut c) = self.contrast.lock() {
            c.evict_expired();
        }
        if let Ok(mut c) = self.accessibility.lock() {
            c.evict_expired();
        }
        if let Ok(mut c) = self.css_variables.lock() {
            c.evict_expired();
        }
        if let Ok(mut c) = self.focus_styles.lock() {
            c.evict_expired();
        }
    }

    /// Current entry counts.
    pub fn sizes(&self) -> CacheSizes {
        CacheSizes {
            themes: self.themes.lock().map(|c| c.len()).unwrap_or(0),
            contrast: self.contrast.lock().map(|c| c.len()).unwrap_or(0),
            accessibility: self.accessibility.lock().map(|c| c.len()).unwrap_or(0),
            css_variables: self.css_variables.lock().map(|c| c.len()).unwrap_or(0),
            focus_styles: self.focus_styles.lock().map(|c| c.len()).unwrap_or(0),
        }
    }
}

impl Default for ThemeCaches {
    fn default() -> Self {
        Self::new()
    }
}
