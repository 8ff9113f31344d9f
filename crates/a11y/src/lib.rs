//! WCAG theme accessibility validation for wisteria.
//!
//! Judges a [`ColorTheme`](wisteria_theme::ColorTheme) against WCAG 2.1:
//! every shipped foreground/background pairing is measured, partitioned
//! into violations/warnings/passes, and combined with focus-ring and
//! interactive-differentiation checks into one cached report. The caches
//! live in an explicit [`ThemeCaches`] registry rather than module
//! globals, so tests get isolation by constructing a fresh one.

mod caches;
mod checker;
mod report;

pub use caches::{
    CacheSizes, ThemeCaches, ACCESSIBILITY_CACHE_CAPACITY, ACCESSIBILITY_CACHE_MAX_AGE,
    CONTRAST_CACHE_CAPACITY, CONTRAST_CACHE_MAX_AGE, CSS_VARIABLES_CACHE_CAPACITY,
    CSS_VARIABLES_CACHE_MAX_AGE, FOCUS_STYLE_CACHE_CAPACITY, FOCUS_STYLE_CACHE_MAX_AGE,
    THEME_CACHE_CAPACITY, THEME_CACHE_MAX_AGE,
};
pub use checker::{AccessibilityChecker, DIFFERENTIATION_MIN_RATIO, FOCUS_VISIBLE_MIN_RATIO};
pub use report::{suggestions, summary, ContrastResult, ThemeAccessibilityResult};
