//! Theme catalog for wisteria.
//!
//! A static registry of [`ColorTheme`]s defined in TOML and embedded at
//! compile time. Themes are parsed lazily, once, and handed out as
//! `'static` references; they are read-only for the lifetime of the
//! process. Only a theme's `id` is ever persisted.

mod colors;
mod css;
mod loader;

pub use colors::{ColorTheme, Shadows, TextColors, ThemeColors};
pub use css::{css_variables, focus_ring_style};
pub use loader::load_theme_from_str;

use std::sync::OnceLock;

// Embed theme files at compile time
const THEME_EARTH_TOML: &str = include_str!("../themes/earth.toml");
const THEME_DARK_TOML: &str = include_str!("../themes/dark.toml");
const THEME_HIGH_CONTRAST_TOML: &str = include_str!("../themes/high-contrast.toml");
const THEME_OCEAN_TOML: &str = include_str!("../themes/ocean.toml");

// Static theme instances
static THEME_EARTH: OnceLock<ColorTheme> = OnceLock::new();
static THEME_DARK: OnceLock<ColorTheme> = OnceLock::new();
static THEME_HIGH_CONTRAST: OnceLock<ColorTheme> = OnceLock::new();
static THEME_OCEAN: OnceLock<ColorTheme> = OnceLock::new();

/// Parse an embedded theme, falling back to a monochrome stand-in if the
/// definition is malformed.
fn load_builtin(content: &str, id: &str) -> ColorTheme {
    match loader::load_theme_from_str(content) {
        Ok(theme) => theme,
        Err(e) => {
            eprintln!("Failed to parse built-in theme '{id}': {e}. Using fallback theme.");
            loader::fallback_theme(id)
        }
    }
}

fn earth_theme() -> &'static ColorTheme {
    THEME_EARTH.get_or_init(|| load_builtin(THEME_EARTH_TOML, "earth"))
}

fn dark_theme() -> &'static ColorTheme {
    THEME_DARK.get_or_init(|| load_builtin(THEME_DARK_TOML, "dark"))
}

fn high_contrast_theme() -> &'static ColorTheme {
    THEME_HIGH_CONTRAST.get_or_init(|| load_builtin(THEME_HIGH_CONTRAST_TOML, "high-contrast"))
}

fn ocean_theme() -> &'static ColorTheme {
    THEME_OCEAN.get_or_init(|| load_builtin(THEME_OCEAN_TOML, "ocean"))
}

/// Look up a theme by id.
///
/// Unknown ids report absence; callers decide whether that means "fall back
/// to the default" (a stale persisted preference) or an error.
pub fn get_by_id(id: &str) -> Option<&'static ColorTheme> {
    match id {
        "earth" => Some(earth_theme()),
        "dark" => Some(dark_theme()),
        "high-contrast" => Some(high_contrast_theme()),
        "ocean" => Some(ocean_theme()),
        _ => None,
    }
}

/// The theme used when no valid preference is stored.
pub fn default_theme() -> &'static ColorTheme {
    earth_theme()
}

/// All built-in themes, in presentation order.
pub fn all_themes() -> Vec<&'static ColorTheme> {
    vec![
        earth_theme(),
        dark_theme(),
        high_contrast_theme(),
        ocean_theme(),
    ]
}

/// Ids of all built-in themes, in presentation order.
pub fn all_theme_ids() -> &'static [&'static str] {
    &["earth", "dark", "high-contrast", "ocean"]
}
