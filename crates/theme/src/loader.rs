//! Theme parsing from TOML.

use anyhow::{Context, Result};

use crate::{ColorTheme, Shadows, TextColors, ThemeColors};

/// Parse a theme from TOML content.
pub fn load_theme_from_str(content: &str) -> Result<ColorTheme> {
    toml::from_str(content).context("failed to parse theme definition")
}

/// Hardcoded fallback theme in case a built-in definition fails to parse.
///
/// Deliberately monochrome so a broken catalog is obvious at a glance while
/// keeping every screen legible.
pub(crate) fn fallback_theme(id: &str) -> ColorTheme {
    ColorTheme {
        id: id.to_string(),
        display_name: id.to_string(),
        description: "Fallback theme".to_string(),
        colors: ThemeColors {
            primary: "#333333".to_string(),
            secondary: "#555555".to_string(),
            accent: "#777777".to_string(),
            background: "#FFFFFF".to_string(),
            surface: "#F5F5F5".to_string(),
            border: "#444444".to_string(),
            success: "#2E7D32".to_string(),
            warning: "#8A6D1F".to_string(),
            error: "#B00020".to_string(),
            info: "#1A5276".to_string(),
            text: TextColors {
                primary: "#111111".to_string(),
                secondary: "#333333".to_string(),
                muted: "#595959".to_string(),
            },
        },
        shadows: Shadows {
            small: "none".to_string(),
            medium: "none".to_string(),
            large: "none".to_string(),
        },
    }
}
