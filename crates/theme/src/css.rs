//! Derivations of presentation strings from a theme.
//!
//! These are pure builders; the UI reads them through the cached wrappers
//! in `wisteria-a11y` so the maps are not rebuilt on every render.

use std::collections::BTreeMap;

use crate::ColorTheme;

/// Build the CSS custom-property map for a theme.
///
/// Keys follow the app stylesheet's `--color-*` / `--shadow-*` convention.
pub fn css_variables(theme: &ColorTheme) -> BTreeMap<String, String> {
    let c = &theme.colors;
    let mut vars = BTreeMap::new();
    let entries = [
        ("--color-primary", &c.primary),
        ("--color-secondary", &c.secondary),
        ("--color-accent", &c.accent),
        ("--color-background", &c.background),
        ("--color-surface", &c.surface),
        ("--color-border", &c.border),
        ("--color-success", &c.success),
        ("--color-warning", &c.warning),
        ("--color-error", &c.error),
        ("--color-info", &c.info),
        ("--color-text-primary", &c.text.primary),
        ("--color-text-secondary", &c.text.secondary),
        ("--color-text-muted", &c.text.muted),
        ("--shadow-small", &theme.shadows.small),
        ("--shadow-medium", &theme.shadows.medium),
        ("--shadow-large", &theme.shadows.large),
    ];
    for (name, value) in entries {
        vars.insert(name.to_string(), value.clone());
    }
    vars
}

/// Build the focus-ring style string for a theme.
///
/// The ring uses the primary color; whether that ring is actually visible
/// against the page background is judged by the accessibility validator.
pub fn focus_ring_style(theme: &ColorTheme) -> String {
    format!(
        "outline: 2px solid {}; outline-offset: 2px;",
        theme.colors.primary
    )
}
