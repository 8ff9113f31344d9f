//! Theme data model.

use serde::Deserialize;

/// A complete color theme.
///
/// Themes are created once by the registry from static data and never
/// mutated at runtime. Only the `id` is ever persisted; it doubles as the
/// cache key for every piece of derived data (accessibility reports, CSS
/// variable maps, focus styles).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ColorTheme {
    /// Short identifier, unique across the registry (`earth`, `dark`, ...).
    pub id: String,
    /// Human-readable name shown in the theme picker.
    pub display_name: String,
    /// One-line description shown next to the name.
    pub description: String,
    /// Named hex colors.
    pub colors: ThemeColors,
    /// CSS shadow definitions; opaque strings, never validated here.
    pub shadows: Shadows,
}

/// The fixed set of named colors every theme provides.
///
/// Every value is expected to be a strict 6-digit `#RRGGBB` string. Nothing
/// here enforces that: hex parsing in `wisteria-color` is the single
/// validation gate, and a malformed value degrades that theme's
/// accessibility report rather than failing catalog construction.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ThemeColors {
    // === Interactive (3 colors) ===
    /// Brand color; buttons, links, focus rings
    pub primary: String,
    /// Secondary actions
    pub secondary: String,
    /// Highlights and calls to action
    pub accent: String,

    // === Surfaces (3 colors) ===
    /// Page background
    pub background: String,
    /// Cards, modals, raised panels
    pub surface: String,
    /// Dividers and input outlines
    pub border: String,

    // === Status (4 colors) ===
    pub success: String,
    pub warning: String,
    pub error: String,
    pub info: String,

    /// Text colors by emphasis
    pub text: TextColors,
}

/// Text colors grouped by emphasis level.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TextColors {
    /// Body copy and headings
    pub primary: String,
    /// Supporting copy
    pub secondary: String,
    /// Placeholders, captions, timestamps
    pub muted: String,
}

/// Elevation shadow definitions.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Shadows {
    pub small: String,
    pub medium: String,
    pub large: String,
}
