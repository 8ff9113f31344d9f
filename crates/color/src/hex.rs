//! Hex color string parsing.
//!
//! This is the single validation gate for malformed colors in the whole
//! subsystem: everything downstream (luminance, contrast, the theme
//! validator) funnels through [`parse_hex`].

use crate::Rgb;

/// Parse a hex color string into RGB components.
///
/// Accepts an optional leading `#`, the 3-digit shorthand (each digit
/// doubled, so `#abc` means `#aabbcc`) and the 6-digit form. Returns `None`
/// for anything else: wrong length, non-hex characters, empty input.
pub fn parse_hex(hex: &str) -> Option<Rgb> {
    let digits = hex.strip_prefix('#').unwrap_or(hex);

    let expanded: String = match digits.len() {
        3 => digits.chars().flat_map(|c| [c, c]).collect(),
        6 => digits.to_string(),
        _ => return None,
    };

    if !expanded.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }

    let r = u8::from_str_radix(&expanded[0..2], 16).ok()?;
    let g = u8::from_str_radix(&expanded[2..4], 16).ok()?;
    let b = u8::from_str_radix(&expanded[4..6], 16).ok()?;
    Some(Rgb { r, g, b })
}
