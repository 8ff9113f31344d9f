//! WCAG 2.1 colorimetry for wisteria themes.
//!
//! Pure, deterministic color math: hex parsing, relative luminance,
//! contrast ratios and the AA/AAA threshold predicates. No caching happens
//! here; memoization is layered on top by `wisteria-a11y`.
//!
//! Every fallible function returns a `Result` with [`ColorError`]; an
//! invalid color is never silently treated as black, because a luminance of
//! 0 would make broken themes look high-contrast instead of broken.

mod hex;

pub use hex::parse_hex;

use thiserror::Error;

/// WCAG AA minimum contrast ratio for normal text.
pub const AA_NORMAL: f64 = 4.5;
/// WCAG AA minimum contrast ratio for large text.
pub const AA_LARGE: f64 = 3.0;
/// WCAG AAA minimum contrast ratio for normal text.
pub const AAA_NORMAL: f64 = 7.0;
/// WCAG AAA minimum contrast ratio for large text.
pub const AAA_LARGE: f64 = 4.5;

/// 8-bit RGB components of a parsed color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// Color math failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    /// The input was not a 3- or 6-digit hex color.
    #[error("invalid hex color: {0:?}")]
    InvalidHex(String),
}

/// Compute the relative luminance of a hex color per WCAG 2.1.
///
/// Channels are scaled to sRGB fractions, linearized (`c / 12.92` below the
/// 0.03928 knee, `((c + 0.055) / 1.055)^2.4` above it) and combined with the
/// standard weights:
///
/// ```text
/// L = 0.2126 * R + 0.7152 * G + 0.0722 * B
/// ```
///
/// Returns a value in `[0.0, 1.0]`, or [`ColorError::InvalidHex`] when the
/// input does not parse; luminance has no sensible value for a malformed
/// color and callers must branch rather than assume 0.
pub fn relative_luminance(hex: &str) -> Result<f64, ColorError> {
    let rgb = parse_hex(hex).ok_or_else(|| ColorError::InvalidHex(hex.to_string()))?;
    let r = linearize(f64::from(rgb.r) / 255.0);
    let g = linearize(f64::from(rgb.g) / 255.0);
    let b = linearize(f64::from(rgb.b) / 255.0);
    Ok(0.2126 * r + 0.7152 * g + 0.0722 * b)
}

fn linearize(channel: f64) -> f64 {
    if channel <= 0.03928 {
        channel / 12.92
    } else {
        ((channel + 0.055) / 1.055).powf(2.4)
    }
}

/// Compute the WCAG 2.1 contrast ratio between two hex colors.
///
/// Returns a value in `[1.0, 21.0]`; the result is symmetric in its
/// arguments since the lighter luminance always goes in the numerator.
pub fn contrast_ratio(a: &str, b: &str) -> Result<f64, ColorError> {
    let la = relative_luminance(a)?;
    let lb = relative_luminance(b)?;
    let (lighter, darker) = if la >= lb { (la, lb) } else { (lb, la) };
    Ok((lighter + 0.05) / (darker + 0.05))
}

/// Whether `fg` on `bg` meets WCAG AA (4.5:1 normal, 3.0:1 large text).
pub fn meets_wcag_aa(fg: &str, bg: &str, is_large_text: bool) -> Result<bool, ColorError> {
    let threshold = if is_large_text { AA_LARGE } else { AA_NORMAL };
    Ok(contrast_ratio(fg, bg)? >= threshold)
}

/// Whether `fg` on `bg` meets WCAG AAA (7.0:1 normal, 4.5:1 large text).
pub fn meets_wcag_aaa(fg: &str, bg: &str, is_large_text: bool) -> Result<bool, ColorError> {
    let threshold = if is_large_text { AAA_LARGE } else { AAA_NORMAL };
    Ok(contrast_ratio(fg, bg)? >= threshold)
}
