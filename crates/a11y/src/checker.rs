//! Theme accessibility validation.

use std::sync::Arc;

use wisteria_color::{self as color, ColorError, AAA_LARGE, AAA_NORMAL, AA_LARGE, AA_NORMAL};
use wisteria_logger::Logger;
use wisteria_theme::{ColorTheme, ThemeColors};

use crate::caches::ThemeCaches;
use crate::report::{ContrastResult, ThemeAccessibilityResult};

/// Minimum contrast for a primary-colored focus ring to count as visible.
pub const FOCUS_VISIBLE_MIN_RATIO: f64 = 3.0;

/// Minimum pairwise contrast for interactive colors to be distinguishable.
pub const DIFFERENTIATION_MIN_RATIO: f64 = 1.5;

/// Validates themes against WCAG 2.1 AA/AAA.
///
/// Contrast ratios and whole-theme reports are memoized through the
/// injected [`ThemeCaches`]; diagnostics go to the injected [`Logger`].
/// Validation never fails: a theme with malformed hex colors yields a
/// report over fewer evaluated pairs, with one warning per skipped pair.
#[derive(Debug, Clone)]
pub struct AccessibilityChecker {
    caches: Arc<ThemeCaches>,
    logger: Logger,
}

impl AccessibilityChecker {
    pub fn new(caches: Arc<ThemeCaches>, logger: Logger) -> Self {
        Self { caches, logger }
    }

    pub fn caches(&self) -> &Arc<ThemeCaches> {
        &self.caches
    }

    /// Memoized WCAG contrast ratio between two hex colors.
    ///
    /// The memo key is the ordered pair, so swapped arguments recompute
    /// even though the result is the same.
    pub fn contrast_ratio(&self, fg: &str, bg: &str) -> Result<f64, ColorError> {
        if let Some(ratio) = self.caches.cached_contrast(fg, bg) {
            return Ok(ratio);
        }
        let ratio = color::contrast_ratio(fg, bg)?;
        self.caches.store_contrast(fg, bg, ratio);
        Ok(ratio)
    }

    /// Produce (or fetch the cached) compliance report for a theme.
    ///
    /// A cache hit returns the identical `Arc` that the original
    /// computation produced; recomputation only happens after cache
    /// expiry or eviction, since themes never change at runtime.
    pub fn validate_theme(&self, theme: &ColorTheme) -> Arc<ThemeAccessibilityResult> {
        if let Some(report) = self.caches.cached_report(&theme.id) {
            return report;
        }

        let mut violations = Vec::new();
        let mut warnings = Vec::new();
        let mut valid_combinations = Vec::new();

        for (fg, bg, description) in contrast_pairs(&theme.colors) {
            match self.check_pair(&fg, &bg, &description) {
                Ok(result) => {
                    if !result.meets_aa {
                        violations.push(result);
                    } else if !result.meets_aaa {
                        warnings.push(result);
                    } else {
                        valid_combinations.push(result);
                    }
                }
                Err(e) => {
                    // Malformed color: drop this pair, keep the report.
                    self.logger.warn(format!(
                        "theme '{}': skipping contrast pair '{description}': {e}",
                        theme.id
                    ));
                }
            }
        }

        let focus_indicator_visible = self.focus_indicator_visible(theme);
        let interactive_elements_differentiated = self.interactive_elements_differentiated(theme);
        let is_compliant =
            violations.is_empty() && focus_indicator_visible && interactive_elements_differentiated;

        let report = Arc::new(ThemeAccessibilityResult {
            theme_id: theme.id.clone(),
            theme_name: theme.display_name.clone(),
            is_compliant,
            violations,
            warnings,
            valid_combinations,
            focus_indicator_visible,
            interactive_elements_differentiated,
        });
        self.caches.store_report(theme.id.clone(), report.clone());
        report
    }

    fn check_pair(
        &self,
        fg: &str,
        bg: &str,
        description: &str,
    ) -> Result<ContrastResult, ColorError> {
        let ratio = self.contrast_ratio(fg, bg)?;
        Ok(ContrastResult {
            foreground: fg.to_string(),
            background: bg.to_string(),
            contrast_ratio: ratio,
            meets_aa: ratio >= AA_NORMAL,
            meets_aaa: ratio >= AAA_NORMAL,
            meets_aa_large: ratio >= AA_LARGE,
            meets_aaa_large: ratio >= AAA_LARGE,
            description: description.to_string(),
        })
    }

    /// A primary-colored focus ring must reach 3.0:1 against both the page
    /// background and raised surfaces.
    fn focus_indicator_visible(&self, theme: &ColorTheme) -> bool {
        let c = &theme.colors;
        self.ratio_or_warn(&c.primary, &c.background, &theme.id, "focus ring on background")
            .is_some_and(|r| r >= FOCUS_VISIBLE_MIN_RATIO)
            && self
                .ratio_or_warn(&c.primary, &c.surface, &theme.id, "focus ring on surface")
                .is_some_and(|r| r >= FOCUS_VISIBLE_MIN_RATIO)
    }

    /// Primary, secondary and accent must be pairwise distinguishable.
    fn interactive_elements_differentiated(&self, theme: &ColorTheme) -> bool {
        let c = &theme.colors;
        let pairs = [
            (&c.primary, &c.secondary, "primary vs secondary"),
            (&c.primary, &c.accent, "primary vs accent"),
            (&c.secondary, &c.accent, "secondary vs accent"),
        ];
        pairs.iter().all(|(a, b, what)| {
            self.ratio_or_warn(a, b, &theme.id, what)
                .is_some_and(|r| r >= DIFFERENTIATION_MIN_RATIO)
        })
    }

    fn ratio_or_warn(&self, fg: &str, bg: &str, theme_id: &str, what: &str) -> Option<f64> {
        match self.contrast_ratio(fg, bg) {
            Ok(ratio) => Some(ratio),
            Err(e) => {
                self.logger
                    .warn(format!("theme '{theme_id}': cannot check {what}: {e}"));
                None
            }
        }
    }
}

/// The fixed enumeration of foreground/background pairings a theme is
/// judged on: text on both surfaces, button fills under their two candidate
/// label colors, status fills both as text and under labels, and borders.
fn contrast_pairs(c: &ThemeColors) -> Vec<(String, String, String)> {
    let mut pairs = Vec::with_capacity(22);

    // Text legibility on the two surfaces (6 pairs).
    for (emphasis, color) in [
        ("Primary", &c.text.primary),
        ("Secondary", &c.text.secondary),
        ("Muted", &c.text.muted),
    ] {
        pairs.push((
            color.clone(),
            c.background.clone(),
            format!("{emphasis} text on background"),
        ));
        pairs.push((
            color.clone(),
            c.surface.clone(),
            format!("{emphasis} text on surface"),
        ));
    }

    // Button fills under both candidate label colors (6 pairs).
    for (role, fill) in [
        ("primary", &c.primary),
        ("secondary", &c.secondary),
        ("accent", &c.accent),
    ] {
        pairs.push((
            c.background.clone(),
            fill.clone(),
            format!("Background-colored label on {role} button"),
        ));
        pairs.push((
            c.text.primary.clone(),
            fill.clone(),
            format!("Primary text label on {role} button"),
        ));
    }

    // Status colors as text and under labels (8 pairs).
    for (name, status) in [
        ("Success", &c.success),
        ("Warning", &c.warning),
        ("Error", &c.error),
        ("Info", &c.info),
    ] {
        pairs.push((
            status.clone(),
            c.background.clone(),
            format!("{name} status color on background"),
        ));
        pairs.push((
            c.text.primary.clone(),
            status.clone(),
            format!("Primary text label on {} status fill", name.to_lowercase()),
        ));
    }

    // Borders on the two surfaces (2 pairs).
    pairs.push((
        c.border.clone(),
        c.background.clone(),
        "Border against background".to_string(),
    ));
    pairs.push((
        c.border.clone(),
        c.surface.clone(),
        "Border against surface".to_string(),
    ));

    pairs
}

#[cfg(test)]
mod tests {
    use super::*;
    use wisteria_logger::LogLevel;
    use wisteria_theme::{Shadows, TextColors};

    fn checker() -> AccessibilityChecker {
        AccessibilityChecker::new(
            Arc::new(ThemeCaches::new()),
            Logger::new(100, LogLevel::Debug),
        )
    }

    fn custom_theme(id: &str, colors: ThemeColors) -> ColorTheme {
        ColorTheme {
            id: id.to_string(),
            display_name: id.to_string(),
            description: String::new(),
            colors,
            shadows: Shadows {
                small: "none".to_string(),
                medium: "none".to_string(),
                large: "none".to_string(),
            },
        }
    }

    fn earth_like_colors() -> ThemeColors {
        ThemeColors {
            primary: "#8B6F47".to_string(),
            secondary: "#3F5138".to_string(),
            accent: "#D08A4E".to_string(),
            background: "#F4EFEA".to_string(),
            surface: "#FFFFFF".to_string(),
            border: "#6B6B6B".to_string(),
            success: "#3E6B4F".to_string(),
            warning: "#8A6D1F".to_string(),
            error: "#A13333".to_string(),
            info: "#2F5D7C".to_string(),
            text: TextColors {
                primary: "#3F3F3F".to_string(),
                secondary: "#5C5C5C".to_string(),
                muted: "#696969".to_string(),
            },
        }
    }

    #[test]
    fn test_pair_enumeration_covers_all_categories() {
        let pairs = contrast_pairs(&earth_like_colors());
        assert_eq!(pairs.len(), 22);
        let text = pairs.iter().filter(|p| p.2.contains("text on")).count();
        let buttons = pairs.iter().filter(|p| p.2.contains("button")).count();
        let status = pairs.iter().filter(|p| p.2.contains("status")).count();
        let borders = pairs.iter().filter(|p| p.2.contains("Border")).count();
        assert_eq!(text, 6);
        assert_eq!(buttons, 6);
        assert_eq!(status, 8);
        assert_eq!(borders, 2);
    }

    // Reference audit of the shipped earth theme. The exact partition is
    // pinned so palette edits that change compliance are caught in review.
    #[test]
    fn test_earth_theme_reference_audit() {
        let earth = wisteria_theme::get_by_id("earth").unwrap();
        let report = checker().validate_theme(earth);

        assert!(!report.is_compliant);
        assert_eq!(report.violations.len(), 10);
        assert_eq!(report.warnings.len(), 9);
        assert_eq!(report.valid_combinations.len(), 3);
        assert!(report.focus_indicator_visible);
        assert!(report.interactive_elements_differentiated);
    }

    #[test]
    fn test_earth_primary_text_pair_passes_aaa() {
        let earth = wisteria_theme::get_by_id("earth").unwrap();
        let report = checker().validate_theme(earth);
        let pair = report
            .valid_combinations
            .iter()
            .find(|p| p.description == "Primary text on background")
            .expect("primary text pair should pass AAA");
        assert!(pair.contrast_ratio > 4.5);
        assert!(pair.meets_aa && pair.meets_aaa);
    }

    #[test]
    fn test_repeat_validation_returns_cached_report() {
        let chk = checker();
        let earth = wisteria_theme::get_by_id("earth").unwrap();
        let first = chk.validate_theme(earth);
        let second = chk.validate_theme(earth);
        assert!(Arc::ptr_eq(&first, &second));
        // One report in the cache, not two.
        assert_eq!(chk.caches().sizes().accessibility, 1);
    }

    #[test]
    fn test_contrast_memo_is_order_sensitive() {
        let chk = checker();
        let ab = chk.contrast_ratio("#FFFFFF", "#000000").unwrap();
        let ba = chk.contrast_ratio("#000000", "#FFFFFF").unwrap();
        assert!((ab - ba).abs() < 1e-9);
        // Both orderings were computed and stored separately.
        assert_eq!(chk.caches().sizes().contrast, 2);
    }

    #[test]
    fn test_malformed_color_degrades_gracefully() {
        let mut colors = earth_like_colors();
        colors.text.muted = "not-a-color".to_string();
        let theme = custom_theme("broken", colors);

        let caches = Arc::new(ThemeCaches::new());
        let logger = Logger::new(100, LogLevel::Debug);
        let chk = AccessibilityChecker::new(caches, logger.clone());
        let report = chk.validate_theme(&theme);

        // Two muted-text pairs dropped, everything else still judged.
        let evaluated = report.violations.len()
            + report.warnings.len()
            + report.valid_combinations.len();
        assert_eq!(evaluated, 20);

        let skips: Vec<_> = logger
            .entries()
            .into_iter()
            .filter(|e| e.message.contains("skipping contrast pair"))
            .collect();
        assert_eq!(skips.len(), 2);
        assert!(skips[0].message.contains("broken"));
    }

    #[test]
    fn test_invalid_primary_fails_focus_check_without_panicking() {
        let mut colors = earth_like_colors();
        colors.primary = "##".to_string();
        let theme = custom_theme("no-focus", colors);
        let report = checker().validate_theme(&theme);
        assert!(!report.focus_indicator_visible);
        assert!(!report.is_compliant);
    }

    #[test]
    fn test_indistinguishable_interactive_colors_flagged() {
        let mut colors = earth_like_colors();
        colors.secondary = colors.primary.clone();
        let theme = custom_theme("flat", colors);
        let report = checker().validate_theme(&theme);
        assert!(!report.interactive_elements_differentiated);
    }

    // The end-to-end scenario from the product accessibility review.
    #[test]
    fn test_earthy_custom_theme_scenario() {
        let theme = custom_theme("custom-earth", earth_like_colors());
        let chk = checker();
        let report = chk.validate_theme(&theme);

        let pair_in = |set: &[ContrastResult]| {
            set.iter()
                .any(|p| p.description == "Primary text on background")
        };
        assert!(pair_in(&report.valid_combinations) || pair_in(&report.warnings));
        assert!(!pair_in(&report.violations));
        assert!(report.focus_indicator_visible);

        let ratio = chk.contrast_ratio("#3F3F3F", "#F4EFEA").unwrap();
        assert!(ratio > 4.5);
        let focus = chk.contrast_ratio("#8B6F47", "#F4EFEA").unwrap();
        assert!(focus > 3.0);
    }
}
