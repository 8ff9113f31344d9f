//! Accessibility report types and their presentation helpers.

/// Contrast measurement for one foreground/background pairing.
///
/// Computed on demand, cached by the pair, never mutated once produced.
#[derive(Debug, Clone, PartialEq)]
pub struct ContrastResult {
    pub foreground: String,
    pub background: String,
    /// WCAG 2.1 contrast ratio in `[1.0, 21.0]`.
    pub contrast_ratio: f64,
    pub meets_aa: bool,
    pub meets_aaa: bool,
    pub meets_aa_large: bool,
    pub meets_aaa_large: bool,
    /// Human-readable description of the pairing being judged.
    pub description: String,
}

/// Full compliance report for one theme.
#[derive(Debug, Clone, PartialEq)]
pub struct ThemeAccessibilityResult {
    pub theme_id: String,
    pub theme_name: String,
    /// True iff `violations` is empty and both boolean checks hold.
    pub is_compliant: bool,
    /// Pairings that fail WCAG AA for normal text.
    pub violations: Vec<ContrastResult>,
    /// Pairings that pass AA but fall short of AAA.
    pub warnings: Vec<ContrastResult>,
    /// Pairings that pass AAA.
    pub valid_combinations: Vec<ContrastResult>,
    /// Primary color reaches 3.0:1 against both background and surface.
    pub focus_indicator_visible: bool,
    /// Primary, secondary and accent are pairwise distinguishable (1.5:1).
    pub interactive_elements_differentiated: bool,
}

/// One-line human-readable summary of a report.
pub fn summary(result: &ThemeAccessibilityResult) -> String {
    let status = if result.is_compliant {
        "meets WCAG AA"
    } else {
        "does not meet WCAG AA"
    };
    format!(
        "{} {}: {} violations, {} warnings, {} AAA passes",
        result.theme_name,
        status,
        result.violations.len(),
        result.warnings.len(),
        result.valid_combinations.len()
    )
}

/// Improvement suggestions keyed off the categories of problem present.
///
/// Pure string templating over the report; no new computation. Button and
/// status fills carry "label" in their pair descriptions, which is what
/// separates them from plain text legibility problems.
pub fn suggestions(result: &ThemeAccessibilityResult) -> Vec<String> {
    let mut out = Vec::new();

    let label_violation = result
        .violations
        .iter()
        .any(|v| v.description.contains("label"));
    let text_violation = result
        .violations
        .iter()
        .any(|v| !v.description.contains("label"));

    if text_violation {
        out.push(
            "Increase the contrast between text colors and the background and surface colors."
                .to_string(),
        );
    }
    if label_violation {
        out.push(
            "Pick button and status fill colors that keep their labels at or above the 4.5:1 AA ratio."
                .to_string(),
        );
    }
    if !result.focus_indicator_visible {
        out.push(
            "Strengthen the primary color against the background and surface so the focus ring stays visible."
                .to_string(),
        );
    }
    if !result.interactive_elements_differentiated {
        out.push(
            "Spread the primary, secondary, and accent colors further apart so interactive elements are distinguishable."
                .to_string(),
        );
    }

    out
}
