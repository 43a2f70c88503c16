//! Accessibility rule table.
//!
//! Each entry pairs a pattern rule with the WCAG conformance level it
//! belongs to; the configured minimum level filters the violation set
//! before the compliance level is computed.

use crate::core::{Severity, WcagLevel};
use crate::scan::PatternRule;
use once_cell::sync::Lazy;

pub struct ComplianceRule {
    pub level: WcagLevel,
    pub rule: PatternRule,
}

fn rule(level: WcagLevel, rule: PatternRule) -> ComplianceRule {
    ComplianceRule { level, rule }
}

pub static COMPLIANCE_RULES: Lazy<Vec<ComplianceRule>> = Lazy::new(|| {
    vec![
        rule(
            WcagLevel::A,
            PatternRule::new(
                "a11y/img-alt",
                r"<img\b[^>]*>",
                Severity::High,
                "Image without alternative text",
                "Add an alt attribute describing the image, or alt=\"\" if decorative",
            )
            .forbid(r"\balt\s*="),
        ),
        rule(
            WcagLevel::A,
            PatternRule::new(
                "a11y/decorative-img-alt",
                r"<img\b[^>]*>",
                Severity::Low,
                "Decorative image with non-empty alternative text",
                "Use alt=\"\" on images marked role=\"presentation\"",
            )
            .require(r#"role\s*=\s*["']presentation["']"#)
            .require(r#"\balt\s*=\s*["'][^"']+["']"#),
        ),
        rule(
            WcagLevel::A,
            PatternRule::new(
                "a11y/input-label",
                r"<input\b[^>]*>",
                Severity::High,
                "Input without an associated label",
                "Associate the input with a label element or add aria-label",
            )
            .forbid(r"aria-label(ledby)?\s*=")
            .forbid(r#"type\s*=\s*["'](hidden|submit|button|reset)["']"#)
            .forbid(r"\bid\s*="),
        ),
        rule(
            WcagLevel::A,
            PatternRule::new(
                "a11y/empty-interactive",
                r"<button\b[^>]*>\s*</button>|<a\b[^>]*>\s*</a>",
                Severity::High,
                "Interactive control with no accessible content",
                "Give the control visible text or an aria-label",
            )
            .forbid(r"aria-label\s*="),
        ),
        rule(
            WcagLevel::A,
            PatternRule::new(
                "a11y/page-title",
                r"<title>\s*</title>|<title>[^<]{1,3}</title>",
                Severity::Medium,
                "Missing or too-short page title",
                "Provide a descriptive document title",
            ),
        ),
        rule(
            WcagLevel::A,
            PatternRule::new(
                "a11y/color-only-cue",
                r#"(?i)style\s*=\s*["'][^"']*\bcolor\s*:\s*(red|green)\b[^"']*["']"#,
                Severity::Low,
                "Color alone used to convey state",
                "Pair the color with text or an icon",
            ),
        ),
        rule(
            WcagLevel::A,
            PatternRule::new(
                "a11y/positive-tabindex",
                r#"tabindex\s*=\s*["']?[1-9][0-9]*"#,
                Severity::Medium,
                "Positive tabindex overrides natural focus order",
                "Use tabindex=\"0\" and source order instead",
            ),
        ),
        rule(
            WcagLevel::AA,
            PatternRule::new(
                "a11y/focus-outline",
                r"(?i)\boutline\s*:\s*(none|0)\b",
                Severity::Medium,
                "Focus outline removed",
                "Replace the removed outline with a visible :focus style",
            ),
        ),
        rule(
            WcagLevel::A,
            PatternRule::new(
                "a11y/aria-hidden-focusable",
                r#"<[a-zA-Z][^>]*aria-hidden\s*=\s*["']true["'][^>]*>"#,
                Severity::High,
                "aria-hidden element remains focusable",
                "Remove the element from the tab order or drop aria-hidden",
            )
            .require(r#"^<(a|button|input|select|textarea)\b|tabindex\s*=\s*["']?[0-9]"#),
        ),
        rule(
            WcagLevel::A,
            PatternRule::new(
                "a11y/empty-aria-label",
                r#"aria-label\s*=\s*["']\s*["']"#,
                Severity::Medium,
                "Empty aria-label hides the accessible name",
                "Fill in the aria-label or remove it",
            ),
        ),
        rule(
            WcagLevel::A,
            PatternRule::new(
                "a11y/click-no-keyboard",
                r"<(div|span|li|img)\b[^>]*on[Cc]lick\s*=[^>]*>",
                Severity::Medium,
                "Click handler without a keyboard equivalent",
                "Add onKeyDown handling and role=\"button\", or use a button element",
            )
            .forbid(r"onKey(Down|Up|Press)\s*=")
            .forbid(r#"role\s*=\s*["'](button|link)["']"#),
        ),
        rule(
            WcagLevel::A,
            PatternRule::new(
                "a11y/video-captions",
                r"(?s)<video\b.{0,800}?</video>",
                Severity::High,
                "Video without captions",
                "Add a track element with kind=\"captions\"",
            )
            .forbid(r"<track\b"),
        ),
        rule(
            WcagLevel::A,
            PatternRule::new(
                "a11y/doc-language",
                r"<html\b[^>]*>",
                Severity::High,
                "Document language not declared",
                "Add a lang attribute to the html element",
            )
            .forbid(r"\blang\s*="),
        ),
    ]
});

pub fn level_of(rule_id: &str) -> WcagLevel {
    COMPLIANCE_RULES
        .iter()
        .find(|r| r.rule.id == rule_id)
        .map(|r| r.level)
        .unwrap_or(match rule_id {
            super::contextual::RULE_LOW_CONTRAST => WcagLevel::AA,
            _ => WcagLevel::A,
        })
}
