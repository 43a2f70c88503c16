//! Structural checks that need document context a single pattern match
//! cannot see: heading order, color contrast, and landmark presence.

use crate::core::{Severity, SourceUnit, Violation};
use crate::scan::line_column;
use once_cell::sync::Lazy;
use regex::Regex;

pub const RULE_HEADING_SKIP: &str = "a11y/heading-skip";
pub const RULE_LOW_CONTRAST: &str = "a11y/low-contrast";
pub const RULE_MAIN_LANDMARK: &str = "a11y/main-landmark";
pub const RULE_MISSING_TITLE: &str = "a11y/missing-title";

/// Minimum contrast for normal text at level AA.
const MIN_CONTRAST_RATIO: f64 = 4.5;

static HEADING: Lazy<Regex> = Lazy::new(|| Regex::new(r"<h([1-6])\b").unwrap());
static FG_COLOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)[^-]\bcolor\s*:\s*#([0-9a-fA-F]{6}|[0-9a-fA-F]{3})\b").unwrap());
static BG_COLOR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)background(?:-color)?\s*:\s*#([0-9a-fA-F]{6}|[0-9a-fA-F]{3})\b").unwrap()
});
static MAIN_LANDMARK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"<main\b|role\s*=\s*["']main["']"#).unwrap());

fn violation(
    unit: &SourceUnit,
    rule: &str,
    severity: Severity,
    line: usize,
    column: usize,
    message: String,
    recommendation: &str,
) -> Violation {
    Violation {
        rule: rule.to_string(),
        severity,
        file: unit.path.clone(),
        line,
        column,
        message,
        recommendation: recommendation.to_string(),
        excerpt: None,
    }
}

/// Flag heading levels that jump by more than one, tracking the previous
/// level across the whole document.
pub fn check_heading_order(unit: &SourceUnit) -> Vec<Violation> {
    let mut violations = Vec::new();
    let mut previous: Option<u32> = None;

    for captures in HEADING.captures_iter(&unit.content) {
        let level: u32 = captures[1].parse().unwrap_or(1);
        if let Some(prev) = previous {
            if level > prev + 1 {
                let m = captures.get(0).unwrap();
                let (line, column) = line_column(&unit.content, m.start());
                violations.push(violation(
                    unit,
                    RULE_HEADING_SKIP,
                    Severity::Medium,
                    line,
                    column,
                    format!("Heading level jumps from h{prev} to h{level}"),
                    "Keep heading levels sequential",
                ));
            }
        }
        previous = Some(level);
    }
    violations
}

/// Flag adjacent foreground/background hex declarations whose computed
/// contrast ratio falls below the AA minimum for normal text.
pub fn check_contrast(unit: &SourceUnit) -> Vec<Violation> {
    let content = &unit.content;
    let backgrounds: Vec<(usize, (u8, u8, u8))> = BG_COLOR
        .captures_iter(content)
        .filter_map(|c| Some((c.get(0)?.start(), parse_hex(&c[1])?)))
        .collect();

    let mut violations = Vec::new();
    for captures in FG_COLOR.captures_iter(content) {
        let m = captures.get(0).unwrap();
        let Some(fg) = parse_hex(&captures[1]) else {
            continue;
        };
        // Adjacent means within the same declaration block, approximated
        // by byte distance.
        let adjacent_bg = backgrounds
            .iter()
            .find(|(offset, _)| offset.abs_diff(m.start()) < 160);
        if let Some((_, bg)) = adjacent_bg {
            let ratio = contrast_ratio(fg, *bg);
            if ratio < MIN_CONTRAST_RATIO {
                let (line, column) = line_column(content, m.start());
                violations.push(violation(
                    unit,
                    RULE_LOW_CONTRAST,
                    Severity::Medium,
                    line,
                    column,
                    format!("Likely low contrast: ratio {ratio:.2} is below {MIN_CONTRAST_RATIO}"),
                    "Increase the contrast between text and background colors",
                ));
            }
        }
    }
    violations
}

/// Full documents need a main-content landmark and a title.
pub fn check_document_structure(unit: &SourceUnit) -> Vec<Violation> {
    let mut violations = Vec::new();
    let content = &unit.content;

    if content.contains("<body") && !MAIN_LANDMARK.is_match(content) {
        violations.push(violation(
            unit,
            RULE_MAIN_LANDMARK,
            Severity::Medium,
            1,
            0,
            "No main-content landmark in document".to_string(),
            "Wrap the primary content in a main element",
        ));
    }

    if content.contains("<head") && !content.contains("<title") {
        violations.push(violation(
            unit,
            RULE_MISSING_TITLE,
            Severity::Medium,
            1,
            0,
            "Document has no title element".to_string(),
            "Provide a descriptive document title",
        ));
    }

    violations
}

fn parse_hex(hex: &str) -> Option<(u8, u8, u8)> {
    let expanded: String = match hex.len() {
        3 => hex.chars().flat_map(|c| [c, c]).collect(),
        6 => hex.to_string(),
        _ => return None,
    };
    let r = u8::from_str_radix(&expanded[0..2], 16).ok()?;
    let g = u8::from_str_radix(&expanded[2..4], 16).ok()?;
    let b = u8::from_str_radix(&expanded[4..6], 16).ok()?;
    Some((r, g, b))
}

fn relative_luminance((r, g, b): (u8, u8, u8)) -> f64 {
    fn linearize(channel: u8) -> f64 {
        let c = f64::from(channel) / 255.0;
        if c <= 0.04045 {
            c / 12.92
        } else {
            ((c + 0.055) / 1.055).powf(2.4)
        }
    }
    0.2126 * linearize(r) + 0.7152 * linearize(g) + 0.0722 * linearize(b)
}

pub fn contrast_ratio(a: (u8, u8, u8), b: (u8, u8, u8)) -> f64 {
    let (la, lb) = (relative_luminance(a), relative_luminance(b));
    let (lighter, darker) = if la > lb { (la, lb) } else { (lb, la) };
    (lighter + 0.05) / (darker + 0.05)
}
