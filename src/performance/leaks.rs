//! Memory-leak heuristics over raw source text.
//!
//! A lifecycle-bound acquisition (listener, timer, subscription, effect
//! hook) without a matching teardown in the same unit is leak-prone.
//! Counting is per unit: three listeners and one removal still flag.

use crate::core::{Severity, SourceUnit, Violation};
use crate::scan::line_column;
use once_cell::sync::Lazy;
use regex::Regex;

struct LeakPattern {
    rule: &'static str,
    acquire: Regex,
    release: Regex,
    severity: Severity,
    message: &'static str,
    recommendation: &'static str,
}

static LEAK_PATTERNS: Lazy<Vec<LeakPattern>> = Lazy::new(|| {
    vec![
        LeakPattern {
            rule: "performance/unremoved-listener",
            acquire: Regex::new(r"\baddEventListener\s*\(").unwrap(),
            release: Regex::new(r"\bremoveEventListener\s*\(").unwrap(),
            severity: Severity::High,
            message: "Event listener added without a matching removeEventListener",
            recommendation: "Remove the listener on teardown",
        },
        LeakPattern {
            rule: "performance/uncleared-interval",
            acquire: Regex::new(r"\bsetInterval\s*\(").unwrap(),
            release: Regex::new(r"\bclearInterval\s*\(").unwrap(),
            severity: Severity::High,
            message: "Interval started without a matching clearInterval",
            recommendation: "Store the interval id and clear it on teardown",
        },
        LeakPattern {
            rule: "performance/uncleared-timeout",
            acquire: Regex::new(r"\bsetTimeout\s*\(").unwrap(),
            release: Regex::new(r"\bclearTimeout\s*\(").unwrap(),
            severity: Severity::Medium,
            message: "Timeout scheduled without a matching clearTimeout",
            recommendation: "Clear pending timeouts when the owner unmounts",
        },
        LeakPattern {
            rule: "performance/unmatched-subscription",
            acquire: Regex::new(r"\.subscribe\s*\(").unwrap(),
            release: Regex::new(r"\.unsubscribe\s*\(").unwrap(),
            severity: Severity::Medium,
            message: "Subscription without a matching unsubscribe",
            recommendation: "Unsubscribe when the component is destroyed",
        },
        LeakPattern {
            rule: "performance/effect-cleanup",
            acquire: Regex::new(r"\buseEffect\s*\(").unwrap(),
            release: Regex::new(r"return\s*\(\s*\)\s*=>").unwrap(),
            severity: Severity::Medium,
            message: "Effect hook without a cleanup function",
            recommendation: "Return a cleanup function from the effect",
        },
    ]
});

pub fn detect_leaks(units: &[SourceUnit]) -> Vec<Violation> {
    let mut violations = Vec::new();
    for unit in units {
        if !unit.language.is_parseable() {
            continue;
        }
        violations.extend(scan_unit(unit));
    }
    violations
}

fn scan_unit(unit: &SourceUnit) -> Vec<Violation> {
    let content = &unit.content;
    let mut violations = Vec::new();

    for pattern in LEAK_PATTERNS.iter() {
        let acquisitions: Vec<usize> = pattern
            .acquire
            .find_iter(content)
            .map(|m| m.start())
            .collect();
        let releases = pattern.release.find_iter(content).count();
        if acquisitions.len() <= releases {
            continue;
        }

        // Attribute the finding to the first unmatched acquisition.
        let offset = acquisitions[releases.min(acquisitions.len() - 1)];
        let (line, column) = line_column(content, offset);
        violations.push(Violation {
            rule: pattern.rule.to_string(),
            severity: pattern.severity,
            file: unit.path.clone(),
            line,
            column,
            message: pattern.message.to_string(),
            recommendation: pattern.recommendation.to_string(),
            excerpt: Some(crate::scan::line_excerpt(content, line)),
        });
    }

    violations
}
