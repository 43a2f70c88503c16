//! Shared pattern-rule engine for the raw-text scanners.
//!
//! Scanning is stateless per call: a rule yields every non-overlapping
//! match of a fixed input in one pass, with line/column derived from the
//! match offset. The regex crate has no lookaround, so contextual
//! constraints are expressed as `require`/`forbid` secondary patterns
//! applied to the matched span.

pub mod suppression;

use crate::core::Severity;
use regex::Regex;

pub struct PatternRule {
    pub id: &'static str,
    pub pattern: Regex,
    pub require: Vec<Regex>,
    pub forbid: Vec<Regex>,
    pub severity: Severity,
    pub description: &'static str,
    pub recommendation: &'static str,
}

impl PatternRule {
    pub fn new(
        id: &'static str,
        pattern: &str,
        severity: Severity,
        description: &'static str,
        recommendation: &'static str,
    ) -> Self {
        Self {
            id,
            pattern: Regex::new(pattern).unwrap(),
            require: Vec::new(),
            forbid: Vec::new(),
            severity,
            description,
            recommendation,
        }
    }

    /// Every `require` pattern must also match within the matched span.
    pub fn require(mut self, pattern: &str) -> Self {
        self.require.push(Regex::new(pattern).unwrap());
        self
    }

    /// No `forbid` pattern may match within the matched span.
    pub fn forbid(mut self, pattern: &str) -> Self {
        self.forbid.push(Regex::new(pattern).unwrap());
        self
    }

    fn accepts(&self, span: &str) -> bool {
        self.require.iter().all(|r| r.is_match(span))
            && !self.forbid.iter().any(|r| r.is_match(span))
    }
}

#[derive(Clone, Debug)]
pub struct PatternMatch {
    pub rule_id: &'static str,
    pub severity: Severity,
    pub description: &'static str,
    pub recommendation: &'static str,
    pub line: usize,
    pub column: usize,
    /// Byte range of the match in the scanned input.
    pub start: usize,
    pub end: usize,
    pub text: String,
}

/// Run every rule over the input and collect all accepted matches, in rule
/// table order.
pub fn scan_source(content: &str, rules: &[PatternRule]) -> Vec<PatternMatch> {
    let mut matches = Vec::new();
    for rule in rules {
        for m in rule.pattern.find_iter(content) {
            if !rule.accepts(m.as_str()) {
                continue;
            }
            let (line, column) = line_column(content, m.start());
            matches.push(PatternMatch {
                rule_id: rule.id,
                severity: rule.severity,
                description: rule.description,
                recommendation: rule.recommendation,
                line,
                column,
                start: m.start(),
                end: m.end(),
                text: m.as_str().to_string(),
            });
        }
    }
    matches
}

/// Collapse matches whose byte ranges overlap, keeping the earliest rule in
/// table order. Used where several rules describe the same underlying
/// secret and one finding per site is wanted.
pub fn collapse_overlapping(matches: Vec<PatternMatch>) -> Vec<PatternMatch> {
    let mut accepted: Vec<PatternMatch> = Vec::new();
    for candidate in matches {
        let overlaps = accepted
            .iter()
            .any(|kept| candidate.start < kept.end && kept.start < candidate.end);
        if !overlaps {
            accepted.push(candidate);
        }
    }
    accepted
}

/// 1-based line and 0-based column for a byte offset, by counting newlines
/// up to the offset.
pub fn line_column(content: &str, offset: usize) -> (usize, usize) {
    let prefix = &content[..offset];
    let line = prefix.bytes().filter(|&b| b == b'\n').count() + 1;
    let column = match prefix.rfind('\n') {
        Some(nl) => offset - nl - 1,
        None => offset,
    };
    (line, column)
}

/// The full text of the 1-based line containing `line`, trimmed.
pub fn line_excerpt(content: &str, line: usize) -> String {
    content
        .lines()
        .nth(line.saturating_sub(1))
        .unwrap_or("")
        .trim()
        .to_string()
}
