pub mod metrics;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Clamp a phase or overall score into the reportable [0, 100] range.
pub fn clamp_score(score: f64) -> f64 {
    score.clamp(0.0, 100.0)
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, Ord, PartialOrd)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    /// Fixed score penalty applied per violation of this severity.
    pub fn score_penalty(&self) -> f64 {
        match self {
            Severity::Critical => 15.0,
            Severity::High => 10.0,
            Severity::Medium => 5.0,
            Severity::Low => 2.0,
        }
    }

    /// Base value for exposure risk scoring, on the [0, 10] scale.
    pub fn risk_base(&self) -> f64 {
        match self {
            Severity::Critical => 10.0,
            Severity::High => 7.0,
            Severity::Medium => 4.0,
            Severity::Low => 1.0,
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Severity::Low => "LOW",
            Severity::Medium => "MEDIUM",
            Severity::High => "HIGH",
            Severity::Critical => "CRITICAL",
        };
        write!(f, "{s}")
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Complexity,
    Security,
    Compliance,
    Performance,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Complexity => "complexity",
            Phase::Security => "security",
            Phase::Compliance => "compliance",
            Phase::Performance => "performance",
        }
    }

    pub fn all() -> [Phase; 4] {
        [
            Phase::Complexity,
            Phase::Security,
            Phase::Compliance,
            Phase::Performance,
        ]
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PhaseStatus {
    Passed,
    Warning,
    Failed,
}

impl PhaseStatus {
    /// The more severe of two statuses, used when folding phase statuses
    /// into an overall run status.
    pub fn worst(self, other: PhaseStatus) -> PhaseStatus {
        use PhaseStatus::*;
        match (self, other) {
            (Failed, _) | (_, Failed) => Failed,
            (Warning, _) | (_, Warning) => Warning,
            _ => Passed,
        }
    }
}

impl std::fmt::Display for PhaseStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            PhaseStatus::Passed => "passed",
            PhaseStatus::Warning => "warning",
            PhaseStatus::Failed => "failed",
        };
        write!(f, "{s}")
    }
}

/// WCAG conformance level a rule belongs to.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Ord, PartialOrd, Hash)]
pub enum WcagLevel {
    A,
    AA,
    AAA,
}

/// Conformance level achieved by the audited markup.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ComplianceLevel {
    NonCompliant,
    A,
    AA,
}

impl std::fmt::Display for ComplianceLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ComplianceLevel::NonCompliant => "NON_COMPLIANT",
            ComplianceLevel::A => "A",
            ComplianceLevel::AA => "AA",
        };
        write!(f, "{s}")
    }
}

/// A single rule breach found by any analyzer.
///
/// Excerpts are sanitized before construction: a violation must never carry
/// the raw text of a secret it flags.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Violation {
    pub rule: String,
    pub severity: Severity,
    pub file: PathBuf,
    pub line: usize,
    pub column: usize,
    pub message: String,
    pub recommendation: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,
}

/// One function-like node and its computed metrics.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct FunctionRecord {
    pub name: String,
    pub file: PathBuf,
    pub line: usize,
    pub column: usize,
    pub metrics: ComplexityMetrics,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ComplexityMetrics {
    pub cyclomatic: u32,
    pub cognitive: u32,
    pub length: usize,
    pub nesting: u32,
    pub parameters: usize,
}

impl Default for ComplexityMetrics {
    fn default() -> Self {
        Self {
            cyclomatic: 1,
            cognitive: 0,
            length: 0,
            nesting: 0,
            parameters: 0,
        }
    }
}

/// One analyzable file, immutable for the duration of a run.
#[derive(Clone, Debug)]
pub struct SourceUnit {
    pub path: PathBuf,
    pub content: String,
    pub language: Language,
}

impl SourceUnit {
    pub fn new(path: PathBuf, content: String) -> Self {
        let language = Language::from_path(&path);
        Self {
            path,
            content,
            language,
        }
    }

    pub fn extension(&self) -> Option<&str> {
        self.path.extension().and_then(|e| e.to_str())
    }
}

/// Phase-specific summary statistics carried alongside the violation list.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PhaseSummary {
    Complexity {
        total_functions: usize,
        violating_functions: usize,
        average_complexity: f64,
        max_complexity: u32,
    },
    Security {
        files_scanned: usize,
        findings: usize,
        max_risk: f64,
    },
    Compliance {
        level: ComplianceLevel,
        files_checked: usize,
    },
    Performance {
        total_bundle_bytes: u64,
        largest_chunk_bytes: u64,
        initial_load_ms: f64,
        average_operation_cost: f64,
        leak_count: usize,
    },
}

/// Output of one analyzer for one run.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PhaseReport {
    pub phase: Phase,
    pub score: f64,
    pub status: PhaseStatus,
    pub violations: Vec<Violation>,
    pub summary: PhaseSummary,
    /// Degradation notes, e.g. a capability that could not be exercised.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub notes: Vec<String>,
}

impl PhaseReport {
    pub fn count_by_severity(&self, severity: Severity) -> usize {
        self.violations
            .iter()
            .filter(|v| v.severity == severity)
            .count()
    }
}

/// An error captured during a run and attributed to exactly one phase.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ExecutionError {
    pub phase: Phase,
    pub category: String,
    pub message: String,
    pub remediation: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Recommendation {
    pub text: String,
    pub severity: Severity,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReadinessTier {
    NotReady,
    NeedsWork,
    Ready,
    ProductionReady,
}

impl std::fmt::Display for ReadinessTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ReadinessTier::NotReady => "NOT_READY",
            ReadinessTier::NeedsWork => "NEEDS_WORK",
            ReadinessTier::Ready => "READY",
            ReadinessTier::ProductionReady => "PRODUCTION_READY",
        };
        write!(f, "{s}")
    }
}

/// The aggregated result of one audit run. Immutable once produced;
/// re-running the audit yields a new report.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ComprehensiveReport {
    pub project_path: PathBuf,
    pub timestamp: DateTime<Utc>,
    pub overall_score: f64,
    pub overall_status: PhaseStatus,
    pub readiness: ReadinessTier,
    pub phases: Vec<PhaseReport>,
    pub failed_phases: Vec<Phase>,
    pub errors: Vec<ExecutionError>,
    pub recommendations: Vec<Recommendation>,
}

impl ComprehensiveReport {
    pub fn count_by_severity(&self, severity: Severity) -> usize {
        self.phases
            .iter()
            .map(|p| p.count_by_severity(severity))
            .sum()
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Language {
    JavaScript,
    TypeScript,
    Tsx,
    Html,
    Css,
    Unknown,
}

impl Language {
    pub fn from_extension(ext: &str) -> Self {
        static EXTENSION_MAP: &[(&[&str], Language)] = &[
            (&["js", "jsx", "mjs", "cjs"], Language::JavaScript),
            (&["ts", "mts", "cts"], Language::TypeScript),
            (&["tsx"], Language::Tsx),
            (&["html", "htm"], Language::Html),
            (&["css", "scss"], Language::Css),
        ];

        EXTENSION_MAP
            .iter()
            .find(|(exts, _)| exts.contains(&ext))
            .map(|(_, lang)| *lang)
            .unwrap_or(Language::Unknown)
    }

    pub fn from_path(path: &std::path::Path) -> Self {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(Self::from_extension)
            .unwrap_or(Language::Unknown)
    }

    /// Languages the syntax provider can produce a walkable tree for.
    pub fn is_parseable(&self) -> bool {
        matches!(
            self,
            Language::JavaScript | Language::TypeScript | Language::Tsx
        )
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Language::JavaScript => "JavaScript",
            Language::TypeScript => "TypeScript",
            Language::Tsx => "TSX",
            Language::Html => "HTML",
            Language::Css => "CSS",
            Language::Unknown => "Unknown",
        };
        write!(f, "{s}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_order_is_total() {
        assert!(Severity::Critical > Severity::High);
        assert!(Severity::High > Severity::Medium);
        assert!(Severity::Medium > Severity::Low);
    }

    #[test]
    fn penalties_decrease_with_severity() {
        let penalties = [
            Severity::Critical.score_penalty(),
            Severity::High.score_penalty(),
            Severity::Medium.score_penalty(),
            Severity::Low.score_penalty(),
        ];
        assert!(penalties.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn status_worst_prefers_failed() {
        assert_eq!(
            PhaseStatus::Passed.worst(PhaseStatus::Failed),
            PhaseStatus::Failed
        );
        assert_eq!(
            PhaseStatus::Warning.worst(PhaseStatus::Passed),
            PhaseStatus::Warning
        );
    }

    #[test]
    fn language_from_extension_maps_variants() {
        assert_eq!(Language::from_extension("tsx"), Language::Tsx);
        assert_eq!(Language::from_extension("mjs"), Language::JavaScript);
        assert_eq!(Language::from_extension("d"), Language::Unknown);
    }
}
