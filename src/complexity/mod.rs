//! Tree walker and complexity analyzer phase.

pub mod branch;
pub mod cognitive;
pub mod cyclomatic;
pub mod walker;

use crate::config::ComplexityConfig;
use crate::core::{
    clamp_score, metrics, FunctionRecord, Phase, PhaseReport, PhaseStatus, PhaseSummary, Severity,
    SourceUnit, Violation,
};
use crate::parsing::{is_declaration_file, is_dependency_path};
use crate::scan::suppression::SuppressionContext;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

pub const RULE_CYCLOMATIC: &str = "complexity/cyclomatic";
pub const RULE_LENGTH: &str = "complexity/length";
pub const RULE_NESTING: &str = "complexity/nesting";
pub const RULE_PARAMETERS: &str = "complexity/parameters";

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ComplexityReport {
    pub functions: Vec<FunctionRecord>,
    pub violations: Vec<Violation>,
    pub total_functions: usize,
    pub violating_functions: usize,
    pub average_complexity: f64,
    pub max_complexity: u32,
}

pub fn analyze(units: &[SourceUnit], config: &ComplexityConfig) -> PhaseReport {
    let report = build_report(units, config);
    let score = phase_score(&report, config);
    let status = if report.violations.is_empty() {
        PhaseStatus::Passed
    } else if score < 50.0 {
        PhaseStatus::Failed
    } else {
        PhaseStatus::Warning
    };

    PhaseReport {
        phase: Phase::Complexity,
        score,
        status,
        summary: PhaseSummary::Complexity {
            total_functions: report.total_functions,
            violating_functions: report.violating_functions,
            average_complexity: report.average_complexity,
            max_complexity: report.max_complexity,
        },
        violations: report.violations,
        notes: Vec::new(),
    }
}

pub fn build_report(units: &[SourceUnit], config: &ComplexityConfig) -> ComplexityReport {
    let per_unit: Vec<(Vec<FunctionRecord>, Vec<Violation>)> = units
        .par_iter()
        .filter(|unit| unit.language.is_parseable())
        .filter(|unit| !is_declaration_file(&unit.path) && !is_dependency_path(&unit.path))
        .filter_map(|unit| match walker::extract_functions(unit) {
            Ok(functions) => {
                let suppressions = SuppressionContext::parse(&unit.content);
                let violations = functions
                    .iter()
                    .flat_map(|f| check_function(f, config))
                    .filter(|v| !suppressions.is_suppressed(v.line, &v.rule))
                    .collect();
                Some((functions, violations))
            }
            Err(err) => {
                log::warn!("skipping {}: {err}", unit.path.display());
                None
            }
        })
        .collect();

    let mut functions = Vec::new();
    let mut violations = Vec::new();
    for (f, v) in per_unit {
        functions.extend(f);
        violations.extend(v);
    }

    let violating_functions = violations
        .iter()
        .map(|v| (v.file.clone(), v.line))
        .collect::<std::collections::HashSet<_>>()
        .len();

    ComplexityReport {
        total_functions: functions.len(),
        violating_functions,
        average_complexity: metrics::average_cyclomatic(&functions),
        max_complexity: metrics::max_cyclomatic(&functions),
        functions,
        violations,
    }
}

/// Severity escalates to High past twice the threshold, otherwise Medium.
fn escalate(value: u64, threshold: u64) -> Severity {
    if value > threshold * 2 {
        Severity::High
    } else {
        Severity::Medium
    }
}

fn check_function(function: &FunctionRecord, config: &ComplexityConfig) -> Vec<Violation> {
    let m = &function.metrics;
    let mut violations = Vec::new();

    let mut push = |rule: &str, severity: Severity, message: String, recommendation: String| {
        violations.push(Violation {
            rule: rule.to_string(),
            severity,
            file: function.file.clone(),
            line: function.line,
            column: function.column,
            message,
            recommendation,
            excerpt: None,
        });
    };

    if m.cyclomatic > config.max_cyclomatic {
        push(
            RULE_CYCLOMATIC,
            escalate(u64::from(m.cyclomatic), u64::from(config.max_cyclomatic)),
            format!(
                "Function '{}' has cyclomatic complexity {} (threshold: {})",
                function.name, m.cyclomatic, config.max_cyclomatic
            ),
            format!("Split '{}' into smaller functions to reduce branching", function.name),
        );
    }

    if m.length > config.max_length {
        push(
            RULE_LENGTH,
            escalate(m.length as u64, config.max_length as u64),
            format!(
                "Function '{}' is {} lines long (threshold: {})",
                function.name, m.length, config.max_length
            ),
            format!("Extract helpers from '{}' to shorten it", function.name),
        );
    }

    if m.nesting > config.max_nesting {
        push(
            RULE_NESTING,
            escalate(u64::from(m.nesting), u64::from(config.max_nesting)),
            format!(
                "Function '{}' nests {} levels deep (threshold: {})",
                function.name, m.nesting, config.max_nesting
            ),
            format!("Flatten control flow in '{}' with early returns", function.name),
        );
    }

    if m.parameters > config.max_parameters {
        push(
            RULE_PARAMETERS,
            escalate(m.parameters as u64, config.max_parameters as u64),
            format!(
                "Function '{}' takes {} parameters (threshold: {})",
                function.name, m.parameters, config.max_parameters
            ),
            format!("Group '{}' parameters into an options object", function.name),
        );
    }

    violations
}

fn phase_score(report: &ComplexityReport, config: &ComplexityConfig) -> f64 {
    let mut score = 100.0;
    for violation in &report.violations {
        score -= violation.severity.score_penalty();
    }
    let threshold = f64::from(config.max_cyclomatic);
    if report.average_complexity > threshold {
        score -= 2.0 * (report.average_complexity - threshold);
    }
    clamp_score(score)
}
