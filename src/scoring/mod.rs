//! Converts the per-phase reports of one run into an overall score, a
//! readiness tier, and a ranked recommendation list.

use crate::core::{
    clamp_score, ComprehensiveReport, ExecutionError, Phase, PhaseReport, PhaseStatus,
    ReadinessTier, Recommendation, Severity,
};
use std::collections::HashMap;
use std::path::PathBuf;

/// Score required for PRODUCTION_READY.
pub const HIGH_BAR: f64 = 90.0;
/// Score required for READY.
pub const MIDDLE_BAR: f64 = 75.0;
/// Below this the project is NOT_READY regardless of findings.
pub const LOW_BAR: f64 = 50.0;
/// READY tolerates at most this many High findings.
pub const MAX_HIGH_FINDINGS: usize = 3;

/// Arithmetic mean of the phase scores actually present. Phases that
/// failed to execute are excluded from the mean, not scored as zero.
pub fn overall_score(phases: &[PhaseReport]) -> f64 {
    if phases.is_empty() {
        return 0.0;
    }
    let total: f64 = phases.iter().map(|p| p.score).sum();
    clamp_score(total / phases.len() as f64)
}

pub fn overall_status(phases: &[PhaseReport]) -> PhaseStatus {
    if phases.is_empty() {
        return PhaseStatus::Failed;
    }
    phases
        .iter()
        .fold(PhaseStatus::Passed, |acc, p| acc.worst(p.status))
}

/// Pure, deterministic tier function: same score and finding counts always
/// yield the same tier. Critical findings dominate every score bar.
pub fn readiness_tier(score: f64, critical_count: usize, high_count: usize) -> ReadinessTier {
    if critical_count > 0 || score < LOW_BAR {
        ReadinessTier::NotReady
    } else if score >= HIGH_BAR {
        ReadinessTier::ProductionReady
    } else if score >= MIDDLE_BAR && high_count <= MAX_HIGH_FINDINGS {
        ReadinessTier::Ready
    } else {
        ReadinessTier::NeedsWork
    }
}

/// Gather recommendations from every phase, dedupe by exact text (keeping
/// the highest originating severity), and order by severity, Critical
/// first. Ties keep first-seen order.
pub fn collect_recommendations(phases: &[PhaseReport]) -> Vec<Recommendation> {
    let mut seen: HashMap<String, (Severity, usize)> = HashMap::new();
    let mut order = 0usize;

    for phase in phases {
        for violation in &phase.violations {
            let text = violation.recommendation.clone();
            if text.is_empty() {
                continue;
            }
            seen.entry(text)
                .and_modify(|(severity, _)| {
                    if violation.severity > *severity {
                        *severity = violation.severity;
                    }
                })
                .or_insert_with(|| {
                    order += 1;
                    (violation.severity, order)
                });
        }
    }

    let mut recommendations: Vec<(String, Severity, usize)> = seen
        .into_iter()
        .map(|(text, (severity, index))| (text, severity, index))
        .collect();
    recommendations.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));
    recommendations
        .into_iter()
        .map(|(text, severity, _)| Recommendation { text, severity })
        .collect()
}

pub fn build_report(
    project_path: PathBuf,
    phases: Vec<PhaseReport>,
    failed_phases: Vec<Phase>,
    errors: Vec<ExecutionError>,
) -> ComprehensiveReport {
    let score = overall_score(&phases);
    let status = overall_status(&phases);
    let critical: usize = phases
        .iter()
        .map(|p| p.count_by_severity(Severity::Critical))
        .sum();
    let high: usize = phases
        .iter()
        .map(|p| p.count_by_severity(Severity::High))
        .sum();
    let recommendations = collect_recommendations(&phases);

    ComprehensiveReport {
        project_path,
        timestamp: chrono::Utc::now(),
        overall_score: score,
        overall_status: status,
        readiness: readiness_tier(score, critical, high),
        phases,
        failed_phases,
        errors,
        recommendations,
    }
}
