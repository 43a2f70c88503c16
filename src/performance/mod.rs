//! Performance profiler phase.
//!
//! Each sub-analysis is independently optional: a missing capability
//! (no build artifacts, no measurement tool) degrades that sub-report to
//! zeroed metrics with a note instead of aborting the phase. Only a
//! timed-out external call fails the phase.

pub mod bundle;
pub mod leaks;
pub mod load_time;
pub mod resource_cost;

use crate::config::PerformanceConfig;
use crate::core::{clamp_score, Phase, PhaseReport, PhaseStatus, PhaseSummary, SourceUnit};
use crate::errors::AuditError;
use bundle::{ArtifactProvider, BundleReport, DirArtifactProvider};
use load_time::{LoadTimeMetrics, LoadTimeProvider};
use resource_cost::{CostProvider, CostReport};
use std::path::Path;
use std::time::Duration;

/// External capabilities the profiler draws on. Injected at construction;
/// absent providers degrade their sub-analysis.
pub struct PerformanceProviders {
    pub artifacts: Option<Box<dyn ArtifactProvider>>,
    pub load_time: Option<Box<dyn LoadTimeProvider>>,
    pub costs: Option<Box<dyn CostProvider>>,
}

impl PerformanceProviders {
    /// Default wiring: scan the configured output directories for
    /// artifacts; no measurement or cost capability.
    pub fn detect(root: &Path, config: &PerformanceConfig) -> Self {
        Self {
            artifacts: Some(Box::new(DirArtifactProvider::new(
                root.to_path_buf(),
                config.artifact_dirs.clone(),
            ))),
            load_time: None,
            costs: None,
        }
    }

    pub fn none() -> Self {
        Self {
            artifacts: None,
            load_time: None,
            costs: None,
        }
    }
}

/// Run a capability call on a worker thread with a bounded wait. A hung
/// provider becomes a timeout error, never an unresolved hang.
fn call_with_timeout<T, F>(capability: &'static str, seconds: u64, call: F) -> Result<T, AuditError>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T, AuditError> + Send + 'static,
{
    let (tx, rx) = crossbeam::channel::bounded(1);
    std::thread::spawn(move || {
        let _ = tx.send(call());
    });
    match rx.recv_timeout(Duration::from_secs(seconds)) {
        Ok(result) => result,
        Err(_) => Err(AuditError::Timeout {
            capability,
            seconds,
        }),
    }
}

pub fn analyze(
    units: &[SourceUnit],
    config: &PerformanceConfig,
    providers: PerformanceProviders,
) -> Result<PhaseReport, AuditError> {
    let timeout = config.capability_timeout_secs;
    let mut notes = Vec::new();
    let mut violations = Vec::new();

    let bundle_report = match providers.artifacts {
        Some(provider) => {
            match call_with_timeout("build artifacts", timeout, move || provider.collect()) {
                Ok(chunks) => bundle::analyze_bundle(&chunks, config.max_bundle_bytes),
                Err(err @ AuditError::Timeout { .. }) => return Err(err),
                Err(err) => {
                    notes.push(format!("bundle analysis skipped: {err}"));
                    BundleReport::default()
                }
            }
        }
        None => {
            notes.push("bundle analysis skipped: no artifact provider".to_string());
            BundleReport::default()
        }
    };
    violations.extend(bundle_report.violations.iter().cloned());

    let load_metrics = match providers.load_time {
        Some(provider) => {
            match call_with_timeout("load-time measurement", timeout, move || provider.measure()) {
                Ok(metrics) => metrics,
                Err(err @ AuditError::Timeout { .. }) => return Err(err),
                Err(err) => {
                    notes.push(format!("load-time metrics skipped: {err}"));
                    LoadTimeMetrics::default()
                }
            }
        }
        None => {
            notes.push("load-time metrics skipped: no measurement capability".to_string());
            LoadTimeMetrics::default()
        }
    };
    let load_violations = load_time::analyze_load_time(&load_metrics, config.max_initial_load_ms);
    let load_over_budget = !load_violations.is_empty();
    violations.extend(load_violations);

    let cost_report = match providers.costs {
        Some(provider) => {
            match call_with_timeout("cost catalog", timeout, move || provider.catalog()) {
                Ok(catalog) => resource_cost::analyze_costs(&catalog, config.cost_ceiling),
                Err(err @ AuditError::Timeout { .. }) => return Err(err),
                Err(err) => {
                    notes.push(format!("resource-cost analysis skipped: {err}"));
                    CostReport::default()
                }
            }
        }
        None => CostReport::default(),
    };
    violations.extend(cost_report.violations.iter().cloned());

    let leak_violations = leaks::detect_leaks(units);
    let leak_count = leak_violations.len();
    violations.extend(leak_violations);

    let mut score = 100.0;
    if bundle_report.over_budget {
        score -= 20.0;
    }
    if load_over_budget {
        score -= 25.0;
    }
    if cost_report.average_over_budget {
        score -= 15.0;
    }
    score -= 10.0 * leak_count as f64;
    let score = clamp_score(score);

    let status = if score < 50.0 {
        PhaseStatus::Failed
    } else if violations.is_empty() && notes.is_empty() {
        PhaseStatus::Passed
    } else {
        PhaseStatus::Warning
    };

    Ok(PhaseReport {
        phase: Phase::Performance,
        score,
        status,
        summary: PhaseSummary::Performance {
            total_bundle_bytes: bundle_report.total_bytes,
            largest_chunk_bytes: bundle_report.largest_chunk_bytes,
            initial_load_ms: load_metrics.initial_load_ms,
            average_operation_cost: cost_report.average,
            leak_count,
        },
        violations,
        notes,
    })
}
