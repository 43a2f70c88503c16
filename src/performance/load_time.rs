//! Load-time metrics, sourced from an external measurement capability.

use crate::core::{Severity, Violation};
use crate::errors::AuditError;
use std::path::PathBuf;

/// Hard ceiling on time-to-interactive, independent of configuration.
pub const MAX_TIME_TO_INTERACTIVE_MS: f64 = 5000.0;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LoadTimeMetrics {
    pub initial_load_ms: f64,
    pub time_to_interactive_ms: f64,
    pub first_contentful_paint_ms: f64,
    pub largest_contentful_paint_ms: f64,
    pub cumulative_layout_shift: f64,
}

pub trait LoadTimeProvider: Send + Sync {
    fn measure(&self) -> Result<LoadTimeMetrics, AuditError>;
}

pub fn analyze_load_time(metrics: &LoadTimeMetrics, max_initial_load_ms: f64) -> Vec<Violation> {
    let mut violations = Vec::new();

    if metrics.initial_load_ms > max_initial_load_ms {
        violations.push(load_violation(
            "performance/initial-load",
            Severity::High,
            format!(
                "Initial load takes {:.0}ms (budget: {:.0}ms)",
                metrics.initial_load_ms, max_initial_load_ms
            ),
            "Defer non-critical scripts and preload key resources",
        ));
    }

    if metrics.time_to_interactive_ms > MAX_TIME_TO_INTERACTIVE_MS {
        violations.push(load_violation(
            "performance/time-to-interactive",
            Severity::High,
            format!(
                "Time to interactive is {:.0}ms (ceiling: {:.0}ms)",
                metrics.time_to_interactive_ms, MAX_TIME_TO_INTERACTIVE_MS
            ),
            "Reduce main-thread work during startup",
        ));
    }

    violations
}

fn load_violation(rule: &str, severity: Severity, message: String, recommendation: &str) -> Violation {
    Violation {
        rule: rule.to_string(),
        severity,
        file: PathBuf::from("load-time"),
        line: 1,
        column: 0,
        message,
        recommendation: recommendation.to_string(),
        excerpt: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fast_load_has_no_violations() {
        let metrics = LoadTimeMetrics {
            initial_load_ms: 1200.0,
            time_to_interactive_ms: 2500.0,
            ..Default::default()
        };
        assert!(analyze_load_time(&metrics, 3000.0).is_empty());
    }

    #[test]
    fn slow_startup_flags_both_budgets() {
        let metrics = LoadTimeMetrics {
            initial_load_ms: 4200.0,
            time_to_interactive_ms: 6100.0,
            ..Default::default()
        };
        let violations = analyze_load_time(&metrics, 3000.0);
        assert_eq!(violations.len(), 2);
    }
}
