// Export modules for library usage
pub mod cli;
pub mod compliance;
pub mod complexity;
pub mod config;
pub mod core;
pub mod errors;
pub mod io;
pub mod orchestrator;
pub mod parsing;
pub mod performance;
pub mod progress;
pub mod scan;
pub mod scoring;
pub mod security;

// Re-export commonly used types
pub use crate::core::{
    ComplexityMetrics, ComprehensiveReport, ExecutionError, FunctionRecord, Language, Phase,
    PhaseReport, PhaseStatus, PhaseSummary, ReadinessTier, Recommendation, Severity, SourceUnit,
    Violation, WcagLevel,
};

pub use crate::config::ReadymapConfig;
pub use crate::errors::AuditError;
pub use crate::orchestrator::{AuditEvent, AuditState, Auditor, CancellationToken};

pub use crate::complexity::{build_report as build_complexity_report, ComplexityReport};
pub use crate::io::output::{create_writer, OutputFormat, ReportWriter};
pub use crate::performance::{
    bundle::{ArtifactProvider, ChunkInfo},
    load_time::{LoadTimeMetrics, LoadTimeProvider},
    resource_cost::{CostProvider, OperationCost},
    PerformanceProviders,
};

use std::path::PathBuf;

/// Run a full audit with the default capability wiring and return the
/// aggregated report.
pub fn run_audit(
    root: impl Into<PathBuf>,
    config: ReadymapConfig,
) -> Result<ComprehensiveReport, AuditError> {
    Auditor::new(root.into(), config).run()
}
