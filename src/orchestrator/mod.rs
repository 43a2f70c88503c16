//! Audit orchestration: phase sequencing, failure isolation, progress
//! streaming, and cancellation.
//!
//! Phases are pure functions of the loaded source units and the run
//! configuration, so they may run in parallel workers or sequentially with
//! identical results. A phase failure is caught, attributed, and never
//! halts the remaining phases; results flow through a single aggregation
//! point.

use crate::compliance;
use crate::complexity;
use crate::config::ReadymapConfig;
use crate::core::{ComprehensiveReport, ExecutionError, Phase, PhaseReport, SourceUnit};
use crate::errors::AuditError;
use crate::io::walker::load_source_units;
use crate::performance::{self, PerformanceProviders};
use crate::scoring;
use crate::security;
use crossbeam::channel::Sender;
use parking_lot::RwLock;
use rayon::prelude::*;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

/// Push-based notifications for streaming consumers.
#[derive(Clone, Debug)]
pub enum AuditEvent {
    PhaseStarted { phase: Phase },
    PhaseProgress { phase: Phase, percent: u8 },
    PhaseCompleted { phase: Phase, report: PhaseReport },
    PhaseFailed { phase: Phase, message: String },
    Finished,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuditState {
    Idle,
    Running(Phase),
    Aggregating,
    Done,
}

#[derive(Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

enum PhaseOutcome {
    Completed(PhaseReport),
    Failed(AuditError),
    Cancelled,
}

pub struct Auditor {
    root: PathBuf,
    config: ReadymapConfig,
    providers: PerformanceProviders,
    events: Option<Sender<AuditEvent>>,
    cancel: CancellationToken,
    state: Arc<RwLock<AuditState>>,
    parallel: bool,
}

impl Auditor {
    pub fn new(root: PathBuf, config: ReadymapConfig) -> Self {
        let providers = PerformanceProviders::detect(&root, &config.performance);
        Self {
            root,
            config,
            providers,
            events: None,
            cancel: CancellationToken::new(),
            state: Arc::new(RwLock::new(AuditState::Idle)),
            parallel: true,
        }
    }

    /// Replace the default capability wiring, e.g. to inject a live
    /// measurement tool or a stub in tests.
    pub fn with_providers(mut self, providers: PerformanceProviders) -> Self {
        self.providers = providers;
        self
    }

    pub fn with_events(mut self, sender: Sender<AuditEvent>) -> Self {
        self.events = Some(sender);
        self
    }

    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    /// Token a caller can use to abort remaining phases; completed phase
    /// reports are preserved in the partial result.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Observable run state for dashboards and progress UIs.
    pub fn state_handle(&self) -> Arc<RwLock<AuditState>> {
        self.state.clone()
    }

    /// Run every enabled phase and aggregate the results. Always returns a
    /// report unless no source files can be enumerated at all.
    pub fn run(self) -> Result<ComprehensiveReport, AuditError> {
        self.config.validate()?;
        let units = load_source_units(&self.root, &self.config.io)?;

        let Auditor {
            root,
            config,
            providers,
            events,
            cancel,
            state,
            parallel,
        } = self;

        let enabled = enabled_phases(&config);
        let ctx = RunContext {
            cancel: &cancel,
            state: &state,
            events: events.as_ref(),
            completed: AtomicUsize::new(0),
            total: enabled.len(),
        };

        // The performance providers move into their phase task, so tasks
        // are built once and consumed by whichever scheduler runs them.
        // Tasks capture shared references, never the data itself.
        let units_ref: &[SourceUnit] = &units;
        let config_ref = &config;
        let mut provider_slot = Some(providers);
        let tasks: Vec<(Phase, PhaseTask<'_>)> = enabled
            .iter()
            .map(|&phase| {
                let task: PhaseTask<'_> = match phase {
                    Phase::Complexity => Box::new(move || {
                        Ok(complexity::analyze(units_ref, &config_ref.complexity))
                    }),
                    Phase::Security => {
                        Box::new(move || Ok(security::analyze(units_ref, &config_ref.security)))
                    }
                    Phase::Compliance => {
                        Box::new(move || Ok(compliance::analyze(units_ref, &config_ref.compliance)))
                    }
                    Phase::Performance => {
                        let providers =
                            provider_slot.take().unwrap_or_else(PerformanceProviders::none);
                        Box::new(move || {
                            performance::analyze(units_ref, &config_ref.performance, providers)
                        })
                    }
                };
                (phase, task)
            })
            .collect();

        let outcomes: Vec<(Phase, PhaseOutcome)> = if parallel {
            tasks
                .into_par_iter()
                .map(|(phase, task)| run_phase(&ctx, phase, task))
                .collect()
        } else {
            tasks
                .into_iter()
                .map(|(phase, task)| run_phase(&ctx, phase, task))
                .collect()
        };

        // Single aggregation point: every result and error is folded here,
        // never written from concurrent phases.
        *state.write() = AuditState::Aggregating;
        let mut phases = Vec::new();
        let mut failed_phases = Vec::new();
        let mut errors = Vec::new();
        for (phase, outcome) in outcomes {
            match outcome {
                PhaseOutcome::Completed(report) => phases.push(report),
                PhaseOutcome::Failed(err) => {
                    failed_phases.push(phase);
                    errors.push(ExecutionError {
                        phase,
                        category: err.category().to_string(),
                        message: err.to_string(),
                        remediation: err.remediation(),
                    });
                }
                PhaseOutcome::Cancelled => {
                    failed_phases.push(phase);
                    errors.push(ExecutionError {
                        phase,
                        category: "cancelled".to_string(),
                        message: "audit cancelled before this phase ran".to_string(),
                        remediation: "Re-run the audit to cover the remaining phases".to_string(),
                    });
                }
            }
        }

        let report = scoring::build_report(root, phases, failed_phases, errors);
        *state.write() = AuditState::Done;
        ctx.emit(AuditEvent::Finished);
        Ok(report)
    }
}

type PhaseTask<'a> = Box<dyn FnOnce() -> Result<PhaseReport, AuditError> + Send + 'a>;

struct RunContext<'a> {
    cancel: &'a CancellationToken,
    state: &'a RwLock<AuditState>,
    events: Option<&'a Sender<AuditEvent>>,
    completed: AtomicUsize,
    total: usize,
}

impl RunContext<'_> {
    fn emit(&self, event: AuditEvent) {
        if let Some(sender) = self.events {
            let _ = sender.send(event);
        }
    }
}

fn run_phase(ctx: &RunContext<'_>, phase: Phase, task: PhaseTask<'_>) -> (Phase, PhaseOutcome) {
    if ctx.cancel.is_cancelled() {
        return (phase, PhaseOutcome::Cancelled);
    }
    *ctx.state.write() = AuditState::Running(phase);
    ctx.emit(AuditEvent::PhaseStarted { phase });

    let outcome = match task() {
        Ok(report) => {
            ctx.emit(AuditEvent::PhaseCompleted {
                phase,
                report: report.clone(),
            });
            PhaseOutcome::Completed(report)
        }
        Err(err) => {
            ctx.emit(AuditEvent::PhaseFailed {
                phase,
                message: err.to_string(),
            });
            PhaseOutcome::Failed(err)
        }
    };

    let done = ctx.completed.fetch_add(1, Ordering::SeqCst) + 1;
    ctx.emit(AuditEvent::PhaseProgress {
        phase,
        percent: (done * 100 / ctx.total.max(1)) as u8,
    });
    (phase, outcome)
}

fn enabled_phases(config: &ReadymapConfig) -> Vec<Phase> {
    Phase::all()
        .into_iter()
        .filter(|phase| match phase {
            Phase::Complexity => config.phases.complexity,
            Phase::Security => config.phases.security,
            Phase::Compliance => config.phases.compliance,
            Phase::Performance => config.phases.performance,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn project_with_source() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("app.js"),
            "export function add(a, b) { return a + b; }\n",
        )
        .unwrap();
        dir
    }

    #[test]
    fn run_reaches_done_with_all_phases() {
        let dir = project_with_source();
        let auditor = Auditor::new(dir.path().to_path_buf(), ReadymapConfig::default());
        let state = auditor.state_handle();
        let report = auditor.run().unwrap();
        assert_eq!(*state.read(), AuditState::Done);
        assert_eq!(report.phases.len(), 4);
    }

    #[test]
    fn disabled_phases_are_not_run() {
        let dir = project_with_source();
        let mut config = ReadymapConfig::default();
        config.phases.performance = false;
        config.phases.compliance = false;
        let report = Auditor::new(dir.path().to_path_buf(), config).run().unwrap();
        assert_eq!(report.phases.len(), 2);
        assert!(report.errors.is_empty());
    }

    #[test]
    fn cancelled_run_preserves_nothing_but_reports() {
        let dir = project_with_source();
        let auditor = Auditor::new(dir.path().to_path_buf(), ReadymapConfig::default()).sequential();
        let token = auditor.cancellation_token();
        token.cancel();
        let report = auditor.run().unwrap();
        assert!(report.phases.is_empty());
        assert_eq!(report.errors.len(), 4);
        assert!(report.errors.iter().all(|e| e.category == "cancelled"));
    }

    #[test]
    fn missing_sources_is_the_only_fatal_case() {
        let dir = tempfile::tempdir().unwrap();
        let err = Auditor::new(dir.path().to_path_buf(), ReadymapConfig::default())
            .run()
            .unwrap_err();
        assert!(err.is_fatal());
    }
}
