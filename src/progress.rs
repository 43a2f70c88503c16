//! Progress feedback for long-running audits.
//!
//! The orchestrator pushes [`AuditEvent`]s over a channel; this module
//! renders them as an indicatif progress bar. Output is suppressed in
//! quiet mode and when stderr is not a terminal, so CI logs stay clean.

use crate::orchestrator::AuditEvent;
use crossbeam::channel::Receiver;
use indicatif::{ProgressBar, ProgressStyle};
use std::io::IsTerminal;

pub const TEMPLATE_PHASES: &str = "{spinner} {msg} [{bar:30}] {pos}/{len} phases";

#[derive(Debug, Clone, Default)]
pub struct ProgressConfig {
    pub quiet_mode: bool,
    pub verbosity: u8,
}

impl ProgressConfig {
    pub fn from_env(quiet: bool, verbosity: u8) -> Self {
        let env_quiet = std::env::var("READYMAP_QUIET").is_ok();
        Self {
            quiet_mode: quiet || env_quiet,
            verbosity,
        }
    }

    pub fn should_show_progress(&self) -> bool {
        if self.quiet_mode {
            return false;
        }
        std::io::stderr().is_terminal()
    }
}

pub struct ProgressManager {
    config: ProgressConfig,
}

impl ProgressManager {
    pub fn new(config: ProgressConfig) -> Self {
        Self { config }
    }

    fn create_bar(&self, total: u64) -> ProgressBar {
        if !self.config.should_show_progress() {
            return ProgressBar::hidden();
        }
        let bar = ProgressBar::new(total);
        bar.set_style(
            ProgressStyle::with_template(TEMPLATE_PHASES)
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );
        bar
    }

    /// Consume orchestrator events on a background thread, driving a
    /// phase-level progress bar. Returns a handle to join after the run.
    pub fn attach(
        &self,
        events: Receiver<AuditEvent>,
        total_phases: u64,
    ) -> std::thread::JoinHandle<()> {
        let bar = self.create_bar(total_phases);
        let verbose = self.config.verbosity > 0;

        std::thread::spawn(move || {
            for event in events.iter() {
                match event {
                    AuditEvent::PhaseStarted { phase } => {
                        bar.set_message(format!("running {phase}"));
                    }
                    AuditEvent::PhaseCompleted { phase, report } => {
                        bar.inc(1);
                        if verbose {
                            bar.println(format!(
                                "{phase}: {:.1} ({})",
                                report.score, report.status
                            ));
                        }
                    }
                    AuditEvent::PhaseFailed { phase, message } => {
                        bar.inc(1);
                        bar.println(format!("{phase} did not run: {message}"));
                    }
                    AuditEvent::PhaseProgress { .. } => {}
                    AuditEvent::Finished => break,
                }
            }
            bar.finish_and_clear();
        })
    }
}
