//! Typed errors for audit operations.
//!
//! Every error carries enough context for the orchestrator to attribute it
//! to exactly one phase and to degrade rather than abort: configuration
//! problems are fatal to the affected phase only, missing capabilities
//! degrade a phase to a partial report, and a single unreadable file never
//! stops a scan. Only [`AuditError::NoSources`] is fatal to the whole run.

use crate::core::Severity;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuditError {
    /// No parseable project configuration, or a threshold outside its
    /// valid range. Fatal to the affected phase only.
    #[error("configuration error: {message}")]
    Configuration {
        message: String,
        path: Option<PathBuf>,
    },

    /// An external capability (build artifacts, measurement tool) is not
    /// available. The phase degrades to a zeroed or partial report.
    #[error("capability unavailable: {capability}: {message}")]
    CapabilityUnavailable {
        capability: &'static str,
        message: String,
    },

    /// A single file could not be read or parsed. The file is skipped and
    /// the phase continues.
    #[error("scan failure in {}: {message}", path.display())]
    ScanFailure { path: PathBuf, message: String },

    /// A bounded external call did not complete in time. Treated as a
    /// phase failure.
    #[error("{capability} timed out after {seconds}s")]
    Timeout {
        capability: &'static str,
        seconds: u64,
    },

    /// No auditable source files under the given root. The only error
    /// fatal to the entire run.
    #[error("no auditable source files under {}", root.display())]
    NoSources { root: PathBuf },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl AuditError {
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
            path: None,
        }
    }

    pub fn configuration_in(message: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self::Configuration {
            message: message.into(),
            path: Some(path.into()),
        }
    }

    pub fn capability(capability: &'static str, message: impl Into<String>) -> Self {
        Self::CapabilityUnavailable {
            capability,
            message: message.into(),
        }
    }

    pub fn scan(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::ScanFailure {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Category tag used when recording the error in a report.
    pub fn category(&self) -> &'static str {
        match self {
            Self::Configuration { .. } => "configuration",
            Self::CapabilityUnavailable { .. } => "capability_unavailable",
            Self::ScanFailure { .. } => "scan_failure",
            Self::Timeout { .. } => "timeout",
            Self::NoSources { .. } => "no_sources",
            Self::Io(_) => "io",
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            Self::NoSources { .. } => Severity::Critical,
            Self::Configuration { .. } | Self::Timeout { .. } => Severity::High,
            Self::CapabilityUnavailable { .. } => Severity::Medium,
            Self::ScanFailure { .. } | Self::Io(_) => Severity::Low,
        }
    }

    pub fn remediation(&self) -> String {
        match self {
            Self::Configuration { path, .. } => match path {
                Some(p) => format!("Fix the configuration at {}", p.display()),
                None => "Check readymap.toml threshold values".to_string(),
            },
            Self::CapabilityUnavailable { capability, .. } => {
                format!("Provide the {capability} capability or disable the phase")
            }
            Self::ScanFailure { path, .. } => {
                format!("Verify {} is readable and valid UTF-8", path.display())
            }
            Self::Timeout { capability, .. } => {
                format!("Increase the {capability} timeout or run the step manually")
            }
            Self::NoSources { root } => {
                format!("Point readymap at a directory containing source files, not {}", root.display())
            }
            Self::Io(_) => "Check file system permissions".to_string(),
        }
    }

    /// Whether this error aborts the whole run rather than one phase.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::NoSources { .. })
    }
}

pub type Result<T> = std::result::Result<T, AuditError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_no_sources_is_fatal() {
        assert!(AuditError::NoSources {
            root: PathBuf::from("/tmp/empty")
        }
        .is_fatal());
        assert!(!AuditError::capability("build artifacts", "dist/ missing").is_fatal());
        assert!(!AuditError::configuration("max_cyclomatic must be >= 1").is_fatal());
    }

    #[test]
    fn categories_are_stable() {
        assert_eq!(
            AuditError::capability("load metrics", "none").category(),
            "capability_unavailable"
        );
        assert_eq!(
            AuditError::scan("a.js", "bad utf8").category(),
            "scan_failure"
        );
    }
}
