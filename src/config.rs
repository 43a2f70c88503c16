use crate::core::WcagLevel;
use crate::errors::AuditError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Root configuration, loaded from `readymap.toml` when present.
///
/// Every threshold has a documented default applied when unspecified, so an
/// empty file and a missing file behave identically.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReadymapConfig {
    #[serde(default)]
    pub phases: PhaseToggles,

    #[serde(default)]
    pub complexity: ComplexityConfig,

    #[serde(default)]
    pub security: SecurityConfig,

    #[serde(default)]
    pub compliance: ComplianceConfig,

    #[serde(default)]
    pub performance: PerformanceConfig,

    #[serde(default)]
    pub coverage: CoverageConfig,

    #[serde(default)]
    pub io: IoConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PhaseToggles {
    #[serde(default = "default_true")]
    pub complexity: bool,
    #[serde(default = "default_true")]
    pub security: bool,
    #[serde(default = "default_true")]
    pub compliance: bool,
    #[serde(default = "default_true")]
    pub performance: bool,
}

impl Default for PhaseToggles {
    fn default() -> Self {
        Self {
            complexity: true,
            security: true,
            compliance: true,
            performance: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ComplexityConfig {
    /// Maximum cyclomatic complexity per function.
    #[serde(default = "default_max_cyclomatic")]
    pub max_cyclomatic: u32,

    /// Maximum function length in lines.
    #[serde(default = "default_max_length")]
    pub max_length: usize,

    /// Maximum nesting depth.
    #[serde(default = "default_max_nesting")]
    pub max_nesting: u32,

    /// Maximum declared parameter count.
    #[serde(default = "default_max_parameters")]
    pub max_parameters: usize,
}

impl Default for ComplexityConfig {
    fn default() -> Self {
        Self {
            max_cyclomatic: default_max_cyclomatic(),
            max_length: default_max_length(),
            max_nesting: default_max_nesting(),
            max_parameters: default_max_parameters(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SecurityConfig {
    /// Exposure risk at or above which the phase fails, on the [0, 10] scale.
    #[serde(default = "default_risk_threshold")]
    pub risk_threshold: f64,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            risk_threshold: default_risk_threshold(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ComplianceConfig {
    /// Minimum WCAG level rules are filtered to before computing the
    /// compliance level.
    #[serde(default = "default_min_level")]
    pub min_level: WcagLevel,

    /// Extensions treated as markup; contextual document checks (heading
    /// order, landmarks, document language) run only on these.
    #[serde(default = "default_markup_extensions")]
    pub markup_extensions: Vec<String>,
}

impl Default for ComplianceConfig {
    fn default() -> Self {
        Self {
            min_level: default_min_level(),
            markup_extensions: default_markup_extensions(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PerformanceConfig {
    /// Maximum total bundle size in bytes.
    #[serde(default = "default_max_bundle_bytes")]
    pub max_bundle_bytes: u64,

    /// Maximum initial load time in milliseconds.
    #[serde(default = "default_max_initial_load_ms")]
    pub max_initial_load_ms: f64,

    /// Ceiling for a single operation's execution cost estimate.
    #[serde(default = "default_cost_ceiling")]
    pub cost_ceiling: u64,

    /// Directories probed for build artifacts, relative to the project root.
    #[serde(default = "default_artifact_dirs")]
    pub artifact_dirs: Vec<String>,

    /// Bound on external capability calls, in seconds.
    #[serde(default = "default_capability_timeout_secs")]
    pub capability_timeout_secs: u64,
}

impl Default for PerformanceConfig {
    fn default() -> Self {
        Self {
            max_bundle_bytes: default_max_bundle_bytes(),
            max_initial_load_ms: default_max_initial_load_ms(),
            cost_ceiling: default_cost_ceiling(),
            artifact_dirs: default_artifact_dirs(),
            capability_timeout_secs: default_capability_timeout_secs(),
        }
    }
}

/// Recognized for report context; readymap does not parse coverage data
/// itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CoverageConfig {
    #[serde(default = "default_min_coverage")]
    pub min_percent: f64,
}

impl Default for CoverageConfig {
    fn default() -> Self {
        Self {
            min_percent: default_min_coverage(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IoConfig {
    /// Glob patterns excluded from enumeration, in addition to gitignore
    /// rules and dependency directories.
    #[serde(default)]
    pub ignore: Vec<String>,
}

fn default_true() -> bool {
    true
}
fn default_max_cyclomatic() -> u32 {
    10
}
fn default_max_length() -> usize {
    50
}
fn default_max_nesting() -> u32 {
    3
}
fn default_max_parameters() -> usize {
    5
}
fn default_risk_threshold() -> f64 {
    8.0
}
fn default_min_level() -> WcagLevel {
    WcagLevel::AA
}
fn default_markup_extensions() -> Vec<String> {
    ["html", "htm", "jsx", "tsx", "vue", "svelte"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}
fn default_max_bundle_bytes() -> u64 {
    512_000
}
fn default_max_initial_load_ms() -> f64 {
    3000.0
}
fn default_cost_ceiling() -> u64 {
    500_000
}
fn default_artifact_dirs() -> Vec<String> {
    ["dist", "build", "out"].iter().map(|s| s.to_string()).collect()
}
fn default_capability_timeout_secs() -> u64 {
    30
}
fn default_min_coverage() -> f64 {
    80.0
}

impl ReadymapConfig {
    /// Load `readymap.toml` from the project root, falling back to defaults
    /// when absent. A present-but-invalid file is a configuration error.
    pub fn load(root: &Path) -> Result<Self, AuditError> {
        let path = root.join("readymap.toml");
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = fs::read_to_string(&path).map_err(|e| {
            AuditError::configuration_in(format!("cannot read config: {e}"), &path)
        })?;
        let config: Self = toml::from_str(&raw).map_err(|e| {
            AuditError::configuration_in(format!("cannot parse config: {e}"), &path)
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), AuditError> {
        if self.complexity.max_cyclomatic == 0 {
            return Err(AuditError::configuration("max_cyclomatic must be >= 1"));
        }
        if self.complexity.max_length == 0 {
            return Err(AuditError::configuration("max_length must be >= 1"));
        }
        if !(0.0..=10.0).contains(&self.security.risk_threshold) {
            return Err(AuditError::configuration(
                "risk_threshold must be between 0 and 10",
            ));
        }
        if !(0.0..=100.0).contains(&self.coverage.min_percent) {
            return Err(AuditError::configuration(
                "coverage min_percent must be between 0 and 100",
            ));
        }
        if self.performance.capability_timeout_secs == 0 {
            return Err(AuditError::configuration(
                "capability_timeout_secs must be >= 1",
            ));
        }
        Ok(())
    }
}

/// Template written by `readymap init`.
pub fn default_config_template() -> String {
    let config = ReadymapConfig::default();
    toml::to_string_pretty(&config).expect("default config serializes")
}
