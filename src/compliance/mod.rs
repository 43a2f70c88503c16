//! Accessibility / compliance scanner phase.

pub mod contextual;
pub mod rules;

use crate::config::ComplianceConfig;
use crate::core::{
    clamp_score, ComplianceLevel, Language, Phase, PhaseReport, PhaseStatus, PhaseSummary,
    Severity, SourceUnit, Violation, WcagLevel,
};
use crate::scan::{scan_source, suppression::SuppressionContext};
use rayon::prelude::*;

pub fn analyze(units: &[SourceUnit], config: &ComplianceConfig) -> PhaseReport {
    let markup_units: Vec<&SourceUnit> = units
        .iter()
        .filter(|u| is_markup_unit(u, config))
        .collect();

    let mut violations: Vec<Violation> = markup_units
        .par_iter()
        .flat_map_iter(|unit| scan_unit(unit, config).into_iter())
        .collect();
    violations.sort_by(|a, b| (&a.file, a.line).cmp(&(&b.file, b.line)));

    let level = compliance_level(&violations);

    let mut score = 100.0;
    for violation in &violations {
        score -= violation.severity.score_penalty();
    }
    let score = clamp_score(score);

    let status = if level == ComplianceLevel::NonCompliant || score < 50.0 {
        PhaseStatus::Failed
    } else if violations.is_empty() {
        PhaseStatus::Passed
    } else {
        PhaseStatus::Warning
    };

    PhaseReport {
        phase: Phase::Compliance,
        score,
        status,
        summary: PhaseSummary::Compliance {
            level,
            files_checked: markup_units.len(),
        },
        violations,
        notes: Vec::new(),
    }
}

fn is_markup_unit(unit: &SourceUnit, config: &ComplianceConfig) -> bool {
    match unit.extension() {
        Some(ext) => {
            config.markup_extensions.iter().any(|e| e == ext) || unit.language == Language::Css
        }
        None => false,
    }
}

fn scan_unit(unit: &SourceUnit, config: &ComplianceConfig) -> Vec<Violation> {
    let suppressions = SuppressionContext::parse(&unit.content);
    let mut violations = Vec::new();

    // Pattern rules, filtered to the configured conformance target.
    for entry in rules::COMPLIANCE_RULES
        .iter()
        .filter(|r| r.level <= config.min_level)
    {
        for m in scan_source(&unit.content, std::slice::from_ref(&entry.rule)) {
            violations.push(Violation {
                rule: m.rule_id.to_string(),
                severity: m.severity,
                file: unit.path.clone(),
                line: m.line,
                column: m.column,
                message: m.description.to_string(),
                recommendation: m.recommendation.to_string(),
                excerpt: Some(first_line(&m.text)),
            });
        }
    }

    if unit.language == Language::Html {
        violations.extend(contextual::check_heading_order(unit));
        violations.extend(contextual::check_document_structure(unit));
    }
    if matches!(unit.language, Language::Html | Language::Css)
        && WcagLevel::AA <= config.min_level
    {
        violations.extend(contextual::check_contrast(unit));
    }

    violations.retain(|v| !suppressions.is_suppressed(v.line, &v.rule));
    violations
}

fn first_line(text: &str) -> String {
    text.lines().next().unwrap_or("").trim().to_string()
}

/// Level achieved by the filtered violation set: any High/Critical means
/// non-compliant; otherwise the level is the highest tier with no
/// remaining violations of its own.
pub fn compliance_level(violations: &[Violation]) -> ComplianceLevel {
    if violations
        .iter()
        .any(|v| v.severity >= Severity::High)
    {
        return ComplianceLevel::NonCompliant;
    }

    let has_level = |level: WcagLevel| {
        violations
            .iter()
            .any(|v| rules::level_of(&v.rule) == level)
    };

    if !has_level(WcagLevel::AA) {
        ComplianceLevel::AA
    } else if !has_level(WcagLevel::A) {
        ComplianceLevel::A
    } else {
        ComplianceLevel::NonCompliant
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;
    use std::path::PathBuf;

    fn html(source: &str) -> SourceUnit {
        SourceUnit::new(PathBuf::from("index.html"), source.to_string())
    }

    fn analyze_html(source: &str) -> PhaseReport {
        analyze(&[html(source)], &ComplianceConfig::default())
    }

    const CLEAN_PAGE: &str = indoc! {r#"
        <html lang="en">
        <head><title>Dashboard</title></head>
        <body>
        <main>
        <h1>Dashboard</h1>
        <h2>Totals</h2>
        <img src="chart.png" alt="Monthly totals chart">
        </main>
        </body>
        </html>
    "#};

    #[test]
    fn clean_page_reaches_aa() {
        let report = analyze_html(CLEAN_PAGE);
        assert_eq!(report.status, PhaseStatus::Passed);
        assert_eq!(
            report.summary,
            PhaseSummary::Compliance {
                level: ComplianceLevel::AA,
                files_checked: 1
            }
        );
    }

    #[test]
    fn missing_alt_is_non_compliant() {
        let report = analyze_html(indoc! {r#"
            <html lang="en">
            <head><title>Gallery</title></head>
            <body><main><img src="photo.jpg"></main></body>
            </html>
        "#});
        assert_eq!(report.status, PhaseStatus::Failed);
        let violation = report
            .violations
            .iter()
            .find(|v| v.rule == "a11y/img-alt")
            .unwrap();
        assert_eq!(violation.severity, Severity::High);
        assert!(matches!(
            report.summary,
            PhaseSummary::Compliance {
                level: ComplianceLevel::NonCompliant,
                ..
            }
        ));
    }

    #[test]
    fn medium_aa_violation_caps_level_at_a() {
        // Only an AA-level violation (removed focus outline) remains.
        let report = analyze(
            &[SourceUnit::new(
                PathBuf::from("styles.css"),
                "button:focus { outline: none; }".to_string(),
            )],
            &ComplianceConfig::default(),
        );
        assert_eq!(report.status, PhaseStatus::Warning);
        assert!(matches!(
            report.summary,
            PhaseSummary::Compliance {
                level: ComplianceLevel::A,
                ..
            }
        ));
    }

    #[test]
    fn script_files_are_not_markup_scanned() {
        let report = analyze(
            &[SourceUnit::new(
                PathBuf::from("app.js"),
                "render('<img src=\"x.png\">');".to_string(),
            )],
            &ComplianceConfig::default(),
        );
        assert!(report.violations.is_empty());
    }

    #[test]
    fn jsx_click_handlers_are_checked() {
        let report = analyze(
            &[SourceUnit::new(
                PathBuf::from("Button.tsx"),
                "export const B = () => <div onClick={go}>Go</div>;".to_string(),
            )],
            &ComplianceConfig::default(),
        );
        assert!(report
            .violations
            .iter()
            .any(|v| v.rule == "a11y/click-no-keyboard"));
    }
}
