use indoc::indoc;
use readymap::compliance;
use readymap::config::ComplianceConfig;
use readymap::core::{ComplianceLevel, PhaseStatus, PhaseSummary, SourceUnit, WcagLevel};
use std::path::PathBuf;

fn html_unit(source: &str) -> SourceUnit {
    SourceUnit::new(PathBuf::from("index.html"), source.to_string())
}

fn analyze_default(units: &[SourceUnit]) -> readymap::core::PhaseReport {
    compliance::analyze(units, &ComplianceConfig::default())
}

const BROKEN_PAGE: &str = indoc! {r#"
    <html>
    <head></head>
    <body>
    <h1>Shop</h1>
    <h4>Deals</h4>
    <img src="banner.png">
    <input name="email">
    <div onclick="openCart()">Cart</div>
    <span tabindex="3">skip me</span>
    <a aria-hidden="true" href="/hidden">ghost</a>
    </body>
    </html>
"#};

#[test]
fn broken_page_collects_expected_rules() {
    let report = analyze_default(&[html_unit(BROKEN_PAGE)]);
    let rules: Vec<&str> = report.violations.iter().map(|v| v.rule.as_str()).collect();

    assert!(rules.contains(&"a11y/doc-language"), "missing lang attribute");
    assert!(rules.contains(&"a11y/heading-skip"), "h1 -> h4 jump");
    assert!(rules.contains(&"a11y/img-alt"));
    assert!(rules.contains(&"a11y/input-label"));
    assert!(rules.contains(&"a11y/click-no-keyboard"));
    assert!(rules.contains(&"a11y/positive-tabindex"));
    assert!(rules.contains(&"a11y/aria-hidden-focusable"));
    assert!(rules.contains(&"a11y/main-landmark"));
    assert!(rules.contains(&"a11y/missing-title"));
}

#[test]
fn broken_page_is_non_compliant_and_failed() {
    let report = analyze_default(&[html_unit(BROKEN_PAGE)]);
    assert_eq!(report.status, PhaseStatus::Failed);
    assert!(matches!(
        report.summary,
        PhaseSummary::Compliance {
            level: ComplianceLevel::NonCompliant,
            files_checked: 1
        }
    ));
}

#[test]
fn compliant_page_reports_aa() {
    let report = analyze_default(&[html_unit(indoc! {r#"
        <html lang="en">
        <head><title>Storefront</title></head>
        <body>
        <main>
        <h1>Shop</h1>
        <h2>Deals</h2>
        <img src="banner.png" alt="Spring sale banner">
        <label for="email">Email</label>
        <input id="email" name="email" type="email">
        <button onclick="openCart()">Cart</button>
        </main>
        </body>
        </html>
    "#})]);

    assert_eq!(report.status, PhaseStatus::Passed);
    assert_eq!(report.score, 100.0);
    assert!(matches!(
        report.summary,
        PhaseSummary::Compliance {
            level: ComplianceLevel::AA,
            ..
        }
    ));
}

#[test]
fn min_level_a_skips_aa_rules() {
    let css = SourceUnit::new(
        PathBuf::from("theme.css"),
        "a:focus { outline: none; }".to_string(),
    );
    let mut config = ComplianceConfig::default();
    config.min_level = WcagLevel::A;

    let report = compliance::analyze(std::slice::from_ref(&css), &config);
    assert!(
        report.violations.is_empty(),
        "AA-only rules must not run at min level A"
    );

    config.min_level = WcagLevel::AA;
    let report = compliance::analyze(std::slice::from_ref(&css), &config);
    assert_eq!(report.violations.len(), 1);
}

#[test]
fn low_contrast_pair_is_detected_in_css() {
    let css = SourceUnit::new(
        PathBuf::from("theme.css"),
        ".muted { color: #aaaaaa; background-color: #ffffff; }".to_string(),
    );
    let report = analyze_default(&[css]);
    assert!(report
        .violations
        .iter()
        .any(|v| v.rule == "a11y/low-contrast"));
}

#[test]
fn video_without_track_is_flagged() {
    let report = analyze_default(&[html_unit(indoc! {r#"
        <html lang="en">
        <head><title>Media</title></head>
        <body><main>
        <video src="intro.mp4" controls></video>
        </main></body>
        </html>
    "#})]);
    assert!(report
        .violations
        .iter()
        .any(|v| v.rule == "a11y/video-captions"));

    let report = analyze_default(&[html_unit(indoc! {r#"
        <html lang="en">
        <head><title>Media</title></head>
        <body><main>
        <video src="intro.mp4" controls>
            <track kind="captions" src="intro.vtt">
        </video>
        </main></body>
        </html>
    "#})]);
    assert!(!report
        .violations
        .iter()
        .any(|v| v.rule == "a11y/video-captions"));
}

#[test]
fn non_markup_extensions_are_ignored() {
    let script = SourceUnit::new(
        PathBuf::from("worker.js"),
        "const template = '<img src=\"x.png\">';".to_string(),
    );
    let report = analyze_default(&[script]);
    assert!(report.violations.is_empty());
    assert!(matches!(
        report.summary,
        PhaseSummary::Compliance { files_checked: 0, .. }
    ));
}
