use readymap::config::ReadymapConfig;
use readymap::core::{Phase, PhaseStatus, ReadinessTier, Severity};
use readymap::run_audit;
use std::fs;

fn write(dir: &std::path::Path, name: &str, content: &str) {
    if let Some(parent) = std::path::Path::new(name).parent() {
        fs::create_dir_all(dir.join(parent)).unwrap();
    }
    fs::write(dir.join(name), content).unwrap();
}

#[test]
fn audit_of_problematic_project_is_not_ready() {
    let dir = tempfile::tempdir().unwrap();
    let hex = "c0ffee00".repeat(8);
    write(
        dir.path(),
        "src/wallet.js",
        &format!(
            "export const signerKey = \"0x{hex}\";\nwindow.addEventListener('load', boot);\n"
        ),
    );
    write(
        dir.path(),
        "src/index.html",
        "<html><head></head><body><h1>App</h1><h3>Help</h3><img src=\"logo.png\"></body></html>",
    );
    write(dir.path(), "dist/main.js", &"x".repeat(700_000));

    let report = run_audit(dir.path(), ReadymapConfig::default()).unwrap();

    assert_eq!(report.phases.len(), 4);
    assert!(report.failed_phases.is_empty());
    assert_eq!(report.readiness, ReadinessTier::NotReady, "a wallet key is disqualifying");
    assert_eq!(report.overall_status, PhaseStatus::Failed);

    // Security found the key and redacted it everywhere in the report.
    let rendered = serde_json::to_string(&report).unwrap();
    assert!(
        !rendered.contains(&hex),
        "the raw key leaked into the serialized report"
    );
    assert!(report.count_by_severity(Severity::Critical) >= 1);

    // Performance saw the oversized dist bundle.
    let performance = report
        .phases
        .iter()
        .find(|p| p.phase == Phase::Performance)
        .unwrap();
    assert!(performance
        .violations
        .iter()
        .any(|v| v.rule == "performance/bundle-size"));

    // Recommendations lead with the critical fix.
    let first = report.recommendations.first().expect("recommendations present");
    assert_eq!(first.severity, Severity::Critical);
}

#[test]
fn audit_of_clean_project_is_production_ready() {
    let dir = tempfile::tempdir().unwrap();
    write(
        dir.path(),
        "src/math.js",
        "export function clamp(v, lo, hi) { return v < lo ? lo : v > hi ? hi : v; }\n",
    );
    write(
        dir.path(),
        "src/index.html",
        concat!(
            "<html lang=\"en\"><head><title>Calculator</title></head>",
            "<body><main><h1>Calculator</h1></main></body></html>"
        ),
    );
    write(dir.path(), "dist/app.js", &"y".repeat(30_000));

    let report = run_audit(dir.path(), ReadymapConfig::default()).unwrap();

    assert_eq!(report.overall_score, 100.0);
    assert_eq!(report.readiness, ReadinessTier::ProductionReady);
    // Load-time capability is absent, so the run degrades to warning
    // without losing any phase.
    assert_eq!(report.overall_status, PhaseStatus::Warning);
    assert!(report.errors.is_empty());
}

#[test]
fn config_file_in_root_is_honored() {
    let dir = tempfile::tempdir().unwrap();
    write(
        dir.path(),
        "readymap.toml",
        "[phases]\nperformance = false\ncompliance = false\n\n[complexity]\nmax_parameters = 2\n",
    );
    write(
        dir.path(),
        "src/app.js",
        "export function join(a, b, c) { return [a, b, c].join('-'); }\n",
    );

    let config = ReadymapConfig::load(dir.path()).unwrap();
    let report = run_audit(dir.path(), config).unwrap();

    assert_eq!(report.phases.len(), 2, "disabled phases do not run");
    let complexity = report
        .phases
        .iter()
        .find(|p| p.phase == Phase::Complexity)
        .unwrap();
    assert!(
        complexity
            .violations
            .iter()
            .any(|v| v.rule == "complexity/parameters"),
        "tightened threshold flags the three-parameter function"
    );
}
