use indoc::indoc;
use pretty_assertions::assert_eq;
use readymap::complexity::{self, walker::extract_functions};
use readymap::config::ComplexityConfig;
use readymap::core::{PhaseStatus, Severity, SourceUnit};
use std::path::PathBuf;

fn unit(source: &str) -> SourceUnit {
    SourceUnit::new(PathBuf::from("sample.js"), source.to_string())
}

#[test]
fn straight_line_function_has_base_metrics() {
    let functions = extract_functions(&unit(indoc! {"
        function format(value) {
            const text = String(value);
            return text.trim();
        }
    "}))
    .unwrap();

    assert_eq!(functions.len(), 1);
    let metrics = &functions[0].metrics;
    assert_eq!(metrics.cyclomatic, 1, "no control flow means one path");
    assert_eq!(metrics.cognitive, 0, "no branching means zero cognitive load");
}

#[test]
fn single_if_is_cyclomatic_two_cognitive_one() {
    let functions = extract_functions(&unit(indoc! {"
        function guard(x) {
            if (x > 0) {
                return x;
            }
            return 0;
        }
    "}))
    .unwrap();

    let metrics = &functions[0].metrics;
    assert_eq!(metrics.cyclomatic, 2);
    assert_eq!(metrics.cognitive, 1, "if at nesting level 0 contributes 1 + 0");
}

#[test]
fn if_nested_in_while_has_cognitive_three() {
    let functions = extract_functions(&unit(indoc! {"
        function drain(queue) {
            while (queue.length) {
                if (queue[0].ready) {
                    queue.shift();
                }
            }
        }
    "}))
    .unwrap();

    let metrics = &functions[0].metrics;
    // while contributes 1 + 0, the nested if contributes 1 + 1
    assert_eq!(metrics.cognitive, 3);
    assert_eq!(metrics.cyclomatic, 3);
    assert_eq!(metrics.nesting, 2);
}

#[test]
fn scenario_two_ifs_six_parameters() {
    // A short function with two sequential ifs and six parameters at the
    // default thresholds: cyclomatic 3 is under the limit, nesting is
    // fine, only the parameter count violates, at Medium.
    let source = indoc! {"
        function submitOrder(user, cart, coupon, shipping, billing, notes) {
            if (coupon) {
                cart.applyCoupon(coupon);
            }
            if (notes) {
                cart.attachNotes(notes);
            }
            return cart.submit(user, shipping, billing);
        }
    "};
    let config = ComplexityConfig::default();
    let report = complexity::build_report(&[unit(source)], &config);

    assert_eq!(report.total_functions, 1);
    assert_eq!(report.functions[0].metrics.cyclomatic, 3);
    assert_eq!(report.functions[0].metrics.parameters, 6);

    assert_eq!(report.violations.len(), 1, "only the parameter threshold trips");
    let violation = &report.violations[0];
    assert_eq!(violation.rule, "complexity/parameters");
    assert_eq!(violation.severity, Severity::Medium);

    let phase = complexity::analyze(&[unit(source)], &config);
    assert_eq!(phase.score, 95.0, "exactly one Medium penalty of 5 points");
    assert_eq!(phase.status, PhaseStatus::Warning);
}

#[test]
fn ternary_and_logical_operators_count_as_decision_points() {
    let functions = extract_functions(&unit(
        "function pick(a, b, fallback) { return a && b ? a : fallback; }",
    ))
    .unwrap();

    // base 1 + && + ternary
    assert_eq!(functions[0].metrics.cyclomatic, 3);
}

#[test]
fn methods_and_arrows_are_walked() {
    let functions = extract_functions(&unit(indoc! {"
        class Store {
            load(id) {
                return this.cache[id];
            }
        }
        const refresh = async () => {
            await store.sync();
        };
    "}))
    .unwrap();

    let names: Vec<&str> = functions.iter().map(|f| f.name.as_str()).collect();
    assert!(names.contains(&"load"));
    assert!(names.contains(&"refresh"));
}

#[test]
fn typescript_sources_parse_with_annotations() {
    let unit = SourceUnit::new(
        PathBuf::from("service.ts"),
        indoc! {"
            export function toMap(items: Item[]): Map<string, Item> {
                const out = new Map<string, Item>();
                for (const item of items) {
                    out.set(item.id, item);
                }
                return out;
            }
        "}
        .to_string(),
    );
    let functions = extract_functions(&unit).unwrap();
    assert_eq!(functions[0].metrics.cyclomatic, 2, "the for-of loop branches once");
    assert_eq!(functions[0].metrics.parameters, 1);
}

#[test]
fn average_overflow_subtracts_from_phase_score() {
    // One function with cyclomatic 12 at threshold 10: one Medium
    // violation (5) plus 2 * (12 - 10) average penalty.
    let mut branches = String::new();
    for i in 0..11 {
        branches.push_str(&format!("    if (flags[{i}]) {{ count += 1; }}\n"));
    }
    let source = format!("function tally(flags) {{\n    let count = 0;\n{branches}    return count;\n}}\n");
    let phase = complexity::analyze(&[unit(&source)], &ComplexityConfig::default());

    // cyclomatic = 12: Medium violation, avg 12 > 10
    assert_eq!(phase.score, 100.0 - 5.0 - 4.0);
}
