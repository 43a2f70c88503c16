//! Walks parsed trees and produces one [`FunctionRecord`] per
//! function-like node.

use super::branch::classify;
use super::cognitive::calculate_cognitive;
use super::cyclomatic::calculate_cyclomatic;
use crate::core::{ComplexityMetrics, FunctionRecord, SourceUnit};
use crate::parsing::parse_unit;
use crate::errors::AuditError;
use tree_sitter::Node;

pub fn extract_functions(unit: &SourceUnit) -> Result<Vec<FunctionRecord>, AuditError> {
    let tree = parse_unit(unit)?;
    let mut functions = Vec::new();
    visit_for_functions(tree.root_node(), unit, &mut functions);
    Ok(functions)
}

fn is_function_like(node: Node) -> bool {
    matches!(
        node.kind(),
        "function_declaration"
            | "function_expression"
            | "arrow_function"
            | "method_definition"
            | "generator_function_declaration"
            | "generator_function"
    )
}

fn visit_for_functions(node: Node, unit: &SourceUnit, functions: &mut Vec<FunctionRecord>) {
    if is_function_like(node) {
        functions.push(analyze_function(node, unit));
    }
    for child in node.children(&mut node.walk()) {
        visit_for_functions(child, unit, functions);
    }
}

fn analyze_function(node: Node, unit: &SourceUnit) -> FunctionRecord {
    let source = unit.content.as_str();
    let position = node.start_position();

    FunctionRecord {
        name: function_name(node, source),
        file: unit.path.clone(),
        line: position.row + 1,
        column: position.column,
        metrics: ComplexityMetrics {
            cyclomatic: calculate_cyclomatic(node, source),
            cognitive: calculate_cognitive(node, source),
            length: body_length(node),
            nesting: max_nesting(node, source),
            parameters: parameter_count(node),
        },
    }
}

/// Prefer the declared name; for function values assigned to a binding,
/// look one level up to the enclosing declarator, assignment target, or
/// object key. Otherwise `<anonymous>`, or `<unknown>` when the name node
/// is unreadable.
fn function_name(node: Node, source: &str) -> String {
    if let Some(name) = node.child_by_field_name("name") {
        return node_text(name, source);
    }

    if let Some(parent) = node.parent() {
        let binding = match parent.kind() {
            "variable_declarator" => parent.child_by_field_name("name"),
            "assignment_expression" => parent.child_by_field_name("left"),
            "pair" => parent.child_by_field_name("key"),
            _ => None,
        };
        if let Some(binding) = binding {
            return node_text(binding, source);
        }
    }

    "<anonymous>".to_string()
}

fn node_text(node: Node, source: &str) -> String {
    node.utf8_text(source.as_bytes())
        .map(|t| t.to_string())
        .unwrap_or_else(|_| "<unknown>".to_string())
}

/// Line count of the function body span, falling back to the whole node
/// for bodiless forms like `x => x + 1`.
fn body_length(node: Node) -> usize {
    let span = node.child_by_field_name("body").unwrap_or(node);
    span.end_position().row - span.start_position().row + 1
}

fn parameter_count(node: Node) -> usize {
    if let Some(params) = node.child_by_field_name("parameters") {
        return params
            .named_children(&mut params.walk())
            .filter(|c| c.kind() != "comment")
            .count();
    }
    // Arrow functions with a single bare parameter have no parameter list.
    usize::from(node.child_by_field_name("parameter").is_some())
}

/// Maximum simultaneous depth of nested control constructs, tracked by
/// passing the entered depth down the walk.
fn max_nesting(node: Node, source: &str) -> u32 {
    node.children(&mut node.walk())
        .map(|child| depth_below(child, source, 0))
        .max()
        .unwrap_or(0)
}

fn depth_below(node: Node, source: &str, current: u32) -> u32 {
    let entered = match classify(node, source) {
        Some(kind) if kind.tracks_depth() => current + 1,
        _ => current,
    };
    node.children(&mut node.walk())
        .map(|child| depth_below(child, source, entered))
        .max()
        .unwrap_or(entered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::SourceUnit;
    use indoc::indoc;
    use std::path::PathBuf;

    fn functions_in(source: &str) -> Vec<FunctionRecord> {
        let unit = SourceUnit::new(PathBuf::from("t.js"), source.to_string());
        extract_functions(&unit).unwrap()
    }

    #[test]
    fn declared_name_wins() {
        let fns = functions_in("function total(a, b) { return a + b; }");
        assert_eq!(fns.len(), 1);
        assert_eq!(fns[0].name, "total");
        assert_eq!(fns[0].metrics.parameters, 2);
        assert_eq!(fns[0].metrics.cyclomatic, 1);
        assert_eq!(fns[0].metrics.cognitive, 0);
    }

    #[test]
    fn arrow_takes_enclosing_binding_name() {
        let fns = functions_in("const handler = (e) => { e.stop(); };");
        assert_eq!(fns[0].name, "handler");
    }

    #[test]
    fn object_value_takes_key_name() {
        let fns = functions_in("const api = { fetchAll: function () { return []; } };");
        assert_eq!(fns[0].name, "fetchAll");
    }

    #[test]
    fn bare_callback_is_anonymous() {
        let fns = functions_in("items.forEach(function (item) { use(item); });");
        assert_eq!(fns[0].name, "<anonymous>");
    }

    #[test]
    fn single_bare_arrow_parameter_counts() {
        let fns = functions_in("const id = x => x;");
        assert_eq!(fns[0].metrics.parameters, 1);
    }

    #[test]
    fn nesting_tracks_maximum_depth() {
        let fns = functions_in(indoc! {"
            function deep(xs) {
                for (const x of xs) {
                    if (x) {
                        while (x.next) {
                            x.step();
                        }
                    }
                }
            }
        "});
        assert_eq!(fns[0].metrics.nesting, 3);
    }

    #[test]
    fn sequential_branches_do_not_deepen() {
        let fns = functions_in(indoc! {"
            function flat(a, b) {
                if (a) { log(a); }
                if (b) { log(b); }
            }
        "});
        assert_eq!(fns[0].metrics.nesting, 1);
        assert_eq!(fns[0].metrics.cyclomatic, 3);
    }

    #[test]
    fn body_length_counts_body_lines() {
        let fns = functions_in("function f() {\n  a();\n  b();\n}");
        assert_eq!(fns[0].metrics.length, 4);
    }
}
