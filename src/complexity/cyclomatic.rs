//! Cyclomatic complexity as a direct decision-point count.
//!
//! Starts at 1 for the single implicit path and adds 1 for every branch
//! construct in the function's subtree. This is McCabe's approximation for
//! structured code, not an edge/node graph computation.

use super::branch::classify;
use tree_sitter::Node;

pub fn calculate_cyclomatic(function: Node, source: &str) -> u32 {
    1 + count_decision_points(function, source)
}

fn count_decision_points(node: Node, source: &str) -> u32 {
    let own = u32::from(classify(node, source).is_some());
    let children: u32 = node
        .children(&mut node.walk())
        .map(|child| count_decision_points(child, source))
        .sum();
    own + children
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::SourceUnit;
    use crate::parsing::parse_unit;
    use std::path::PathBuf;

    fn cyclomatic_of(source: &str) -> u32 {
        let unit = SourceUnit::new(PathBuf::from("t.js"), source.to_string());
        let tree = parse_unit(&unit).unwrap();
        calculate_cyclomatic(tree.root_node(), source)
    }

    #[test]
    fn straight_line_code_is_one() {
        assert_eq!(cyclomatic_of("function f() { return 1; }"), 1);
    }

    #[test]
    fn each_if_adds_one() {
        assert_eq!(
            cyclomatic_of("function f(a, b) { if (a) { return 1; } if (b) { return 2; } }"),
            3
        );
    }

    #[test]
    fn switch_counts_statement_and_arms() {
        // switch itself plus two non-default cases
        assert_eq!(
            cyclomatic_of(
                "function f(x) { switch (x) { case 1: return 1; case 2: return 2; default: return 0; } }"
            ),
            4
        );
    }

    #[test]
    fn short_circuit_operators_count() {
        assert_eq!(cyclomatic_of("function f(a, b, c) { return a && b || c; }"), 3);
    }

    #[test]
    fn ternary_and_catch_count() {
        assert_eq!(
            cyclomatic_of("function f(x) { try { return x ? 1 : 2; } catch (e) { return 0; } }"),
            3
        );
    }
}
