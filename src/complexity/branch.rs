//! Branch classification for walkable syntax nodes.
//!
//! Node categories are a closed sum type so every metric matches on it
//! exhaustively instead of re-testing raw node kind strings.

use tree_sitter::Node;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BranchKind {
    If,
    While,
    DoWhile,
    For,
    ForIn,
    ForOf,
    Switch,
    /// A non-default `case` arm. `switch_default` is not a decision point.
    Case,
    Catch,
    Ternary,
    /// A short-circuit `&&` or `||` inside a boolean expression.
    LogicalOp,
}

impl BranchKind {
    /// Whether this construct deepens nesting for cognitive complexity and
    /// for the max-nesting metric. Flat constructs (`switch` arms, ternaries,
    /// short-circuit operators) read linearly and do not.
    pub fn nests(&self) -> bool {
        matches!(
            self,
            BranchKind::If
                | BranchKind::While
                | BranchKind::DoWhile
                | BranchKind::For
                | BranchKind::ForIn
                | BranchKind::ForOf
        )
    }

    /// Whether this construct counts toward the max simultaneous nesting
    /// depth of blocks and control constructs.
    pub fn tracks_depth(&self) -> bool {
        !matches!(
            self,
            BranchKind::Case | BranchKind::Ternary | BranchKind::LogicalOp
        )
    }
}

/// Map a tree-sitter node onto a [`BranchKind`], or `None` for nodes that
/// are not decision points.
pub fn classify(node: Node, source: &str) -> Option<BranchKind> {
    match node.kind() {
        "if_statement" => Some(BranchKind::If),
        "while_statement" => Some(BranchKind::While),
        "do_statement" => Some(BranchKind::DoWhile),
        "for_statement" => Some(BranchKind::For),
        // The grammar folds `for..in` and `for..of` into one kind,
        // distinguished by the operator field.
        "for_in_statement" => match operator_text(node, source) {
            Some("of") => Some(BranchKind::ForOf),
            _ => Some(BranchKind::ForIn),
        },
        "switch_statement" => Some(BranchKind::Switch),
        "switch_case" => Some(BranchKind::Case),
        "catch_clause" => Some(BranchKind::Catch),
        "ternary_expression" => Some(BranchKind::Ternary),
        "binary_expression" => match operator_text(node, source) {
            Some("&&") | Some("||") => Some(BranchKind::LogicalOp),
            _ => None,
        },
        _ => None,
    }
}

fn operator_text<'a>(node: Node, source: &'a str) -> Option<&'a str> {
    node.child_by_field_name("operator")
        .and_then(|op| op.utf8_text(source.as_bytes()).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::SourceUnit;
    use crate::parsing::parse_unit;
    use std::path::PathBuf;

    fn kinds_in(source: &str) -> Vec<BranchKind> {
        let unit = SourceUnit::new(PathBuf::from("t.js"), source.to_string());
        let tree = parse_unit(&unit).unwrap();
        let mut found = Vec::new();
        collect(tree.root_node(), source, &mut found);
        found
    }

    fn collect(node: tree_sitter::Node, source: &str, out: &mut Vec<BranchKind>) {
        if let Some(kind) = classify(node, source) {
            out.push(kind);
        }
        for child in node.children(&mut node.walk()) {
            collect(child, source, out);
        }
    }

    #[test]
    fn distinguishes_for_in_from_for_of() {
        assert_eq!(kinds_in("for (const k in obj) {}"), vec![BranchKind::ForIn]);
        assert_eq!(kinds_in("for (const v of arr) {}"), vec![BranchKind::ForOf]);
    }

    #[test]
    fn default_arm_is_not_a_case() {
        let kinds = kinds_in("switch (x) { case 1: break; default: break; }");
        assert_eq!(kinds, vec![BranchKind::Switch, BranchKind::Case]);
    }

    #[test]
    fn arithmetic_operators_are_not_branches() {
        assert!(kinds_in("const y = a + b * c;").is_empty());
        assert_eq!(kinds_in("const y = a && b;"), vec![BranchKind::LogicalOp]);
    }
}
