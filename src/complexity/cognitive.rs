//! Cognitive complexity: nesting-weighted branching.
//!
//! Control flow adds `1 + nesting level` and deepens nesting for its
//! children; `switch`, `catch`, ternaries and short-circuit operators add a
//! flat 1 without nesting. Shallow code therefore scores better than merely
//! infrequent branching. Nesting state is threaded as an explicit parameter
//! rather than captured in a mutable counter.

use super::branch::{classify, BranchKind};
use tree_sitter::Node;

pub fn calculate_cognitive(function: Node, source: &str) -> u32 {
    sum_children(function, source, 0)
}

fn walk(node: Node, source: &str, nesting: u32) -> u32 {
    match classify(node, source) {
        Some(kind) => match kind {
            BranchKind::If
            | BranchKind::While
            | BranchKind::DoWhile
            | BranchKind::For
            | BranchKind::ForIn
            | BranchKind::ForOf => 1 + nesting + sum_children(node, source, nesting + 1),
            BranchKind::Switch
            | BranchKind::Catch
            | BranchKind::Ternary
            | BranchKind::LogicalOp => 1 + sum_children(node, source, nesting),
            BranchKind::Case => sum_children(node, source, nesting),
        },
        None => sum_children(node, source, nesting),
    }
}

fn sum_children(node: Node, source: &str, nesting: u32) -> u32 {
    node.children(&mut node.walk())
        .map(|child| walk(child, source, nesting))
        .sum()
}
