//! Syntax-tree provider backed by tree-sitter.
//!
//! readymap interprets trees; producing them is this module's whole job.
//! Parsers are constructed per call since `tree_sitter::Parser` holds
//! mutable cursor state and files are parsed from parallel workers.

use crate::core::{Language, SourceUnit};
use crate::errors::AuditError;
use std::path::Path;
use tree_sitter::{Parser, Tree};

pub fn parse_unit(unit: &SourceUnit) -> Result<Tree, AuditError> {
    let mut parser = Parser::new();
    let language: tree_sitter::Language = match unit.language {
        Language::JavaScript => tree_sitter_javascript::LANGUAGE.into(),
        Language::TypeScript => tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
        Language::Tsx => tree_sitter_typescript::LANGUAGE_TSX.into(),
        other => {
            return Err(AuditError::scan(
                &unit.path,
                format!("no grammar for {other} files"),
            ))
        }
    };
    parser
        .set_language(&language)
        .map_err(|e| AuditError::configuration(format!("grammar version mismatch: {e}")))?;

    parser
        .parse(&unit.content, None)
        .ok_or_else(|| AuditError::scan(&unit.path, "parser produced no tree"))
}

/// Dependency directories are not authored code under audit.
pub fn is_dependency_path(path: &Path) -> bool {
    path.components().any(|c| {
        matches!(
            c.as_os_str().to_str(),
            Some("node_modules") | Some("vendor") | Some("bower_components")
        )
    })
}

/// TypeScript declaration files carry no executable code.
pub fn is_declaration_file(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(|n| n.ends_with(".d.ts") || n.ends_with(".d.mts") || n.ends_with(".d.cts"))
        .unwrap_or(false)
}
