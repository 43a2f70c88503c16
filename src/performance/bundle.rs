//! Build-artifact collection and bundle composition analysis.

use crate::core::{Severity, Violation};
use crate::errors::AuditError;
use std::collections::HashMap;
use std::path::PathBuf;
use walkdir::WalkDir;

/// Any single chunk above this is worth flagging regardless of the total
/// budget.
pub const MAX_CHUNK_BYTES: u64 = 100 * 1024;

#[derive(Clone, Debug)]
pub struct ChunkInfo {
    pub name: String,
    pub bytes: u64,
    /// Module identifiers bundled into this chunk, when the provider can
    /// supply them.
    pub modules: Vec<String>,
}

/// Supplies chunk metadata for the built project, or signals that no
/// artifacts exist.
pub trait ArtifactProvider: Send + Sync {
    fn collect(&self) -> Result<Vec<ChunkInfo>, AuditError>;
}

/// Scans known build output directories for emitted chunks. Module
/// identifiers are not recoverable from bare files, so duplication
/// detection only engages with providers that carry them.
pub struct DirArtifactProvider {
    root: PathBuf,
    dirs: Vec<String>,
}

impl DirArtifactProvider {
    pub fn new(root: PathBuf, dirs: Vec<String>) -> Self {
        Self { root, dirs }
    }
}

impl ArtifactProvider for DirArtifactProvider {
    fn collect(&self) -> Result<Vec<ChunkInfo>, AuditError> {
        let mut chunks = Vec::new();

        for dir in &self.dirs {
            let base = self.root.join(dir);
            if !base.is_dir() {
                continue;
            }
            for entry in WalkDir::new(&base).into_iter().filter_map(|e| e.ok()) {
                let path = entry.path();
                if !path.is_file() {
                    continue;
                }
                let is_chunk = path
                    .extension()
                    .and_then(|e| e.to_str())
                    .map(|e| matches!(e, "js" | "mjs" | "css"))
                    .unwrap_or(false);
                if !is_chunk {
                    continue;
                }
                let bytes = entry.metadata().map(|m| m.len()).unwrap_or(0);
                let name = path
                    .strip_prefix(&self.root)
                    .unwrap_or(path)
                    .to_string_lossy()
                    .into_owned();
                chunks.push(ChunkInfo {
                    name,
                    bytes,
                    modules: Vec::new(),
                });
            }
        }

        if chunks.is_empty() {
            return Err(AuditError::capability(
                "build artifacts",
                format!("no chunks found under {:?}", self.dirs),
            ));
        }
        Ok(chunks)
    }
}

#[derive(Clone, Debug, Default)]
pub struct BundleReport {
    pub total_bytes: u64,
    pub largest_chunk_bytes: u64,
    pub chunk_count: usize,
    pub over_budget: bool,
    pub violations: Vec<Violation>,
}

pub fn analyze_bundle(chunks: &[ChunkInfo], max_bundle_bytes: u64) -> BundleReport {
    let total_bytes: u64 = chunks.iter().map(|c| c.bytes).sum();
    let largest_chunk_bytes = chunks.iter().map(|c| c.bytes).max().unwrap_or(0);
    let mut violations = Vec::new();

    let over_budget = total_bytes > max_bundle_bytes;
    if over_budget {
        violations.push(bundle_violation(
            "performance/bundle-size",
            Severity::High,
            "bundle",
            format!("Total bundle is {total_bytes} bytes (budget: {max_bundle_bytes})"),
            "Split the bundle and lazy-load non-critical routes",
        ));
    }

    for chunk in chunks.iter().filter(|c| c.bytes > MAX_CHUNK_BYTES) {
        violations.push(bundle_violation(
            "performance/chunk-size",
            Severity::Medium,
            &chunk.name,
            format!("Chunk '{}' is {} bytes (limit: {MAX_CHUNK_BYTES})", chunk.name, chunk.bytes),
            "Break the chunk apart with dynamic imports",
        ));
    }

    let mut owners: HashMap<&str, Vec<&str>> = HashMap::new();
    for chunk in chunks {
        for module in &chunk.modules {
            owners.entry(module.as_str()).or_default().push(&chunk.name);
        }
    }
    let mut duplicated: Vec<(&str, Vec<&str>)> = owners
        .into_iter()
        .filter(|(_, chunks)| chunks.len() > 1)
        .collect();
    duplicated.sort_by_key(|(module, _)| *module);
    for (module, in_chunks) in duplicated {
        violations.push(bundle_violation(
            "performance/duplicate-module",
            Severity::Medium,
            module,
            format!("Module '{}' is bundled into {} chunks", module, in_chunks.len()),
            "Hoist the shared module into a common chunk",
        ));
    }

    BundleReport {
        total_bytes,
        largest_chunk_bytes,
        chunk_count: chunks.len(),
        over_budget,
        violations,
    }
}

fn bundle_violation(
    rule: &str,
    severity: Severity,
    name: &str,
    message: String,
    recommendation: &str,
) -> Violation {
    Violation {
        rule: rule.to_string(),
        severity,
        file: PathBuf::from(name),
        line: 1,
        column: 0,
        message,
        recommendation: recommendation.to_string(),
        excerpt: None,
    }
}
