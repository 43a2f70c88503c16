use crate::config::IoConfig;
use crate::core::{Language, SourceUnit};
use crate::errors::AuditError;
use crate::parsing::is_dependency_path;
use ignore::WalkBuilder;
use std::path::{Path, PathBuf};

pub struct FileWalker {
    root: PathBuf,
    ignore_patterns: Vec<String>,
}

impl FileWalker {
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            ignore_patterns: Vec::new(),
        }
    }

    pub fn with_ignore_patterns(mut self, patterns: Vec<String>) -> Self {
        self.ignore_patterns = patterns;
        self
    }

    /// Enumerate candidate files under the root. Unreadable directories are
    /// skipped silently; an empty result is the caller's fatal case, not
    /// ours.
    pub fn walk(&self) -> Vec<PathBuf> {
        let walker = WalkBuilder::new(&self.root)
            .hidden(false)
            .git_ignore(true)
            .build();

        walker
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.into_path())
            .filter(|path| path.is_file() && self.should_process(path))
            .collect()
    }

    fn should_process(&self, path: &Path) -> bool {
        if Language::from_path(path) == Language::Unknown {
            return false;
        }
        if is_dependency_path(path) {
            return false;
        }

        let path_str = path.to_string_lossy();
        !self.ignore_patterns.iter().any(|pattern| {
            glob::Pattern::new(pattern)
                .map(|p| p.matches(&path_str))
                .unwrap_or(false)
        })
    }
}

/// Load every auditable file under the root into immutable source units.
/// A file that cannot be read is skipped with a warning; finding no files
/// at all is fatal to the run.
pub fn load_source_units(root: &Path, io_config: &IoConfig) -> Result<Vec<SourceUnit>, AuditError> {
    let paths = FileWalker::new(root.to_path_buf())
        .with_ignore_patterns(io_config.ignore.clone())
        .walk();

    let mut units = Vec::with_capacity(paths.len());
    for path in paths {
        match std::fs::read_to_string(&path) {
            Ok(content) => units.push(SourceUnit::new(path, content)),
            Err(err) => log::warn!("skipping unreadable file {}: {err}", path.display()),
        }
    }

    if units.is_empty() {
        return Err(AuditError::NoSources {
            root: root.to_path_buf(),
        });
    }
    Ok(units)
}
