//! # File System Operations Module
//!
//! Corpus discovery: enumerating test sources under the corpus root and
//! turning them into the `/`-separated relative paths the rest of the
//! runner works with.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

/// Path component that marks benchmark programs, never run as tests.
pub const BENCHMARK_SEGMENT: &str = "benchmark";

/// Which files under the corpus root are candidates.
#[derive(Debug, Clone, Default)]
pub struct CorpusFilter {
    /// Extension without the leading dot.
    pub extension: String,
    /// Prefixes relative to the corpus root. Empty means everything.
    pub prefixes: Vec<String>,
}

impl CorpusFilter {
    /// Builds a filter from a comma-separated prefix list such as `"for,while/"`.
    pub fn new(extension: &str, prefixes: Option<&str>) -> Self {
        let prefixes = prefixes
            .map(|list| {
                list.split(',')
                    .map(str::trim)
                    .filter(|p| !p.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();
        Self {
            extension: extension.to_string(),
            prefixes,
        }
    }

    /// `relative` is the candidate's path relative to the corpus root.
    pub fn accepts(&self, relative: &Path) -> bool {
        if relative.extension().is_none_or(|ext| ext != self.extension.as_str()) {
            return false;
        }
        if relative
            .components()
            .any(|c| c.as_os_str() == BENCHMARK_SEGMENT)
        {
            return false;
        }
        if self.prefixes.is_empty() {
            return true;
        }
        let relative = to_slash_path(relative);
        self.prefixes.iter().any(|p| relative.starts_with(p.as_str()))
    }
}

/// Converts a relative path to a `/`-separated string.
pub fn to_slash_path(path: &Path) -> String {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            Component::ParentDir => Some("..".to_string()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Recursively lists the test sources under `base_dir/test_dir` accepted by
/// `filter`, as `/`-separated paths relative to `base_dir`.
///
/// The list is sorted so reporting order is deterministic.
pub fn discover_tests(base_dir: &Path, test_dir: &str, filter: &CorpusFilter) -> Result<Vec<String>> {
    let root = base_dir.join(test_dir);
    if !root.is_dir() {
        anyhow::bail!("Test directory not found: {}", root.display());
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(&root).sort_by_file_name() {
        let entry = entry.with_context(|| format!("Failed to walk directory: {}", root.display()))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        let in_corpus = path.strip_prefix(&root).unwrap_or(path);
        if !filter.accepts(in_corpus) {
            continue;
        }
        let relative = path.strip_prefix(base_dir).unwrap_or(path);
        files.push(to_slash_path(relative));
    }
    files.sort();
    Ok(files)
}

/// Reads a test source.
pub fn read_source(base_dir: &Path, relative: &str) -> Result<String> {
    let path: PathBuf = base_dir.join(relative);
    fs::read_to_string(&path)
        .with_context(|| format!("Failed to read test file: {}", path.display()))
}
