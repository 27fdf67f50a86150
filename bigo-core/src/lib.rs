//! Bigo core library - structural complexity estimation for Python, C, C++, and Java

#![deny(warnings)]

// Global invariants enforced in this crate:
// - Per-file analysis failures never abort a directory scan
// - No global mutable state
// - No randomness, clocks, or async
// - Deterministic traversal order must be explicit
// - Overall complexity always equals the join of per-function entries
// - Identical input yields byte-for-byte identical output

pub mod aggregate;
pub mod analysis;
pub mod config;
pub mod costs;
pub mod infer;
pub mod issues;
pub mod language;
pub mod lattice;
pub mod metrics;
pub mod patterns;
pub mod recursion;
pub mod report;
pub mod scoring;
pub mod summary;

pub use analysis::{analyze_file, analyze_source, analyze_unit, AnalysisUnit};
pub use config::{BigoConfig, ResolvedConfig};
pub use language::Language;
pub use lattice::ComplexityClass;
pub use report::{render_json, render_text, AnalysisResult, ComplexityReport, FileMetrics};
pub use summary::{render_summary_text, summarize, DirectorySummary};

use anyhow::{Context, Result};
use rayon::prelude::*;

/// Analyze a file or directory tree.
///
/// A single file is analyzed unconditionally, whatever its extension.
/// For a directory, supported source files are collected recursively in
/// sorted order, filtered through the config when one is given, and
/// analyzed in parallel. Result order matches the sorted file order.
pub fn analyze_path(
    path: &std::path::Path,
    config: Option<&ResolvedConfig>,
) -> Result<Vec<AnalysisResult>> {
    if !path.exists() {
        anyhow::bail!("Path does not exist: {}", path.display());
    }

    if path.is_file() {
        return Ok(vec![analyze_file(path)]);
    }

    let mut files = collect_source_files(path)?;
    if let Some(config) = config {
        files.retain(|file| config.should_include(file));
    }

    Ok(files
        .par_iter()
        .map(|file| analyze_file(file))
        .collect())
}

/// Recursively collect supported source files, sorted for deterministic order.
///
/// Supported languages and extensions:
/// - Python: .py
/// - C: .c, .h
/// - C++: .cpp, .cc, .cxx, .c++, .hpp, .hh, .hxx
/// - Java: .java
fn collect_source_files(path: &std::path::Path) -> Result<Vec<std::path::PathBuf>> {
    let mut files = Vec::new();
    collect_source_files_recursive(path, &mut files)?;
    files.sort();
    Ok(files)
}

/// Returns true for directory names that should not be traversed
fn is_skipped_dir(name: &str) -> bool {
    name.starts_with('.')
        || name == "__pycache__"
        || name == "venv"
        || name == "node_modules"
        || name == "build"
        || name == "dist"
        || name == "out"
        || name == "target"
}

/// Process one directory entry, pushing source files or recursing into dirs
fn process_dir_entry(
    path: std::path::PathBuf,
    metadata: std::fs::Metadata,
    files: &mut Vec<std::path::PathBuf>,
) -> Result<()> {
    use std::ffi::OsStr;

    if metadata.is_symlink() {
        return Ok(());
    }

    if metadata.is_dir() {
        if let Some(name) = path.file_name().and_then(|n: &OsStr| n.to_str()) {
            if is_skipped_dir(name) {
                return Ok(());
            }
        }
        collect_source_files_recursive(&path, files)?;
    } else if metadata.is_file() && Language::from_path(&path).is_some() {
        files.push(path);
    }

    Ok(())
}

fn collect_source_files_recursive(
    dir: &std::path::Path,
    files: &mut Vec<std::path::PathBuf>,
) -> Result<()> {
    for entry_result in std::fs::read_dir(dir)
        .with_context(|| format!("Failed to read directory: {}", dir.display()))?
    {
        let entry = entry_result?;
        let path = entry.path();
        let metadata = std::fs::symlink_metadata(&path)
            .with_context(|| format!("Failed to read metadata: {}", path.display()))?;
        process_dir_entry(path, metadata, files)?;
    }

    Ok(())
}
