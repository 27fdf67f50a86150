//! Analysis orchestration - ties together parsing, inference, issue
//! scanning, and metrics for one file
//!
//! Every entity here is created fresh per call and discarded at return:
//! there is no caching and no state shared between invocations, so calls
//! are independent, reentrant, and safe to run in parallel across files.
//! No condition in this module is fatal - unsupported input, malformed
//! source, and I/O failures all become structured issue entries.

use crate::infer::text::TextInferencer;
use crate::infer::tree::{first_error_line, parse_python, TreeInferencer};
use crate::infer::Inferencer;
use crate::issues::{self, GENERAL_ERRORS, SYNTAX_ERRORS};
use crate::language::Language;
use crate::metrics;
use crate::report::{AnalysisResult, FileMetrics, IssueMap};
use std::path::Path;
use tree_sitter::Tree;

/// One source file handed to the engine.
///
/// Owned by the caller; the engine only borrows it for the duration of one
/// analysis call. A pre-parsed tree may be supplied to avoid a reparse.
pub struct AnalysisUnit<'a> {
    pub path: &'a str,
    pub language: Language,
    pub source: &'a str,
    pub parsed_tree: Option<&'a Tree>,
}

/// Analyze one file on disk. I/O and dispatch failures become issue
/// entries, never errors.
pub fn analyze_file(path: &Path) -> AnalysisResult {
    let path_str = path.to_string_lossy().to_string();

    let Some(language) = Language::from_path(path) else {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| format!(".{e}"))
            .unwrap_or_default();
        return AnalysisResult::with_issue(
            path_str,
            None,
            GENERAL_ERRORS,
            format!("Unsupported file type: {ext}"),
        );
    };

    let source = match std::fs::read_to_string(path) {
        Ok(source) => source,
        Err(e) => {
            return AnalysisResult::with_issue(
                path_str,
                Some(language.name().to_string()),
                GENERAL_ERRORS,
                format!("Error reading file: {e}"),
            );
        }
    };

    analyze_unit(&AnalysisUnit {
        path: &path_str,
        language,
        source: &source,
        parsed_tree: None,
    })
}

/// Analyze in-memory source with a known language tag
pub fn analyze_source(path: &str, source: &str, language: Language) -> AnalysisResult {
    analyze_unit(&AnalysisUnit {
        path,
        language,
        source,
        parsed_tree: None,
    })
}

/// Analyze one unit: run the appropriate inference pass twice (time, then
/// space), collect issues and metrics, and return a plain data record.
pub fn analyze_unit(unit: &AnalysisUnit<'_>) -> AnalysisResult {
    if unit.source.trim().is_empty() {
        return AnalysisResult::with_issue(
            unit.path.to_string(),
            Some(unit.language.name().to_string()),
            GENERAL_ERRORS,
            "Empty source file".to_string(),
        );
    }

    if unit.language.has_tree_pass() {
        analyze_tree(unit)
    } else {
        analyze_text(unit)
    }
}

fn analyze_tree(unit: &AnalysisUnit<'_>) -> AnalysisResult {
    let owned_tree;
    let tree = match unit.parsed_tree {
        Some(tree) => tree,
        None => match parse_python(unit.source) {
            Ok(tree) => {
                owned_tree = tree;
                &owned_tree
            }
            Err(e) => {
                return AnalysisResult::with_issue(
                    unit.path.to_string(),
                    Some(unit.language.name().to_string()),
                    GENERAL_ERRORS,
                    format!("Error analyzing file: {e}"),
                );
            }
        },
    };

    // Malformed source: report with location and keep going with empty
    // metrics rather than aborting the surrounding scan
    if tree.root_node().has_error() {
        let line = first_error_line(tree.root_node()).unwrap_or(1);
        return AnalysisResult::with_issue(
            unit.path.to_string(),
            Some(unit.language.name().to_string()),
            SYNTAX_ERRORS,
            format!("Line {line}: invalid syntax"),
        );
    }

    let inferencer = TreeInferencer::new(tree, unit.source);
    let (time_complexity, space_complexity) = run_passes(&inferencer);

    let mut issue_map = IssueMap::new();
    let unused = issues::unused_variables(tree.root_node(), unit.source);
    if !unused.is_empty() {
        issue_map.insert("Unused Variables".to_string(), unused);
    }

    let counts = metrics::count_lines(unit.language, unit.source);
    AnalysisResult {
        path: unit.path.to_string(),
        language: Some(unit.language.name().to_string()),
        issues: issue_map,
        metrics: Some(FileMetrics {
            lines_of_code: counts.lines_of_code,
            comment_lines: counts.comment_lines,
            blank_lines: counts.blank_lines,
            time_complexity,
            space_complexity,
        }),
    }
}

fn analyze_text(unit: &AnalysisUnit<'_>) -> AnalysisResult {
    let inferencer = TextInferencer::new(unit.source);
    let (time_complexity, space_complexity) = run_passes(&inferencer);

    let issue_map = issues::scan_text(unit.language, unit.source);
    let counts = metrics::count_lines(unit.language, unit.source);

    AnalysisResult {
        path: unit.path.to_string(),
        language: Some(unit.language.name().to_string()),
        issues: issue_map,
        metrics: Some(FileMetrics {
            lines_of_code: counts.lines_of_code,
            comment_lines: counts.comment_lines,
            blank_lines: counts.blank_lines,
            time_complexity,
            space_complexity,
        }),
    }
}

/// Run both passes through the capability interface
fn run_passes(
    inferencer: &dyn Inferencer,
) -> (crate::report::ComplexityReport, crate::report::ComplexityReport) {
    (inferencer.infer_time(), inferencer.infer_space())
}
