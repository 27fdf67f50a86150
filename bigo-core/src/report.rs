//! Report types and output generation
//!
//! Global invariants enforced:
//! - Deterministic output ordering (BTreeMap keys, stable file order)
//! - Identical input yields byte-for-byte identical output

use crate::lattice::ComplexityClass;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Issue categories mapped to their messages
pub type IssueMap = BTreeMap<String, Vec<String>>;

/// Complexity estimate for one file on one axis (time or space)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ComplexityReport {
    /// Worst case across all functions and module-level code
    pub overall: ComplexityClass,
    /// Per-function classes, plus a synthetic `<module-level>` entry when
    /// top-level code is non-trivial
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub functions: BTreeMap<String, ComplexityClass>,
    /// True for text-pass results (lower confidence)
    pub estimated: bool,
}

/// Per-file metrics
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct FileMetrics {
    pub lines_of_code: usize,
    pub comment_lines: usize,
    /// Only computed for text-pass languages
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blank_lines: Option<usize>,
    pub time_complexity: ComplexityReport,
    pub space_complexity: ComplexityReport,
}

/// Analysis result for a single file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct AnalysisResult {
    pub path: String,
    /// None when the file extension is not recognized
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub issues: IssueMap,
    /// None when analysis could not produce metrics (unsupported input,
    /// syntax error, I/O failure)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metrics: Option<FileMetrics>,
}

impl AnalysisResult {
    /// Result shell carrying only an issue entry, no metrics
    pub fn with_issue(path: String, language: Option<String>, category: &str, message: String) -> Self {
        let mut issues = IssueMap::new();
        issues.insert(category.to_string(), vec![message]);
        AnalysisResult {
            path,
            language,
            issues,
            metrics: None,
        }
    }

    /// Total number of issue messages across all categories
    pub fn issue_count(&self) -> usize {
        self.issues.values().map(Vec::len).sum()
    }
}

/// Render results as a text table with per-function breakdowns
pub fn render_text(results: &[AnalysisResult]) -> String {
    let mut output = String::new();
    output.push_str(&format!(
        "{:<40} {:<8} {:<12} {:<12} {}\n",
        "FILE", "LANG", "TIME", "SPACE", "ISSUES"
    ));

    for result in results {
        let language = result.language.as_deref().unwrap_or("-");
        let (time, space) = match &result.metrics {
            Some(m) => (
                m.time_complexity.overall.as_str(),
                m.space_complexity.overall.as_str(),
            ),
            None => ("-", "-"),
        };
        output.push_str(&format!(
            "{:<40} {:<8} {:<12} {:<12} {}\n",
            truncate_or_pad(&result.path, 40),
            language,
            time,
            space,
            result.issue_count(),
        ));

        if let Some(metrics) = &result.metrics {
            for (name, class) in &metrics.time_complexity.functions {
                let space_class = metrics
                    .space_complexity
                    .functions
                    .get(name)
                    .map(|c| c.as_str())
                    .unwrap_or("-");
                output.push_str(&format!(
                    "    {:<36} {:<8} {:<12} {}\n",
                    truncate_or_pad(name, 36),
                    "",
                    class.as_str(),
                    space_class,
                ));
            }
        }

        for (category, messages) in &result.issues {
            for message in messages {
                output.push_str(&format!("    [{}] {}\n", category, message));
            }
        }
    }

    output
}

/// Render results as JSON output
pub fn render_json(results: &[AnalysisResult]) -> String {
    // serde maps are BTreeMaps, so key order is deterministic
    serde_json::to_string_pretty(results).unwrap_or_else(|_| "[]".to_string())
}

/// Truncate or pad string to fixed width. Truncation backs up to a char
/// boundary so multi-byte paths never split mid-character.
fn truncate_or_pad(s: &str, width: usize) -> String {
    if s.len() > width {
        let mut end = width.saturating_sub(3);
        while !s.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &s[..end])
    } else {
        format!("{:<width$}", s, width = width)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lattice::ComplexityClass::*;

    fn sample_result() -> AnalysisResult {
        let mut functions = BTreeMap::new();
        functions.insert("scan".to_string(), Linear);
        AnalysisResult {
            path: "demo.py".to_string(),
            language: Some("python".to_string()),
            issues: IssueMap::new(),
            metrics: Some(FileMetrics {
                lines_of_code: 10,
                comment_lines: 2,
                blank_lines: None,
                time_complexity: ComplexityReport {
                    overall: Linear,
                    functions: functions.clone(),
                    estimated: false,
                },
                space_complexity: ComplexityReport {
                    overall: Constant,
                    functions: BTreeMap::new(),
                    estimated: false,
                },
            }),
        }
    }

    #[test]
    fn text_render_lists_files_and_functions() {
        let text = render_text(&[sample_result()]);
        assert!(text.contains("demo.py"));
        assert!(text.contains("python"));
        assert!(text.contains("scan"));
        assert!(text.contains("O(n)"));
    }

    #[test]
    fn json_round_trip() {
        let results = vec![sample_result()];
        let json = render_json(&results);
        let parsed: Vec<AnalysisResult> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, results);
    }

    #[test]
    fn truncation_lands_on_char_boundaries() {
        // A multi-byte character straddling the cut point must not panic
        let path = format!("{}é{}", "a".repeat(36), "bcdef");
        assert_eq!(truncate_or_pad(&path, 40), format!("{}...", "a".repeat(36)));

        let accented = "à".repeat(30);
        let truncated = truncate_or_pad(&accented, 40);
        assert!(truncated.ends_with("..."));

        let mut result = sample_result();
        result.path = path;
        let text = render_text(&[result]);
        assert!(text.contains("aaa..."));
    }

    #[test]
    fn with_issue_carries_no_metrics() {
        let result = AnalysisResult::with_issue(
            "x.zig".to_string(),
            None,
            "General Errors",
            "Unsupported file type: .zig".to_string(),
        );
        assert!(result.metrics.is_none());
        assert_eq!(result.issue_count(), 1);
    }
}
