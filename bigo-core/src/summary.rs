//! Directory-level rollup of analysis results
//!
//! Strictly derived views: computed from the per-file results, never stored.

use crate::report::AnalysisResult;
use crate::scoring;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Distribution of overall complexity classes across files, per axis
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ComplexityDistribution {
    pub time: BTreeMap<String, usize>,
    pub space: BTreeMap<String, usize>,
}

/// Summary statistics for one analysis run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct DirectorySummary {
    pub total_files: usize,
    pub languages: BTreeMap<String, usize>,
    pub total_lines_of_code: usize,
    pub total_issues: usize,
    pub average_quality_score: f64,
    pub complexity_distribution: ComplexityDistribution,
    /// Issues per 100 lines of code across all files
    pub issue_density: f64,
}

/// Roll per-file results into one summary
pub fn summarize(results: &[AnalysisResult]) -> DirectorySummary {
    let mut languages: BTreeMap<String, usize> = BTreeMap::new();
    let mut distribution = ComplexityDistribution::default();
    let mut total_loc = 0usize;
    let mut total_issues = 0usize;
    let mut quality_total = 0.0;

    for result in results {
        let language = result.language.as_deref().unwrap_or("unknown");
        *languages.entry(language.to_string()).or_default() += 1;

        total_issues += result.issue_count();
        quality_total += scoring::quality_score(result);

        if let Some(metrics) = &result.metrics {
            total_loc += metrics.lines_of_code;
            *distribution
                .time
                .entry(metrics.time_complexity.overall.as_str().to_string())
                .or_default() += 1;
            *distribution
                .space
                .entry(metrics.space_complexity.overall.as_str().to_string())
                .or_default() += 1;
        }
    }

    let total_files = results.len();
    DirectorySummary {
        total_files,
        languages,
        total_lines_of_code: total_loc,
        total_issues,
        average_quality_score: if total_files > 0 {
            quality_total / total_files as f64
        } else {
            0.0
        },
        complexity_distribution: distribution,
        issue_density: if total_loc > 0 {
            (total_issues as f64 / total_loc as f64) * 100.0
        } else {
            0.0
        },
    }
}

/// Render a summary as text output
pub fn render_summary_text(summary: &DirectorySummary) -> String {
    let mut output = String::new();
    output.push_str(&format!("Files analyzed:   {}\n", summary.total_files));
    output.push_str(&format!(
        "Lines of code:    {}\n",
        summary.total_lines_of_code
    ));
    output.push_str(&format!("Total issues:     {}\n", summary.total_issues));
    output.push_str(&format!(
        "Average quality:  {:.1}\n",
        summary.average_quality_score
    ));
    output.push_str(&format!("Issue density:    {:.2}\n", summary.issue_density));

    output.push_str("Languages:\n");
    for (language, count) in &summary.languages {
        output.push_str(&format!("  {:<10} {}\n", language, count));
    }

    output.push_str("Time complexity:\n");
    for (class, count) in &summary.complexity_distribution.time {
        output.push_str(&format!("  {:<12} {}\n", class, count));
    }
    output.push_str("Space complexity:\n");
    for (class, count) in &summary.complexity_distribution.space {
        output.push_str(&format!("  {:<12} {}\n", class, count));
    }

    output
}
