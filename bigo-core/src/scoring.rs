//! Derived quality scores
//!
//! Fixed penalty/bonus tables over metrics and issue counts. Scores are
//! advisory roll-ups for presentation; nothing here feeds back into the
//! inference passes.

use crate::lattice::ComplexityClass;
use crate::report::{AnalysisResult, FileMetrics};

const MAX_ISSUE_DEDUCTION: f64 = 50.0;
const ISSUE_DEDUCTION: f64 = 5.0;
const MAX_COMMENT_BONUS: f64 = 10.0;

/// Penalty applied to the quality score for a complexity class
fn complexity_penalty(class: ComplexityClass) -> f64 {
    use ComplexityClass::*;
    match class {
        Constant => 0.0,
        Logarithmic => 2.0,
        Linear => 5.0,
        Linearithmic => 10.0,
        Quadratic => 20.0,
        Cubic => 25.0,
        Polynomial => 30.0,
        Factorial => 40.0,
    }
}

/// Complexity-score contribution for a class (0-100, lower is better)
fn complexity_points(class: ComplexityClass) -> f64 {
    use ComplexityClass::*;
    match class {
        Constant => 10.0,
        Logarithmic => 20.0,
        Linear => 30.0,
        Linearithmic => 50.0,
        Quadratic => 70.0,
        Cubic => 80.0,
        Polynomial => 90.0,
        Factorial => 100.0,
    }
}

/// Code quality score, 0-100, higher is better.
///
/// Deducts for issues and poor complexity, rewards a healthy comment ratio.
pub fn quality_score(result: &AnalysisResult) -> f64 {
    let mut score = 100.0;

    let issue_count = result.issue_count() as f64;
    score -= (issue_count * ISSUE_DEDUCTION).min(MAX_ISSUE_DEDUCTION);

    if let Some(metrics) = &result.metrics {
        score -= complexity_penalty(metrics.time_complexity.overall);
        score -= complexity_penalty(metrics.space_complexity.overall);

        let loc = metrics.lines_of_code.max(1) as f64;
        let comment_ratio = metrics.comment_lines as f64 / loc;
        score += (comment_ratio * 50.0).min(MAX_COMMENT_BONUS);
    }

    score.clamp(0.0, 100.0)
}

/// Overall complexity score, 0-100, lower is better
pub fn complexity_score(metrics: &FileMetrics) -> f64 {
    let time = complexity_points(metrics.time_complexity.overall);
    let space = complexity_points(metrics.space_complexity.overall);
    (time + space) / 2.0
}

/// Maintainability score, 0-100, higher is better
pub fn maintainability_score(metrics: &FileMetrics) -> f64 {
    let loc = metrics.lines_of_code;
    let mut score = 70.0;

    let comment_ratio = if loc > 0 {
        metrics.comment_lines as f64 / loc as f64
    } else {
        0.0
    };
    score += (comment_ratio * 100.0).min(20.0);

    if loc > 500 {
        score -= (((loc - 500) as f64) / 50.0).min(30.0);
    }
    if (50..=200).contains(&loc) {
        score += 10.0;
    }

    score.clamp(0.0, 100.0)
}

/// Issues per 100 lines of code
pub fn issue_density(result: &AnalysisResult) -> f64 {
    let loc = result
        .metrics
        .as_ref()
        .map(|m| m.lines_of_code)
        .unwrap_or(0);
    if loc == 0 {
        return 0.0;
    }
    (result.issue_count() as f64 / loc as f64) * 100.0
}
