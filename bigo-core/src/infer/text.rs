//! Text-based inference pass for languages analyzed without a parse tree
//!
//! Brace/keyword scanning approximates loop nesting depth and allocation
//! patterns. Deliberately lower fidelity than the tree pass: results carry
//! `estimated = true`.

use crate::aggregate;
use crate::infer::Inferencer;
use crate::lattice::{upgrade, ComplexityClass};
use crate::report::ComplexityReport;
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::OnceLock;

fn loop_open_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\b(for|while)\s*\(").unwrap())
}

fn sort_call_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(\bsort\s*\(|\.sort\s*\()").unwrap())
}

fn array_alloc_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"new\s+\w+\s*\[").unwrap())
}

fn malloc_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\bmalloc\s*\(").unwrap())
}

fn container_type_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\b(ArrayList|Vector|HashMap|HashSet|LinkedList)\b").unwrap())
}

fn alloc_2d_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"new\s+\w+\s*\[[^\]]*\]\s*\[").unwrap())
}

fn new_object_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\bnew\s+\w+").unwrap())
}

fn function_def_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(\w+)\s*\([^)]*\)\s*\{").unwrap())
}

/// Text-based inferencer over raw source text.
///
/// Holds only a borrow of the source for one analysis call.
pub struct TextInferencer<'a> {
    source: &'a str,
}

impl<'a> TextInferencer<'a> {
    pub fn new(source: &'a str) -> Self {
        TextInferencer { source }
    }

    /// Maximum loop nesting depth reached while scanning lines.
    ///
    /// Loop-introducing keywords increment depth; closing-block tokens
    /// decrement it, floored at zero so unmatched closers never go negative.
    fn max_loop_depth(&self) -> usize {
        let mut depth = 0usize;
        let mut max_depth = 0usize;
        for line in self.source.lines() {
            let stripped = line.trim();
            if loop_open_re().is_match(stripped) {
                depth += 1;
                max_depth = max_depth.max(depth);
            } else if stripped.ends_with('}') && depth > 0 {
                depth -= 1;
            }
        }
        max_depth
    }

    /// Time class chosen purely from maximum nesting depth
    fn depth_class(max_depth: usize) -> ComplexityClass {
        match max_depth {
            0 => ComplexityClass::Constant,
            1 => ComplexityClass::Linear,
            2 => ComplexityClass::Quadratic,
            _ => ComplexityClass::Polynomial,
        }
    }

    /// Whether any function body appears to call itself. Text-level
    /// approximation: a name that is both defined (`name(...) {`) and
    /// called more than once anywhere in the file.
    fn has_recursive_function(&self) -> bool {
        for caps in function_def_re().captures_iter(self.source) {
            let name = &caps[1];
            if matches!(name, "for" | "while" | "if" | "switch" | "catch") {
                continue;
            }
            if call_count(self.source, name) >= 2 {
                return true;
            }
        }
        false
    }
}

/// Occurrences of `name(` in the source, on word boundaries and allowing
/// whitespace before the parenthesis
fn call_count(source: &str, name: &str) -> usize {
    source
        .match_indices(name)
        .filter(|&(idx, _)| {
            let boundary_before = source[..idx]
                .chars()
                .next_back()
                .map_or(true, |c| !c.is_alphanumeric() && c != '_');
            let rest = source[idx + name.len()..].trim_start();
            boundary_before && rest.starts_with('(')
        })
        .count()
}

impl Inferencer for TextInferencer<'_> {
    fn infer_time(&self) -> ComplexityReport {
        let mut class = Self::depth_class(self.max_loop_depth());

        // A sort call costs at least O(n log n) no matter the nesting found
        if sort_call_re().is_match(self.source) {
            class = upgrade(class, ComplexityClass::Linearithmic);
        }

        aggregate::build_report(BTreeMap::new(), class, true)
    }

    fn infer_space(&self) -> ComplexityReport {
        let mut class = ComplexityClass::Constant;

        // Dynamic allocation or growable container types
        if array_alloc_re().is_match(self.source) || malloc_re().is_match(self.source) {
            class = upgrade(class, ComplexityClass::Linear);
        }
        if container_type_re().is_match(self.source) {
            class = upgrade(class, ComplexityClass::Linear);
        }
        if self.has_recursive_function() {
            class = upgrade(class, ComplexityClass::Linear);
        }
        if alloc_2d_re().is_match(self.source) {
            class = upgrade(class, ComplexityClass::Quadratic);
        }

        // Allocations found inside loop regions scale with the region depth
        let mut depth = 0usize;
        for line in self.source.lines() {
            let stripped = line.trim();
            if loop_open_re().is_match(stripped) {
                depth += 1;
            } else if stripped.ends_with('}') && depth > 0 {
                depth -= 1;
            } else if depth > 0
                && (new_object_re().is_match(stripped) || malloc_re().is_match(stripped))
            {
                let escalated = if depth == 1 {
                    ComplexityClass::Linear
                } else {
                    ComplexityClass::Quadratic
                };
                class = upgrade(class, escalated);
            }
        }

        aggregate::build_report(BTreeMap::new(), class, true)
    }
}
