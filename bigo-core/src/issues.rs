//! Issue scanners - simple string scans with no shared state
//!
//! These are collaborators of the complexity engine, not part of it: each
//! scanner is a regex pass over raw source producing advisory messages.
//! Error-taxonomy categories (`General Errors`, `Syntax Errors`) also live
//! here so every producer spells them identically.

use crate::language::Language;
use crate::patterns::{for_each_node, node_text};
use crate::report::IssueMap;
use regex::Regex;
use std::collections::BTreeSet;
use std::sync::OnceLock;
use tree_sitter::Node;

/// Category for unsupported input and I/O failures
pub const GENERAL_ERRORS: &str = "General Errors";
/// Category for parse failures in tree mode
pub const SYNTAX_ERRORS: &str = "Syntax Errors";

const MAGIC_NUMBER_THRESHOLD: usize = 5;

fn system_out_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"System\.out\.print").unwrap())
}

fn try_block_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\btry\s*\{").unwrap())
}

fn catch_block_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\bcatch\s*\(").unwrap())
}

fn magic_number_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // Integer literal not adjacent to an identifier or decimal point
    RE.get_or_init(|| Regex::new(r"(?:^|[^\w.])(\d+)(?:[^\w.]|$)").unwrap())
}

fn malloc_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\bmalloc\s*\(").unwrap())
}

fn free_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\bfree\s*\(").unwrap())
}

fn strcpy_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\bstrcpy\s*\(").unwrap())
}

fn gets_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\bgets\s*\(").unwrap())
}

fn new_expr_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\bnew\s+\w+").unwrap())
}

fn smart_ptr_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"std::(unique_ptr|shared_ptr)").unwrap())
}

fn index_loop_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\bfor\s*\(\s*\w+\s+\w+\s*=\s*0\s*;.*\.size\(\)").unwrap())
}

fn push_issue(issues: &mut IssueMap, category: &str, message: String) {
    issues.entry(category.to_string()).or_default().push(message);
}

/// Run the text-level issue scanners for one language
pub fn scan_text(language: Language, source: &str) -> IssueMap {
    let mut issues = IssueMap::new();
    match language {
        Language::Java => java_patterns(source, &mut issues),
        Language::C => c_patterns(source, &mut issues),
        Language::Cpp => {
            c_patterns(source, &mut issues);
            cpp_patterns(source, &mut issues);
        }
        Language::Python => {}
    }
    issues
}

fn java_patterns(source: &str, issues: &mut IssueMap) {
    if system_out_re().is_match(source) {
        push_issue(
            issues,
            "Best Practices",
            "Consider using a logging framework instead of System.out.print".to_string(),
        );
    }

    let try_blocks = try_block_re().find_iter(source).count();
    let catch_blocks = catch_block_re().find_iter(source).count();
    if try_blocks > catch_blocks {
        push_issue(
            issues,
            "Exception Handling",
            "Try blocks without corresponding catch blocks detected".to_string(),
        );
    }

    let magic_numbers: BTreeSet<&str> = magic_number_re()
        .captures_iter(source)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str())
        .collect();
    if magic_numbers.len() > MAGIC_NUMBER_THRESHOLD {
        let listing = magic_numbers.into_iter().collect::<Vec<_>>().join(", ");
        push_issue(
            issues,
            "Code Quality",
            format!("Consider using constants for magic numbers: {{{listing}}}"),
        );
    }
}

fn c_patterns(source: &str, issues: &mut IssueMap) {
    let malloc_count = malloc_re().find_iter(source).count();
    let free_count = free_re().find_iter(source).count();
    if malloc_count > free_count {
        push_issue(
            issues,
            "Memory Management",
            format!(
                "Potential memory leak: {} malloc calls but only {} free calls",
                malloc_count, free_count
            ),
        );
    }

    if strcpy_re().is_match(source) {
        push_issue(
            issues,
            "Security",
            "strcpy() can cause buffer overflows, consider using strncpy()".to_string(),
        );
    }
    if gets_re().is_match(source) {
        push_issue(
            issues,
            "Security",
            "gets() is unsafe, use fgets() instead".to_string(),
        );
    }
}

fn cpp_patterns(source: &str, issues: &mut IssueMap) {
    if new_expr_re().is_match(source) && !smart_ptr_re().is_match(source) {
        push_issue(
            issues,
            "Modern C++",
            "Consider using smart pointers instead of raw owning pointers".to_string(),
        );
    }

    if index_loop_re().is_match(source) {
        push_issue(
            issues,
            "Modern C++",
            "Consider using range-based for loops for better readability".to_string(),
        );
    }
}

/// Names assigned in the Python module but never read afterwards.
///
/// Store/load approximation over the parse tree: assignment and for-loop
/// targets define names, every other identifier occurrence uses one.
pub fn unused_variables(root: Node<'_>, source: &str) -> Vec<String> {
    let mut defined: BTreeSet<&str> = BTreeSet::new();
    let mut target_positions: BTreeSet<usize> = BTreeSet::new();

    for_each_node(root, &mut |node| {
        let target = match node.kind() {
            "assignment" | "augmented_assignment" | "for_statement" => {
                node.child_by_field_name("left")
            }
            _ => None,
        };
        if let Some(target) = target {
            if target.kind() == "identifier" {
                defined.insert(node_text(target, source));
                target_positions.insert(target.start_byte());
            }
        }
    });

    let mut used: BTreeSet<&str> = BTreeSet::new();
    for_each_node(root, &mut |node| {
        if node.kind() == "identifier" && !target_positions.contains(&node.start_byte()) {
            used.insert(node_text(node, source));
        }
    });

    defined
        .difference(&used)
        .map(|name| format!("Unused variable: {name}"))
        .collect()
}
