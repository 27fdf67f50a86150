//! Tree-based inference pass for Python, driven by a tree-sitter parse tree
//!
//! The time pass walks nested statement blocks carrying a loop-nesting depth
//! counter; the space pass mirrors the walk with allocation leaf rules. Both
//! consult the same pattern detectors and recursion tables so the two axes
//! stay consistent. All state is per-call local: repeated analysis of the
//! same source yields identical reports.

use crate::aggregate;
use crate::costs;
use crate::infer::Inferencer;
use crate::lattice::{combine_sequential, compose_nested, upgrade, ComplexityClass};
use crate::patterns::{
    self, callee_name, compute_facts, for_each_node, has_accumulating_call, is_logarithmic_loop,
    named_children, node_text, value_space_cost,
};
use crate::recursion;
use crate::report::ComplexityReport;
use anyhow::{Context, Result};
use std::collections::BTreeMap;
use tree_sitter::{Node, Parser, Tree};

/// Parse Python source into a tree-sitter tree.
///
/// tree-sitter is error-tolerant: a tree is produced even for malformed
/// source, with ERROR nodes marking the damage. Callers decide how to react
/// (see `first_error_line`).
pub fn parse_python(source: &str) -> Result<Tree> {
    let mut parser = Parser::new();
    let language = tree_sitter_python::LANGUAGE;
    parser
        .set_language(&language.into())
        .context("Failed to set Python language for parser")?;
    parser
        .parse(source, None)
        .context("Failed to parse Python source")
}

/// Line number (1-indexed) of the first syntax error in the tree, if any
pub fn first_error_line(root: Node<'_>) -> Option<usize> {
    let mut line: Option<usize> = None;
    for_each_node(root, &mut |node| {
        if node.is_error() || node.is_missing() {
            let row = node.start_position().row + 1;
            line = Some(line.map_or(row, |current| current.min(row)));
        }
    });
    line
}

/// Tree-based inferencer over a parsed Python module.
///
/// Borrows the tree and source for one analysis call and holds no other
/// state; results are `estimated = false`.
pub struct TreeInferencer<'a> {
    root: Node<'a>,
    source: &'a str,
}

impl<'a> TreeInferencer<'a> {
    pub fn new(tree: &'a Tree, source: &'a str) -> Self {
        TreeInferencer {
            root: tree.root_node(),
            source,
        }
    }

    /// Name of a function definition node, if present
    fn function_name(&self, func: Node<'a>) -> Option<&'a str> {
        func.child_by_field_name("name")
            .map(|name| node_text(name, self.source))
    }

    /// Every function definition in the module, including nested ones
    fn function_definitions(&self) -> Vec<Node<'a>> {
        let mut functions = Vec::new();
        for_each_node(self.root, &mut |node| {
            if node.kind() == "function_definition" {
                functions.push(node);
            }
        });
        functions
    }

    // ----- time pass -------------------------------------------------------

    fn function_time(&self, func: Node<'a>, name: &str) -> ComplexityClass {
        let facts = compute_facts(func, self.source, name);
        if facts.is_recursive() {
            // Call-stack cost is not nesting depth; use the fixed table
            return recursion::time_class(&facts);
        }
        match func.child_by_field_name("body") {
            Some(body) => self.score_time(&named_children(body), 0),
            None => ComplexityClass::Constant,
        }
    }

    /// Score a block of statements for time at the given loop nesting depth.
    fn score_time(&self, nodes: &[Node<'a>], depth: usize) -> ComplexityClass {
        let mut total = ComplexityClass::Constant;

        for &node in nodes {
            match node.kind() {
                "for_statement" | "while_statement" => {
                    let children = named_children(node);
                    let combined = if is_logarithmic_loop(node, self.source) {
                        // A halving loop does not multiply inner cost the way
                        // a linear loop does: evaluate its body un-nested
                        let body = self.score_time(&children, 0);
                        compose_nested(ComplexityClass::Logarithmic, body)
                    } else {
                        let body = self.score_time(&children, depth + 1);
                        compose_nested(ComplexityClass::at_depth(depth + 1), body)
                    };
                    total = upgrade(total, combined);
                }
                "if_statement" => {
                    // Branches are alternatives, not nested work: same depth
                    let mut branch = match node.child_by_field_name("consequence") {
                        Some(consequence) => self.score_time(&named_children(consequence), depth),
                        None => ComplexityClass::Constant,
                    };
                    for child in named_children(node) {
                        if matches!(child.kind(), "elif_clause" | "else_clause") {
                            let alt = self.score_time(&named_children(child), depth);
                            branch = combine_sequential(branch, alt);
                        }
                    }
                    total = upgrade(total, branch);
                }
                "call" => {
                    let cost = match callee_name(node, self.source) {
                        Some((name, false)) => costs::function_time_cost(name),
                        Some((name, true)) => costs::method_time_cost(name),
                        None => ComplexityClass::Constant,
                    };
                    total = upgrade(total, cost);
                }
                // Scored separately with their own map entries
                "function_definition" => {}
                _ => {
                    let children = named_children(node);
                    if !children.is_empty() {
                        total = upgrade(total, self.score_time(&children, depth));
                    }
                }
            }
        }

        total
    }

    // ----- space pass ------------------------------------------------------

    fn function_space(&self, func: Node<'a>, name: &str) -> ComplexityClass {
        let facts = compute_facts(func, self.source, name);
        if facts.is_recursive() {
            return recursion::space_class(&facts);
        }
        match func.child_by_field_name("body") {
            Some(body) => self.score_space(&named_children(body), 0),
            None => ComplexityClass::Constant,
        }
    }

    /// Score a block of statements for space at the given loop nesting depth.
    fn score_space(&self, nodes: &[Node<'a>], depth: usize) -> ComplexityClass {
        let mut total = ComplexityClass::Constant;

        for &node in nodes {
            match node.kind() {
                "assignment" => {
                    let is_name_target = node
                        .child_by_field_name("left")
                        .is_some_and(|left| left.kind() == "identifier");
                    if is_name_target {
                        if let Some(value) = node.child_by_field_name("right") {
                            let base = value_space_cost(value, self.source);
                            // A growth point inside nested loops scales with
                            // every enclosing iteration
                            let cost = if base > ComplexityClass::Constant && depth > 0 {
                                ComplexityClass::space_at_depth(depth)
                            } else {
                                base
                            };
                            total = upgrade(total, cost);
                        }
                    }
                }
                "for_statement" | "while_statement" => {
                    let body = self.score_space(&named_children(node), depth + 1);
                    if has_accumulating_call(node, self.source) {
                        // Space grows with iterations even with no visible
                        // allocation statement
                        total = upgrade(total, ComplexityClass::space_at_depth(depth + 1));
                    }
                    if body > ComplexityClass::Constant {
                        total = upgrade(total, body);
                    }
                }
                "function_definition" => {
                    // Fold nested recursive functions in; non-recursive nested
                    // definitions already get their own map entry, so folding
                    // them here would double count
                    if let Some(name) = self.function_name(node) {
                        let facts = compute_facts(node, self.source, name);
                        if facts.is_recursive() {
                            total = upgrade(total, recursion::space_class(&facts));
                        }
                    }
                }
                "call" => {
                    let cost = match callee_name(node, self.source) {
                        Some((name, false)) => costs::function_space_cost(name),
                        Some((name, true)) => costs::method_space_cost(name),
                        None => ComplexityClass::Constant,
                    };
                    total = upgrade(total, cost);
                }
                _ => {
                    let children = named_children(node);
                    if !children.is_empty() {
                        total = upgrade(total, self.score_space(&children, depth));
                    }
                }
            }
        }

        total
    }
}

impl Inferencer for TreeInferencer<'_> {
    fn infer_time(&self) -> ComplexityReport {
        let mut functions = BTreeMap::new();
        for func in self.function_definitions() {
            if let Some(name) = self.function_name(func) {
                functions.insert(name.to_string(), self.function_time(func, name));
            }
        }
        let module_level = self.score_time(&patterns::named_children(self.root), 0);
        aggregate::build_report(functions, module_level, false)
    }

    fn infer_space(&self) -> ComplexityReport {
        let mut functions = BTreeMap::new();
        for func in self.function_definitions() {
            if let Some(name) = self.function_name(func) {
                functions.insert(name.to_string(), self.function_space(func, name));
            }
        }
        let module_level = self.score_space(&patterns::named_children(self.root), 0);
        aggregate::build_report(functions, module_level, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lattice::ComplexityClass::*;

    fn time_of(source: &str) -> ComplexityReport {
        let tree = parse_python(source).unwrap();
        TreeInferencer::new(&tree, source).infer_time()
    }

    fn space_of(source: &str) -> ComplexityReport {
        let tree = parse_python(source).unwrap();
        TreeInferencer::new(&tree, source).infer_space()
    }

    #[test]
    fn empty_source_is_constant() {
        let report = time_of("");
        assert_eq!(report.overall, Constant);
        assert!(report.functions.is_empty());
        assert!(!report.estimated);
    }

    #[test]
    fn single_loop_is_linear() {
        let source = "def scan(items):\n    for item in items:\n        total = item\n";
        let report = time_of(source);
        assert_eq!(report.functions["scan"], Linear);
        assert_eq!(report.overall, Linear);
    }

    #[test]
    fn nested_loops_are_quadratic() {
        let source =
            "def pairs(items):\n    for a in items:\n        for b in items:\n            x = a\n";
        let report = time_of(source);
        assert_eq!(report.functions["pairs"], Quadratic);
    }

    #[test]
    fn triple_nesting_is_cubic() {
        let source = "def cube(items):\n    for a in items:\n        for b in items:\n            for c in items:\n                x = a\n";
        let report = time_of(source);
        assert_eq!(report.functions["cube"], Cubic);
    }

    #[test]
    fn halving_loop_is_logarithmic() {
        let source = "def search(arr, x):\n    lo = 0\n    hi = 9\n    while lo <= hi:\n        mid = (lo + hi) // 2\n        lo = mid\n";
        let report = time_of(source);
        assert_eq!(report.functions["search"], Logarithmic);
    }

    #[test]
    fn halving_loop_with_inner_linear_loop_is_linearithmic() {
        let source = "def shrink(items, n):\n    while n > 1:\n        n //= 2\n        for item in items:\n            x = item\n";
        let report = time_of(source);
        assert_eq!(report.functions["shrink"], Linearithmic);
    }

    #[test]
    fn sort_call_is_linearithmic() {
        let source = "def tidy(items):\n    return sorted(items)\n";
        let report = time_of(source);
        assert_eq!(report.functions["tidy"], Linearithmic);
    }

    #[test]
    fn branches_combine_sequentially() {
        // Two alternatives each holding one loop stay linear
        let source = "def pick(items, flag):\n    if flag:\n        for a in items:\n            x = a\n    else:\n        for b in items:\n            y = b\n";
        let report = time_of(source);
        assert_eq!(report.functions["pick"], Linear);
    }

    #[test]
    fn loop_in_branch_nests_under_outer_loop() {
        let source = "def scan(items, flag):\n    for a in items:\n        if flag:\n            for b in items:\n                x = b\n";
        let report = time_of(source);
        assert_eq!(report.functions["scan"], Quadratic);
    }

    #[test]
    fn recursion_table_linear() {
        let source = "def fact(n):\n    if n <= 1:\n        return 1\n    return n * fact(n - 1)\n";
        let report = time_of(source);
        assert_eq!(report.functions["fact"], Linear);
    }

    #[test]
    fn recursion_table_merge_sort() {
        let source = "def merge_sort(arr):\n    if len(arr) <= 1:\n        return arr\n    mid = len(arr) // 2\n    left = merge_sort(arr[:mid])\n    right = merge_sort(arr[mid:])\n    return left + right\n";
        let report = time_of(source);
        assert_eq!(report.functions["merge_sort"], Linearithmic);
    }

    #[test]
    fn recursion_table_binary_search() {
        let source = "def bsearch(arr, lo, hi, x):\n    if lo > hi:\n        return -1\n    mid = (lo + hi) // 2\n    if arr[mid] < x:\n        return bsearch(arr, mid, hi, x)\n    return bsearch(arr, lo, mid, x)\n";
        let report = time_of(source);
        assert_eq!(report.functions["bsearch"], Logarithmic);
    }

    #[test]
    fn recursion_table_fibonacci() {
        let source = "def fib(n):\n    if n < 2:\n        return n\n    return fib(n - 1) + fib(n - 2)\n";
        let report = time_of(source);
        assert_eq!(report.functions["fib"], Quadratic);
    }

    #[test]
    fn module_level_entry_for_top_level_loops() {
        let source = "for i in range(10):\n    for j in range(10):\n        x = i\n";
        let report = time_of(source);
        assert_eq!(report.functions[crate::aggregate::MODULE_LEVEL], Quadratic);
        assert_eq!(report.overall, Quadratic);
    }

    #[test]
    fn module_level_skips_function_bodies() {
        // The quadratic function gets its own entry; top-level code is trivial
        let source = "def pairs(items):\n    for a in items:\n        for b in items:\n            x = a\n\nvalue = 1\n";
        let report = time_of(source);
        assert!(!report.functions.contains_key(crate::aggregate::MODULE_LEVEL));
        assert_eq!(report.overall, Quadratic);
    }

    #[test]
    fn space_literal_rules() {
        let source = "def fixed():\n    a = [1, 2, 3]\n";
        assert_eq!(space_of(source).functions["fixed"], Constant);

        let source = "def grow():\n    a = []\n";
        assert_eq!(space_of(source).functions["grow"], Linear);

        let source = "def comp(items):\n    a = [x for x in items]\n";
        assert_eq!(space_of(source).functions["comp"], Linear);
    }

    #[test]
    fn space_allocation_in_nested_loops_escalates() {
        let source = "def grid(items):\n    for a in items:\n        for b in items:\n            row = []\n";
        assert_eq!(space_of(source).functions["grid"], Quadratic);
    }

    #[test]
    fn space_accumulation_without_allocation() {
        // No allocation statement inside the loop body, but append grows out
        let source = "def collect(items):\n    out = []\n    for item in items:\n        out.append(item)\n";
        assert_eq!(space_of(source).functions["collect"], Linear);
    }

    #[test]
    fn space_recursion_merge_sort_is_linear() {
        let source = "def merge_sort(arr):\n    if len(arr) <= 1:\n        return arr\n    mid = len(arr) // 2\n    left = merge_sort(arr[:mid])\n    right = merge_sort(arr[mid:])\n    return [x for x in left + right]\n";
        assert_eq!(space_of(source).functions["merge_sort"], Linear);
    }

    #[test]
    fn space_recursion_fibonacci_is_quadratic() {
        let source = "def fib(n):\n    if n < 2:\n        return n\n    return fib(n - 1) + fib(n - 2)\n";
        assert_eq!(space_of(source).functions["fib"], Quadratic);
    }

    #[test]
    fn space_call_table() {
        let source = "def snapshot(d):\n    return d.copy()\n";
        assert_eq!(space_of(source).functions["snapshot"], Linear);
    }

    #[test]
    fn estimated_is_false_for_tree_pass() {
        let source = "x = 1\n";
        assert!(!time_of(source).estimated);
        assert!(!space_of(source).estimated);
    }

    #[test]
    fn repeated_analysis_is_identical() {
        let source = "def merge_sort(arr):\n    mid = len(arr) // 2\n    left = merge_sort(arr[:mid])\n    right = merge_sort(arr[mid:])\n    return left + right\n";
        assert_eq!(time_of(source), time_of(source));
        assert_eq!(space_of(source), space_of(source));
    }

    #[test]
    fn syntax_error_is_located() {
        let source = "def broken(:\n    pass\n";
        let tree = parse_python(source).unwrap();
        assert!(tree.root_node().has_error());
        assert_eq!(first_error_line(tree.root_node()), Some(1));
    }

    #[test]
    fn clean_source_has_no_error_line() {
        let source = "def ok():\n    return 1\n";
        let tree = parse_python(source).unwrap();
        assert!(!tree.root_node().has_error());
        assert_eq!(first_error_line(tree.root_node()), None);
    }
}
