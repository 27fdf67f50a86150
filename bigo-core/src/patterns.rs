//! Structural pattern detectors - pure predicates over parse-tree fragments
//!
//! Each detector is recomputed per function per analysis; nothing here is
//! cached or shared between calls.

use crate::lattice::ComplexityClass;
use tree_sitter::Node;

/// Per-function facts consumed by both the time and the space pass.
///
/// Transient: computed once for a function, discarded at the end of the
/// analysis call.
#[derive(Debug, Clone, Copy, Default)]
pub struct PatternFacts {
    /// Number of direct self-calls by name. Indirect or mutual recursion is
    /// not detected - a documented limitation, not a bug to silently fix.
    pub recursive_call_count: usize,
    /// A halving assignment (`mid = (lo + hi) // 2`) or slice was found
    pub divides_problem: bool,
    /// A slicing subscript was found
    pub has_slicing: bool,
    /// A literal, comprehension, or conversion call produces a fresh collection
    pub creates_container: bool,
}

impl PatternFacts {
    pub fn is_recursive(&self) -> bool {
        self.recursive_call_count > 0
    }
}

/// Slice of source text covered by a node
pub fn node_text<'a>(node: Node<'_>, source: &'a str) -> &'a str {
    &source[node.start_byte()..node.end_byte()]
}

/// Apply `f` to `node` and every descendant, in pre-order
pub fn for_each_node<'a, F: FnMut(Node<'a>)>(node: Node<'a>, f: &mut F) {
    f(node);
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        for_each_node(child, f);
    }
}

/// Named children of a node, collected for slice-style iteration
pub fn named_children<'a>(node: Node<'a>) -> Vec<Node<'a>> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor).collect()
}

/// Name of the callee for a `call` node, split into plain-function vs.
/// method-style. Returns `(name, is_method)`, or `None` for computed callees.
pub fn callee_name<'a>(call: Node<'_>, source: &'a str) -> Option<(&'a str, bool)> {
    let func = call.child_by_field_name("function")?;
    match func.kind() {
        "identifier" => Some((node_text(func, source), false)),
        "attribute" => {
            let attr = func.child_by_field_name("attribute")?;
            Some((node_text(attr, source), true))
        }
        _ => None,
    }
}

/// Compute the recursion/divide/container facts for one function definition.
pub fn compute_facts(func: Node<'_>, source: &str, func_name: &str) -> PatternFacts {
    let mut facts = PatternFacts::default();

    for_each_node(func, &mut |node| match node.kind() {
        "call" => {
            if let Some((name, false)) = callee_name(node, source) {
                if name == func_name {
                    facts.recursive_call_count += 1;
                }
            }
        }
        "list" | "dictionary" | "set" | "list_comprehension" | "dictionary_comprehension"
        | "set_comprehension" => {
            facts.creates_container = true;
        }
        "subscript" => {
            if named_children(node).iter().any(|c| c.kind() == "slice") {
                facts.divides_problem = true;
                facts.has_slicing = true;
            }
        }
        "assignment" => {
            if is_halving_assignment(node, source) {
                facts.divides_problem = true;
            }
        }
        _ => {}
    });

    facts
}

/// True for `x = <expr> // 2` shaped assignments (midpoint computation)
fn is_halving_assignment(assignment: Node<'_>, source: &str) -> bool {
    let Some(right) = assignment.child_by_field_name("right") else {
        return false;
    };
    if right.kind() != "binary_operator" {
        return false;
    }
    let Some(op) = right.child_by_field_name("operator") else {
        return false;
    };
    if node_text(op, source) != "//" {
        return false;
    }
    right
        .child_by_field_name("right")
        .is_some_and(|rhs| rhs.kind() == "integer" && node_text(rhs, source) == "2")
}

/// Detect a logarithmic loop: its control variable is halved each iteration
/// (division or right-shift-by-one update, or a midpoint assignment), or its
/// guard is an ordering comparison consistent with a shrinking-range search.
pub fn is_logarithmic_loop(loop_node: Node<'_>, source: &str) -> bool {
    let mut found = false;

    for_each_node(loop_node, &mut |node| {
        if found {
            return;
        }
        match node.kind() {
            "augmented_assignment" => {
                if is_halving_update(node, source) {
                    found = true;
                }
            }
            "assignment" => {
                if is_halving_assignment(node, source) {
                    found = true;
                }
            }
            "while_statement" => {
                if let Some(cond) = node.child_by_field_name("condition") {
                    if has_ordering_comparison(cond) {
                        found = true;
                    }
                }
            }
            _ => {}
        }
    });

    found
}

/// True for `x //= 2`, `x /= 2`, `x >>= 1` shaped updates
fn is_halving_update(aug: Node<'_>, source: &str) -> bool {
    let Some(op) = aug.child_by_field_name("operator") else {
        return false;
    };
    let Some(rhs) = aug.child_by_field_name("right") else {
        return false;
    };
    if rhs.kind() != "integer" {
        return false;
    }
    match node_text(op, source) {
        "//=" | "/=" => node_text(rhs, source) == "2",
        ">>=" => node_text(rhs, source) == "1",
        _ => false,
    }
}

/// True when the expression contains a strict or partial ordering comparison
fn has_ordering_comparison(expr: Node<'_>) -> bool {
    let mut found = false;
    for_each_node(expr, &mut |node| {
        if node.kind() == "comparison_operator" {
            let mut cursor = node.walk();
            for child in node.children(&mut cursor) {
                if matches!(child.kind(), "<" | "<=" | ">" | ">=") {
                    found = true;
                }
            }
        }
    });
    found
}

/// True when the loop body grows a container on each iteration
/// (append/extend/add/update/insert-style method calls).
pub fn has_accumulating_call(loop_node: Node<'_>, source: &str) -> bool {
    let mut found = false;
    for_each_node(loop_node, &mut |node| {
        if node.kind() == "call" {
            if let Some((name, true)) = callee_name(node, source) {
                if matches!(name, "append" | "extend" | "add" | "update" | "insert") {
                    found = true;
                }
            }
        }
    });
    found
}

/// Space cost of an assigned value: non-empty literal collections are fixed
/// size, empty literals and comprehensions grow, calls go through the table.
pub fn value_space_cost(value: Node<'_>, source: &str) -> ComplexityClass {
    use ComplexityClass::*;
    match value.kind() {
        "list" | "dictionary" | "set" => {
            if value.named_child_count() == 0 {
                Linear // empty literal is a growth point
            } else {
                Constant // fixed-size literal
            }
        }
        "list_comprehension" | "dictionary_comprehension" | "set_comprehension" => Linear,
        "call" => match callee_name(value, source) {
            Some((name, false)) => crate::costs::function_space_cost(name),
            Some((name, true)) => crate::costs::method_space_cost(name),
            None => Constant,
        },
        _ => Constant,
    }
}
