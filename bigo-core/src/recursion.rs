//! Recursive-function heuristics - fixed lookup tables over pattern facts
//!
//! Call-stack cost is not expressible as loop nesting depth, so recursive
//! functions bypass the generic walk and come here instead. These are named,
//! fixed heuristics keyed on `(call-count bucket, divides, has_slice,
//! creates_container)` - every branch is enumerable and independently
//! testable, with no silent fallthrough.

use crate::lattice::ComplexityClass;
use crate::patterns::PatternFacts;

/// Time class for a recursive function.
///
/// - 1 self-call: linear recursion depth
/// - 2 self-calls with divide + slice: merge-sort shaped
/// - 2 self-calls with divide, no slice: binary-search shaped
/// - 2 self-calls with neither: Fibonacci shaped
/// - 3 or more self-calls: polynomial blowup
pub fn time_class(facts: &PatternFacts) -> ComplexityClass {
    use ComplexityClass::*;
    match (
        facts.recursive_call_count,
        facts.divides_problem,
        facts.has_slicing,
    ) {
        (0, _, _) => Constant,
        (1, _, _) => Linear,
        (2, true, true) => Linearithmic,
        (2, true, false) => Logarithmic,
        (2, false, _) => Quadratic,
        (_, _, _) => Polynomial,
    }
}

/// Space class for a recursive function.
///
/// When each call allocates a container, the copies dominate: divide-and-
/// conquer with slicing totals O(n), anything else O(n²). Without
/// allocation, stack depth alone governs: divide-only recursion is
/// logarithmic depth, a single self-call is linear depth, and multiple
/// self-calls without division branch quadratically.
pub fn space_class(facts: &PatternFacts) -> ComplexityClass {
    use ComplexityClass::*;
    match (
        facts.creates_container,
        facts.divides_problem,
        facts.has_slicing,
        facts.recursive_call_count,
    ) {
        (true, true, true, _) => Linear,
        (true, _, _, _) => Quadratic,
        (false, true, _, _) => Logarithmic,
        (false, false, _, 1) => Linear,
        (false, false, _, _) => Quadratic,
    }
}
