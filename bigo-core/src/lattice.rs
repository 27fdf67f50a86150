//! Complexity class lattice - the total order every other module routes through
//!
//! Global invariants enforced:
//! - Ordering is total and fixed; comparisons never go through strings
//! - Combination operators are defined for every pair of classes
//! - Unrecognized class tokens normalize to O(1) (fail-soft, never fail-hard)

use serde::{Deserialize, Serialize};
use std::fmt;

/// A qualitative asymptotic bound, drawn from a fixed totally ordered set.
///
/// The derived `Ord` follows declaration order, which is the lattice order:
/// `O(1) < O(log n) < O(n) < O(n log n) < O(n²) < O(n³) < O(n³+) < O(n!)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum ComplexityClass {
    #[default]
    Constant,
    Logarithmic,
    Linear,
    Linearithmic,
    Quadratic,
    Cubic,
    Polynomial,
    Factorial,
}

impl ComplexityClass {
    /// Canonical display token for this class
    pub fn as_str(&self) -> &'static str {
        match self {
            ComplexityClass::Constant => "O(1)",
            ComplexityClass::Logarithmic => "O(log n)",
            ComplexityClass::Linear => "O(n)",
            ComplexityClass::Linearithmic => "O(n log n)",
            ComplexityClass::Quadratic => "O(n²)",
            ComplexityClass::Cubic => "O(n³)",
            ComplexityClass::Polynomial => "O(n³+)",
            ComplexityClass::Factorial => "O(n!)",
        }
    }

    /// Parse a class token. Unrecognized tokens normalize to `O(1)` so a
    /// heuristic miss can only ever under-estimate, never abort an analysis.
    pub fn from_token(token: &str) -> Self {
        match token {
            "O(1)" => ComplexityClass::Constant,
            "O(log n)" => ComplexityClass::Logarithmic,
            "O(n)" => ComplexityClass::Linear,
            "O(n log n)" => ComplexityClass::Linearithmic,
            "O(n²)" | "O(n^2)" => ComplexityClass::Quadratic,
            "O(n³)" | "O(n^3)" => ComplexityClass::Cubic,
            "O(n³+)" | "O(n^3+)" => ComplexityClass::Polynomial,
            "O(n!)" => ComplexityClass::Factorial,
            _ => ComplexityClass::Constant,
        }
    }

    /// Class assigned to a loop at the given nesting depth (time pass ladder)
    pub fn at_depth(depth: usize) -> Self {
        match depth {
            0 => ComplexityClass::Constant,
            1 => ComplexityClass::Linear,
            2 => ComplexityClass::Quadratic,
            3 => ComplexityClass::Cubic,
            _ => ComplexityClass::Polynomial,
        }
    }

    /// Class assigned to an allocation at the given loop nesting depth
    /// (space pass ladder - an allocation outside any loop is linear only
    /// when the allocation itself is, so depth 0 is never consulted here)
    pub fn space_at_depth(depth: usize) -> Self {
        match depth {
            0 | 1 => ComplexityClass::Linear,
            2 => ComplexityClass::Quadratic,
            3 => ComplexityClass::Cubic,
            _ => ComplexityClass::Polynomial,
        }
    }
}

impl fmt::Display for ComplexityClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ComplexityClass {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ComplexityClass {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let token = String::deserialize(deserializer)?;
        Ok(ComplexityClass::from_token(&token))
    }
}

/// Cost of two statements executed one after another: the worse of the two.
pub fn combine_sequential(a: ComplexityClass, b: ComplexityClass) -> ComplexityClass {
    a.max(b)
}

/// Cost of nesting `outer` iteration around a body of cost `inner`.
///
/// `O(1)` is the identity on either side. Nesting a linear loop around a
/// logarithmic body (or vice versa) yields `O(n log n)` - taking the plain
/// maximum there would under-count the true nested cost. All other pairs
/// collapse to the maximum, since the outer class already encodes the
/// nesting depth ladder.
pub fn compose_nested(outer: ComplexityClass, inner: ComplexityClass) -> ComplexityClass {
    use ComplexityClass::*;
    match (outer, inner) {
        (Constant, x) | (x, Constant) => x,
        (Linear, Logarithmic) | (Logarithmic, Linear) => Linearithmic,
        (a, b) => a.max(b),
    }
}

/// Raise a running estimate: the result is never lower than either input.
pub fn upgrade(current: ComplexityClass, candidate: ComplexityClass) -> ComplexityClass {
    current.max(candidate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ComplexityClass::*;

    const ALL: [ComplexityClass; 8] = [
        Constant,
        Logarithmic,
        Linear,
        Linearithmic,
        Quadratic,
        Cubic,
        Polynomial,
        Factorial,
    ];

    #[test]
    fn order_is_total_and_fixed() {
        for window in ALL.windows(2) {
            assert!(window[0] < window[1]);
        }
    }

    #[test]
    fn combine_sequential_is_commutative_max() {
        for &a in &ALL {
            for &b in &ALL {
                let combined = combine_sequential(a, b);
                assert_eq!(combined, combine_sequential(b, a));
                assert_eq!(combined, a.max(b));
            }
        }
    }

    #[test]
    fn upgrade_is_monotonic() {
        for &a in &ALL {
            for &b in &ALL {
                let up = upgrade(a, b);
                assert!(up >= a);
                assert!(up >= b);
            }
        }
    }

    #[test]
    fn compose_nested_is_total() {
        for &a in &ALL {
            for &b in &ALL {
                // Every pair composes; result never drops below either input
                let composed = compose_nested(a, b);
                assert!(composed >= a.min(b));
            }
        }
    }

    #[test]
    fn compose_nested_special_cases() {
        assert_eq!(compose_nested(Linear, Logarithmic), Linearithmic);
        assert_eq!(compose_nested(Logarithmic, Linear), Linearithmic);
        assert_eq!(compose_nested(Constant, Quadratic), Quadratic);
        assert_eq!(compose_nested(Quadratic, Constant), Quadratic);
        assert_eq!(compose_nested(Linear, Quadratic), Quadratic);
    }

    #[test]
    fn unknown_token_normalizes_to_constant() {
        assert_eq!(ComplexityClass::from_token("O(2^n)"), Constant);
        assert_eq!(ComplexityClass::from_token(""), Constant);
        assert_eq!(ComplexityClass::from_token("garbage"), Constant);
        // Neutral element: upgrading with an unknown token changes nothing
        for &a in &ALL {
            assert_eq!(upgrade(a, ComplexityClass::from_token("garbage")), a);
        }
    }

    #[test]
    fn token_round_trip() {
        for &a in &ALL {
            assert_eq!(ComplexityClass::from_token(a.as_str()), a);
        }
    }

    #[test]
    fn depth_ladders() {
        assert_eq!(ComplexityClass::at_depth(0), Constant);
        assert_eq!(ComplexityClass::at_depth(1), Linear);
        assert_eq!(ComplexityClass::at_depth(2), Quadratic);
        assert_eq!(ComplexityClass::at_depth(3), Cubic);
        assert_eq!(ComplexityClass::at_depth(7), Polynomial);
        assert_eq!(ComplexityClass::space_at_depth(1), Linear);
        assert_eq!(ComplexityClass::space_at_depth(2), Quadratic);
        assert_eq!(ComplexityClass::space_at_depth(5), Polynomial);
    }
}
