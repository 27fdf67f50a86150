//! Call-cost tables - fixed costs for well-known built-in operations
//!
//! Static configuration data, not computed results. Time and space tables
//! are independently defined: the same name may cost differently on each
//! axis (`sorted` is O(n log n) time but O(n) space). Unknown names default
//! to O(1) - a deliberate approximation policy that can only under-estimate.

use crate::lattice::ComplexityClass;

/// Time cost of a plain function call by name
pub fn function_time_cost(name: &str) -> ComplexityClass {
    use ComplexityClass::*;
    match name {
        "sorted" => Linearithmic,
        "max" | "min" | "sum" => Linear,
        // Container conversions copy their input
        "list" | "tuple" | "set" | "dict" => Linear,
        "len" | "abs" | "int" | "float" | "str" => Constant,
        // Iterator constructors are lazy
        "enumerate" | "zip" | "range" | "reversed" => Constant,
        _ => Constant,
    }
}

/// Time cost of a method-style call by attribute name
pub fn method_time_cost(name: &str) -> ComplexityClass {
    use ComplexityClass::*;
    match name {
        "sort" => Linearithmic,
        "append" | "pop" | "clear" | "get" => Constant,
        // View-returning accessors do not copy
        "keys" | "values" | "items" => Constant,
        "insert" | "remove" | "index" | "count" | "reverse" | "copy" => Linear,
        "split" | "join" | "replace" | "strip" | "find" => Linear,
        // O(k) bulk updates, treated as O(n) for lattice purposes
        "extend" | "update" => Linear,
        _ => Constant,
    }
}

/// Space cost of a plain function call by name
pub fn function_space_cost(name: &str) -> ComplexityClass {
    use ComplexityClass::*;
    match name {
        // Conversions materialize a fresh collection
        "list" | "dict" | "set" | "tuple" => Linear,
        // sorted builds a new list; range is lazy
        "sorted" => Linear,
        "range" => Constant,
        _ => Constant,
    }
}

/// Space cost of a method-style call by attribute name
pub fn method_space_cost(name: &str) -> ComplexityClass {
    use ComplexityClass::*;
    match name {
        "copy" | "deepcopy" => Linear,
        "split" | "splitlines" => Linear,
        // Treated as copying views here, unlike the time table
        "keys" | "values" | "items" => Linear,
        _ => Constant,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lattice::ComplexityClass::*;

    #[test]
    fn sort_family_is_linearithmic_time() {
        assert_eq!(function_time_cost("sorted"), Linearithmic);
        assert_eq!(method_time_cost("sort"), Linearithmic);
    }

    #[test]
    fn time_and_space_tables_are_independent() {
        assert_eq!(function_time_cost("sorted"), Linearithmic);
        assert_eq!(function_space_cost("sorted"), Linear);
        assert_eq!(method_time_cost("keys"), Constant);
        assert_eq!(method_space_cost("keys"), Linear);
    }

    #[test]
    fn conversions_are_linear() {
        for name in ["list", "tuple", "set", "dict"] {
            assert_eq!(function_time_cost(name), Linear);
            assert_eq!(function_space_cost(name), Linear);
        }
    }

    #[test]
    fn unknown_names_default_to_constant() {
        assert_eq!(function_time_cost("frobnicate"), Constant);
        assert_eq!(method_time_cost("frobnicate"), Constant);
        assert_eq!(function_space_cost("frobnicate"), Constant);
        assert_eq!(method_space_cost("frobnicate"), Constant);
    }

    #[test]
    fn mutating_bulk_updates_are_linear() {
        assert_eq!(method_time_cost("extend"), Linear);
        assert_eq!(method_time_cost("update"), Linear);
    }
}
