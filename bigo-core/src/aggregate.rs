//! Fold per-function classes into a file-level complexity report

use crate::lattice::{upgrade, ComplexityClass};
use crate::report::ComplexityReport;
use std::collections::BTreeMap;

/// Synthetic map key for top-level (non-function) statements
pub const MODULE_LEVEL: &str = "<module-level>";

/// Roll per-function classes into one overall value (the worst case).
///
/// The module-level class joins the map only when non-trivial. An empty
/// input yields `overall = O(1)` with an empty function map.
pub fn build_report(
    mut functions: BTreeMap<String, ComplexityClass>,
    module_level: ComplexityClass,
    estimated: bool,
) -> ComplexityReport {
    if module_level > ComplexityClass::Constant {
        functions.insert(MODULE_LEVEL.to_string(), module_level);
    }

    let overall = functions
        .values()
        .copied()
        .fold(ComplexityClass::Constant, upgrade);

    ComplexityReport {
        overall,
        functions,
        estimated,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lattice::ComplexityClass::*;

    #[test]
    fn empty_input_is_constant() {
        let report = build_report(BTreeMap::new(), Constant, false);
        assert_eq!(report.overall, Constant);
        assert!(report.functions.is_empty());
    }

    #[test]
    fn overall_is_worst_case() {
        let mut functions = BTreeMap::new();
        functions.insert("a".to_string(), Linear);
        functions.insert("b".to_string(), Quadratic);
        functions.insert("c".to_string(), Logarithmic);
        let report = build_report(functions, Constant, false);
        assert_eq!(report.overall, Quadratic);
        assert!(!report.functions.contains_key(MODULE_LEVEL));
    }

    #[test]
    fn module_level_included_only_when_nontrivial() {
        let report = build_report(BTreeMap::new(), Linear, false);
        assert_eq!(report.overall, Linear);
        assert_eq!(report.functions.get(MODULE_LEVEL), Some(&Linear));

        let trivial = build_report(BTreeMap::new(), Constant, false);
        assert!(!trivial.functions.contains_key(MODULE_LEVEL));
    }

    #[test]
    fn module_level_can_dominate() {
        let mut functions = BTreeMap::new();
        functions.insert("a".to_string(), Linear);
        let report = build_report(functions, Quadratic, true);
        assert_eq!(report.overall, Quadratic);
        assert!(report.estimated);
    }

    #[test]
    fn invariant_overall_equals_max_of_map() {
        let mut functions = BTreeMap::new();
        functions.insert("x".to_string(), Linearithmic);
        let report = build_report(functions, Linear, false);
        let max = report.functions.values().copied().max().unwrap();
        assert_eq!(report.overall, max);
    }
}
