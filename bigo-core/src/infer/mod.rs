//! Complexity inference passes
//!
//! Two independent heuristics behind one capability interface: a tree-based
//! pass for languages with a full parse tree and a text-based pass for the
//! rest. Both produce the same result shape so callers never branch on the
//! pass kind.

pub mod text;
pub mod tree;

use crate::report::ComplexityReport;

/// Capability interface implemented by both passes, selected by language tag
pub trait Inferencer {
    fn infer_time(&self) -> ComplexityReport;
    fn infer_space(&self) -> ComplexityReport;
}
