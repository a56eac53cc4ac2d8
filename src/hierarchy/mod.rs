//! The interval containment hierarchy core.
//!
//! Reconstructs the implicit call/module nesting of a flat, grouped
//! event list using only interval containment:
//! - Interval records and the strict containment predicate
//! - Root selection (maximal intervals)
//! - Recursive nearest-containment child assignment, linearized into a
//!   depth-annotated pre-order sequence
//!
//! The core is pure and stateless: one call per grouping key, no I/O,
//! no shared state. Callers may fan out across keys freely.

pub mod builder;
pub mod interval;
pub mod roots;

// Re-export main types and functions
pub use builder::{build_hierarchy, BuildPolicy, HierarchyEntry};
pub use interval::Interval;
pub use roots::select_roots;
