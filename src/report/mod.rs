//! Report output: CSV sheets, JSON documents, Perfetto extraction.
//!
//! The hierarchy core guarantees only ordering and field semantics;
//! everything presentational (indentation, time-unit conversion, file
//! layout) lives here.

pub mod json;
pub mod perfetto;
pub mod table;

// Re-export main types and functions
pub use json::{read_report, write_report, GroupHierarchy, HierarchyReport};
pub use perfetto::{build_extracted_trace, save_extracted_trace, ExtractedTrace};
pub use table::write_table_report;
