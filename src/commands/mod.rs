//! CLI command implementations.
//!
//! Each command is implemented in its own module.
//! Commands orchestrate the various library components to perform user tasks.

pub mod analyze;
pub mod extract;
pub mod report;

// Re-export main command functions
pub use analyze::{execute_analyze, AnalyzeArgs};
pub use extract::{execute_extract, ExtractArgs};
pub use report::{execute_report, ReportArgs, ReportMode};
