//! Trace ingestion: loading, event schema, filtering and grouping.
//!
//! This module handles:
//! - Loading `.json` / `.json.gz` trace files
//! - The Chrome-trace-format event schema
//! - Category, name-prefix and model-structure filters
//! - Grouping by pid and conversion to validated intervals

pub mod event;
pub mod filter;
pub mod loader;

// Re-export main types and functions
pub use event::{TraceEvent, TraceId};
pub use filter::{
    events_with_category, events_with_name_prefix, group_by_pid, model_structure_events,
    module_events, to_intervals,
};
pub use loader::{load_trace_file, TraceData};
