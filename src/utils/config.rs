//! Configuration and constants for the CLI.

/// Current report schema version
pub const SCHEMA_VERSION: &str = "1.0.0";

/// Category assigned to NVTX range annotations by the profiler
pub const NVTX_CATEGORY: &str = "user_nvtx_annotation";

/// Category assigned to device kernel events
pub const KERNEL_CATEGORY: &str = "kernel";

/// Name prefix used by module-scope events
pub const MODULE_NAME_PREFIX: &str = "nn.Module";

/// Marker embedded in the pid of synthetic model-structure processes
pub const MODEL_STRUCTURE_MARKER: &str = "[Model Structure]";

/// Chrome trace phase value for metadata events
pub const METADATA_PHASE: &str = "M";

/// Metadata event names preserved when re-emitting a filtered trace
pub const METADATA_EVENT_NAMES: &[&str] = &[
    "process_name",
    "process_sort_index",
    "thread_name",
    "thread_sort_index",
];

/// Top-level trace fields carried over into extracted traces
pub const TRACE_METADATA_FIELDS: &[&str] = &[
    "displayTimeUnit",
    "otherData",
    "deviceProperties",
    "distributedInfo",
];

/// Trace timestamps are in microseconds; reports display milliseconds
pub const MICROS_PER_MILLI: f64 = 1000.0;

/// Spaces per depth level in the tabular hierarchy column
pub const INDENT_WIDTH: usize = 4;
