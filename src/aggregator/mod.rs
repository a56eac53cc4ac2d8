//! Aggregation of filtered events into summary statistics.
//!
//! Everything structural lives in `hierarchy`; this module only counts
//! and summarizes for human-readable output.

pub mod stats;

// Re-export main types
pub use stats::EventStats;
