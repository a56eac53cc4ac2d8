//! Trace Hierarchy
//!
//! Reconstructs the implicit call/module nesting structure of profiler
//! traces from interval containment alone, and renders it as per-process
//! hierarchy reports.
//!
//! This crate provides the core implementation for the
//! `trace-hierarchy` CLI tool.
//!
//! ## Getting Started
//!
//! Most users should install and use the CLI:
//!
//! ```bash
//! cargo install trace-hierarchy
//! trace-hierarchy --help
//! ```

pub mod aggregator;
pub mod commands;
pub mod hierarchy;
pub mod report;
pub mod trace;
pub mod utils;
