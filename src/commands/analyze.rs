//! Analyze command implementation.
//!
//! Loads a trace and prints summary statistics for each event family of
//! interest: NVTX annotations, device kernels and module-scope events.
//! No files are written.

use crate::aggregator::EventStats;
use crate::trace::{events_with_category, load_trace_file, module_events, TraceEvent};
use crate::utils::config::{KERNEL_CATEGORY, NVTX_CATEGORY};
use anyhow::{Context, Result};
use std::path::PathBuf;

/// Arguments for the analyze command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct AnalyzeArgs {
    /// Path to the trace file (.json or .json.gz)
    pub trace_file: PathBuf,

    /// Number of most-frequent names to list per section
    pub top: usize,
}

/// Execute the analyze command
///
/// **Public** - main entry point called from main.rs
pub fn execute_analyze(args: AnalyzeArgs) -> Result<()> {
    let trace = load_trace_file(&args.trace_file).context("Failed to load trace file")?;

    print_section(
        "NVTX Annotation Analysis",
        &events_with_category(&trace.trace_events, NVTX_CATEGORY),
        args.top,
    );
    print_section(
        "Kernel Events Analysis",
        &events_with_category(&trace.trace_events, KERNEL_CATEGORY),
        args.top,
    );
    print_section(
        "Module Events Analysis",
        &module_events(&trace.trace_events),
        args.top,
    );

    Ok(())
}

/// Print one statistics section, skipping empty event sets
///
/// **Private** - internal helper for execute_analyze
fn print_section(title: &str, events: &[&TraceEvent], top: usize) {
    if events.is_empty() {
        return;
    }

    println!("\n{}", "=".repeat(60));
    println!("{}", title);
    println!("{}", "=".repeat(60));
    println!("{}", EventStats::from_events(events).render(top));
}

/// Validate analyze arguments
///
/// **Public** - can be called before execute_analyze
pub fn validate_args(args: &AnalyzeArgs) -> Result<()> {
    if !args.trace_file.exists() {
        anyhow::bail!("Trace file not found: {}", args.trace_file.display());
    }

    if args.top == 0 {
        anyhow::bail!("top must be greater than 0");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_args_missing_file() {
        let args = AnalyzeArgs {
            trace_file: PathBuf::from("/no/such/trace.json"),
            top: 10,
        };
        assert!(validate_args(&args).is_err());
    }

    #[test]
    fn test_validate_args_zero_top() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trace.json");
        std::fs::write(&path, r#"{"traceEvents": []}"#).unwrap();

        let args = AnalyzeArgs {
            trace_file: path,
            top: 0,
        };
        assert!(validate_args(&args).is_err());
    }
}
