//! Report command implementation.
//!
//! The report command:
//! 1. Loads the trace file
//! 2. Filters events for the selected mode
//! 3. Groups events by pid
//! 4. Builds the containment hierarchy per group
//! 5. Writes CSV sheets (and optionally a JSON report)

use crate::aggregator::EventStats;
use crate::hierarchy::{build_hierarchy, BuildPolicy, HierarchyEntry};
use crate::report::{write_report, write_table_report, HierarchyReport};
use crate::trace::{
    events_with_category, group_by_pid, load_trace_file, model_structure_events, to_intervals,
    TraceEvent,
};
use crate::utils::config::NVTX_CATEGORY;
use anyhow::{Context, Result};
use clap::ValueEnum;
use log::{debug, info};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Instant;

/// Which flavor of trace events to report on
///
/// Each mode corresponds to one of the legacy report scripts and brings
/// its own numbered-layer policy default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportMode {
    /// NVTX range annotations (category `user_nvtx_annotation`)
    Nvtx,
    /// Synthetic model-structure processes
    Modules,
}

impl ReportMode {
    /// Default policy pair for this mode
    ///
    /// NVTX traces use digit-named layer annotations, so both
    /// numbered-layer flags are on; model-structure traces have real
    /// module names and want neither.
    pub fn default_policy(&self) -> BuildPolicy {
        match self {
            ReportMode::Nvtx => BuildPolicy::numeric_layers(),
            ReportMode::Modules => BuildPolicy::plain(),
        }
    }
}

/// Arguments for the report command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct ReportArgs {
    /// Path to the trace file (.json or .json.gz)
    pub trace_file: PathBuf,

    /// Directory receiving one CSV sheet per process
    pub output_dir: PathBuf,

    /// Optional path for a combined JSON report
    pub output_json: Option<PathBuf>,

    /// Event selection mode
    pub mode: ReportMode,

    /// Override for the numbered-layer policy pair (None = mode default)
    pub numeric_layers: Option<bool>,

    /// Print per-group statistics to stdout
    pub print_summary: bool,
}

impl Default for ReportArgs {
    fn default() -> Self {
        Self {
            trace_file: PathBuf::new(),
            output_dir: PathBuf::from("hierarchy"),
            output_json: None,
            mode: ReportMode::Nvtx,
            numeric_layers: None,
            print_summary: false,
        }
    }
}

impl ReportArgs {
    /// Resolve the effective build policy
    ///
    /// Both flags always move together; the override flips the pair.
    pub fn policy(&self) -> BuildPolicy {
        match self.numeric_layers {
            Some(true) => BuildPolicy::numeric_layers(),
            Some(false) => BuildPolicy::plain(),
            None => self.mode.default_policy(),
        }
    }
}

/// Execute the report command
///
/// **Public** - main entry point called from main.rs
///
/// # Errors
/// * Trace loading failures
/// * Malformed intervals (negative durations)
/// * File write errors
pub fn execute_report(args: ReportArgs) -> Result<()> {
    let start_time = Instant::now();
    let policy = args.policy();

    info!("Building hierarchy report from: {}", args.trace_file.display());
    debug!("Policy: {:?}", policy);

    // Step 1: Load trace
    info!("Step 1/4: Loading trace file...");
    let trace = load_trace_file(&args.trace_file).context("Failed to load trace file")?;

    // Step 2: Filter and group events
    info!("Step 2/4: Filtering and grouping events...");
    let selected: Vec<&TraceEvent> = match args.mode {
        ReportMode::Nvtx => events_with_category(&trace.trace_events, NVTX_CATEGORY),
        ReportMode::Modules => model_structure_events(&trace.trace_events),
    };

    if selected.is_empty() {
        anyhow::bail!(
            "No matching events found in trace file (mode: {:?})",
            args.mode
        );
    }

    let groups = group_by_pid(&selected);
    info!("Found {} process group(s)", groups.len());

    // Step 3: Build hierarchy per group
    info!("Step 3/4: Building hierarchies...");
    let mut hierarchies: BTreeMap<String, Vec<HierarchyEntry>> = BTreeMap::new();

    for (key, events) in &groups {
        debug!("Building hierarchy for {} ({} events)", key, events.len());

        let intervals = to_intervals(events)
            .with_context(|| format!("Malformed interval in group {}", key))?;
        hierarchies.insert(key.clone(), build_hierarchy(&intervals, &policy));
    }

    // Step 4: Write outputs
    info!("Step 4/4: Writing output files...");
    let written = write_table_report(&hierarchies, &args.output_dir)
        .context("Failed to write CSV sheets")?;

    for path in &written {
        info!("✓ Sheet written to: {}", path.display());
    }

    if let Some(json_path) = &args.output_json {
        let report = HierarchyReport::new(&args.trace_file.display().to_string(), hierarchies);
        write_report(&report, json_path).context("Failed to write JSON report")?;

        info!("✓ Report written to: {}", json_path.display());
    }

    if args.print_summary {
        for (key, events) in &groups {
            println!("\n{}", "=".repeat(80));
            println!("GROUP {}", key);
            println!("{}", "=".repeat(80));
            println!("{}", EventStats::from_events(events).render(10));
        }
    }

    let elapsed = start_time.elapsed();
    info!("Report completed in {:.2}s", elapsed.as_secs_f64());

    Ok(())
}

/// Validate report arguments
///
/// **Public** - can be called before execute_report for early validation
pub fn validate_args(args: &ReportArgs) -> Result<()> {
    if args.trace_file.as_os_str().is_empty() {
        anyhow::bail!("Trace file path cannot be empty");
    }

    if !args.trace_file.exists() {
        anyhow::bail!("Trace file not found: {}", args.trace_file.display());
    }

    let ext = args
        .trace_file
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("");
    if ext != "json" && ext != "gz" {
        anyhow::bail!("Trace file must be a .json or .json.gz file");
    }

    if args.output_dir.as_os_str().is_empty() {
        anyhow::bail!("Output directory cannot be empty");
    }

    if let Some(json_path) = &args.output_json {
        if json_path.as_os_str().is_empty() {
            anyhow::bail!("JSON report path cannot be empty");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn existing_trace() -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trace.json");
        std::fs::write(&path, r#"{"traceEvents": []}"#).unwrap();
        (dir, path)
    }

    #[test]
    fn test_validate_args_valid() {
        let (_dir, trace_file) = existing_trace();
        let args = ReportArgs {
            trace_file,
            ..Default::default()
        };

        assert!(validate_args(&args).is_ok());
    }

    #[test]
    fn test_validate_args_missing_file() {
        let args = ReportArgs {
            trace_file: PathBuf::from("/no/such/trace.json"),
            ..Default::default()
        };

        assert!(validate_args(&args).is_err());
    }

    #[test]
    fn test_validate_args_wrong_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trace.txt");
        std::fs::write(&path, "{}").unwrap();

        let args = ReportArgs {
            trace_file: path,
            ..Default::default()
        };

        assert!(validate_args(&args).is_err());
    }

    #[test]
    fn test_validate_args_empty_output_dir() {
        let (_dir, trace_file) = existing_trace();
        let args = ReportArgs {
            trace_file,
            output_dir: PathBuf::new(),
            ..Default::default()
        };

        assert!(validate_args(&args).is_err());
    }

    #[test]
    fn test_policy_defaults_per_mode() {
        let nvtx = ReportArgs {
            mode: ReportMode::Nvtx,
            ..Default::default()
        };
        assert_eq!(nvtx.policy(), BuildPolicy::numeric_layers());

        let modules = ReportArgs {
            mode: ReportMode::Modules,
            ..Default::default()
        };
        assert_eq!(modules.policy(), BuildPolicy::plain());
    }

    #[test]
    fn test_policy_override_flips_both_flags() {
        let args = ReportArgs {
            mode: ReportMode::Nvtx,
            numeric_layers: Some(false),
            ..Default::default()
        };

        let policy = args.policy();
        assert!(!policy.exclude_numeric_roots);
        assert!(!policy.flatten_numeric_children);
    }
}
