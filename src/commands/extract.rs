//! Extract command implementation.
//!
//! Narrows a full trace down to kernel and module-scope events and
//! re-emits it as a Perfetto-compatible JSON file, so large traces stay
//! loadable in the UI.

use crate::aggregator::EventStats;
use crate::report::{build_extracted_trace, save_extracted_trace};
use crate::trace::load_trace_file;
use anyhow::{Context, Result};
use log::{info, warn};
use std::path::{Path, PathBuf};

/// Arguments for the extract command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct ExtractArgs {
    /// Path to the input trace file (.json or .json.gz)
    pub trace_file: PathBuf,

    /// Output path (default: `<input>_kernel_module.json`)
    pub output: Option<PathBuf>,

    /// Extract only kernel events
    pub kernel_only: bool,

    /// Gzip-compress the output
    pub compress: bool,

    /// Skip the statistics printout
    pub skip_analysis: bool,
}

/// Execute the extract command
///
/// **Public** - main entry point called from main.rs
pub fn execute_extract(args: ExtractArgs) -> Result<()> {
    let trace = load_trace_file(&args.trace_file).context("Failed to load trace file")?;

    let extracted = build_extracted_trace(&trace, args.kernel_only);

    if extracted.trace_events.is_empty() {
        anyhow::bail!("No kernel or module events found in trace file");
    }

    if !args.skip_analysis {
        let refs: Vec<_> = extracted.trace_events.iter().collect();
        println!("{}", EventStats::from_events(&refs).render(10));
    }

    let output = args.output.clone().unwrap_or_else(|| {
        default_output_path(&args.trace_file, args.kernel_only, args.compress)
    });

    if args.compress && output.extension().is_some_and(|e| e != "gz") {
        warn!("--compress set but output does not end in .gz; writing uncompressed");
    }

    save_extracted_trace(&extracted, &output).context("Failed to save extracted trace")?;

    info!("✓ Extracted trace written to: {}", output.display());

    Ok(())
}

/// Derive the default output path from the input path
///
/// **Private** - strips `.gz` and `.json` before appending the suffix
fn default_output_path(input: &Path, kernel_only: bool, compress: bool) -> PathBuf {
    let mut stem = input.to_path_buf();
    if stem.extension().is_some_and(|e| e == "gz") {
        stem.set_extension("");
    }
    if stem.extension().is_some_and(|e| e == "json") {
        stem.set_extension("");
    }

    let suffix = if kernel_only { "_kernel" } else { "_kernel_module" };
    let ext = if compress { "json.gz" } else { "json" };

    PathBuf::from(format!("{}{}.{}", stem.display(), suffix, ext))
}

/// Validate extract arguments
///
/// **Public** - can be called before execute_extract
pub fn validate_args(args: &ExtractArgs) -> Result<()> {
    if !args.trace_file.exists() {
        anyhow::bail!("Trace file not found: {}", args.trace_file.display());
    }

    if let Some(output) = &args.output {
        if output.as_os_str().is_empty() {
            anyhow::bail!("Output path cannot be empty");
        }
    }

    Ok(())
}
