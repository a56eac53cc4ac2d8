//! Trace Hierarchy CLI
//!
//! Rebuilds the call/module nesting structure of profiler trace files
//! and writes per-process hierarchy reports.

use anyhow::Result;
use clap::{Parser, Subcommand};
use env_logger::Env;
use std::path::PathBuf;

use trace_hierarchy::commands::{analyze, extract, report};
use trace_hierarchy::commands::{AnalyzeArgs, ExtractArgs, ReportArgs, ReportMode};
use trace_hierarchy::utils::config::SCHEMA_VERSION;

/// Trace Hierarchy - nesting structure reports for profiler traces
#[derive(Parser, Debug)]
#[command(name = "trace-hierarchy")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Build hierarchy reports from a trace file
    Report {
        /// Path to the trace file (.json or .json.gz)
        #[arg(short, long)]
        trace_file: PathBuf,

        /// Output directory for CSV sheets (one per process)
        #[arg(short, long, default_value = "hierarchy")]
        output: PathBuf,

        /// Optional path for a combined JSON report
        #[arg(long)]
        json: Option<PathBuf>,

        /// Event selection mode
        #[arg(long, value_enum, default_value = "nvtx")]
        mode: ReportMode,

        /// Treat digit-named events as numbered layers (overrides the
        /// mode default; flips both layer policies together)
        #[arg(long)]
        numeric_layers: Option<bool>,

        /// Print per-process statistics to stdout
        #[arg(long)]
        summary: bool,
    },

    /// Print summary statistics for a trace file
    Analyze {
        /// Path to the trace file (.json or .json.gz)
        #[arg(short, long)]
        trace_file: PathBuf,

        /// Number of most-frequent names to list
        #[arg(long, default_value = "10")]
        top: usize,
    },

    /// Extract kernel/module events into a Perfetto-compatible trace
    Extract {
        /// Path to the trace file (.json or .json.gz)
        #[arg(short, long)]
        trace_file: PathBuf,

        /// Output path (default: <input>_kernel_module.json)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Extract only kernel events
        #[arg(long)]
        kernel_only: bool,

        /// Gzip-compress the output
        #[arg(long)]
        compress: bool,

        /// Skip the statistics printout
        #[arg(long)]
        no_analysis: bool,
    },

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    // Execute command
    match cli.command {
        Commands::Report {
            trace_file,
            output,
            json,
            mode,
            numeric_layers,
            summary,
        } => {
            let args = ReportArgs {
                trace_file,
                output_dir: output,
                output_json: json,
                mode,
                numeric_layers,
                print_summary: summary,
            };

            report::validate_args(&args)?;
            report::execute_report(args)?;
        }

        Commands::Analyze { trace_file, top } => {
            let args = AnalyzeArgs { trace_file, top };

            analyze::validate_args(&args)?;
            analyze::execute_analyze(args)?;
        }

        Commands::Extract {
            trace_file,
            output,
            kernel_only,
            compress,
            no_analysis,
        } => {
            let args = ExtractArgs {
                trace_file,
                output,
                kernel_only,
                compress,
                skip_analysis: no_analysis,
            };

            extract::validate_args(&args)?;
            extract::execute_extract(args)?;
        }

        Commands::Version => {
            display_version();
        }
    }

    Ok(())
}

/// Display version information
///
/// **Private** - internal command implementation
fn display_version() {
    println!("Trace Hierarchy v{}", env!("CARGO_PKG_VERSION"));
    println!("Report Schema: v{}", SCHEMA_VERSION);
    println!();
    println!("Nesting structure reports for profiler trace files.");
}
