//! Trace file loading.
//!
//! Supports plain `.json` and gzip-compressed `.json.gz` trace files,
//! matching what the profilers emit. Decompression is decided by the
//! file extension, same as the downstream save path in extraction.

use super::event::TraceEvent;
use crate::utils::error::LoadError;
use flate2::read::GzDecoder;
use log::{debug, info};
use serde::Deserialize;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Top-level trace document
#[derive(Debug, Clone, Deserialize)]
pub struct TraceData {
    /// All events in the trace
    #[serde(default, rename = "traceEvents")]
    pub trace_events: Vec<TraceEvent>,

    /// Display unit hint, if the producer recorded one
    #[serde(default, rename = "displayTimeUnit")]
    pub display_time_unit: Option<String>,

    /// Remaining top-level metadata, preserved for re-emission
    #[serde(flatten)]
    pub metadata: serde_json::Map<String, serde_json::Value>,
}

/// Load a trace file from disk
///
/// **Public** - entry point for trace ingestion
///
/// # Arguments
/// * `path` - path to a `.json` or `.json.gz` trace file
///
/// # Errors
/// * `LoadError::IoError` - file cannot be opened or read
/// * `LoadError::JsonError` - malformed JSON
pub fn load_trace_file(path: impl AsRef<Path>) -> Result<TraceData, LoadError> {
    let path = path.as_ref();

    info!("Loading trace file: {}", path.display());

    let file = File::open(path)?;
    let reader = BufReader::new(file);

    let trace: TraceData = if is_gzip_path(path) {
        debug!("Detected gzip-compressed trace");
        serde_json::from_reader(GzDecoder::new(reader))?
    } else {
        serde_json::from_reader(reader)?
    };

    info!("Loaded {} events", trace.trace_events.len());

    Ok(trace)
}

/// Check whether a path looks like a gzip-compressed file
///
/// **Private** - extension-based detection
fn is_gzip_path(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "gz")
}
