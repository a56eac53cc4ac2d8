//! Perfetto-compatible trace extraction.
//!
//! Re-emits a trace narrowed to kernel and module-scope events so it
//! stays small enough for the Perfetto UI. Process/thread metadata
//! events and the top-level metadata fields are carried over so the
//! viewer keeps its labels.

use crate::trace::{events_with_category, module_events, TraceData, TraceEvent};
use crate::utils::config::{KERNEL_CATEGORY, METADATA_EVENT_NAMES, TRACE_METADATA_FIELDS};
use crate::utils::error::ReportError;
use flate2::write::GzEncoder;
use flate2::Compression;
use log::{debug, info};
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Filtered trace ready for serialization
#[derive(Debug, Clone, Serialize)]
pub struct ExtractedTrace {
    #[serde(rename = "traceEvents")]
    pub trace_events: Vec<TraceEvent>,

    #[serde(flatten)]
    pub metadata: serde_json::Map<String, serde_json::Value>,
}

/// Build an extracted trace from a loaded one
///
/// **Public** - used by the extract command
///
/// # Arguments
/// * `trace` - full loaded trace
/// * `kernel_only` - drop module-scope events, keep only kernels
pub fn build_extracted_trace(trace: &TraceData, kernel_only: bool) -> ExtractedTrace {
    let kernel_events = events_with_category(&trace.trace_events, KERNEL_CATEGORY);
    info!("Extracted {} kernel events", kernel_events.len());

    let mut trace_events: Vec<TraceEvent> = kernel_events.into_iter().cloned().collect();

    if !kernel_only {
        let modules = module_events(&trace.trace_events);
        info!("Extracted {} module events", modules.len());
        trace_events.extend(modules.into_iter().cloned());
    }

    // Keep the viewer's process/thread labels working
    let metadata_events: Vec<TraceEvent> = trace
        .trace_events
        .iter()
        .filter(|e| e.is_metadata() && METADATA_EVENT_NAMES.contains(&e.name.as_str()))
        .cloned()
        .collect();
    debug!("Carrying over {} metadata events", metadata_events.len());
    trace_events.extend(metadata_events);

    let mut metadata = serde_json::Map::new();
    if let Some(unit) = &trace.display_time_unit {
        metadata.insert("displayTimeUnit".to_string(), serde_json::json!(unit));
    }
    for field in TRACE_METADATA_FIELDS {
        if let Some(value) = trace.metadata.get(*field) {
            metadata.insert((*field).to_string(), value.clone());
        }
    }

    ExtractedTrace {
        trace_events,
        metadata,
    }
}

/// Save an extracted trace as JSON, gzipped when the path ends in `.gz`
///
/// **Public** - used by the extract command
///
/// # Errors
/// * `ReportError::WriteFailed` - I/O error during write
/// * `ReportError::SerializationFailed` - JSON serialization error
pub fn save_extracted_trace(
    extracted: &ExtractedTrace,
    output_path: impl AsRef<Path>,
) -> Result<(), ReportError> {
    let output_path = output_path.as_ref();

    info!("Saving extracted trace to: {}", output_path.display());

    let file = File::create(output_path).map_err(ReportError::WriteFailed)?;
    let writer = BufWriter::new(file);

    if output_path.extension().is_some_and(|ext| ext == "gz") {
        let mut encoder = GzEncoder::new(writer, Compression::default());
        serde_json::to_writer_pretty(&mut encoder, extracted)
            .map_err(ReportError::SerializationFailed)?;
        encoder
            .finish()
            .and_then(|mut w| w.flush())
            .map_err(ReportError::WriteFailed)?;
    } else {
        serde_json::to_writer_pretty(writer, extracted)
            .map_err(ReportError::SerializationFailed)?;
    }

    info!(
        "Saved {} events; the file opens in https://ui.perfetto.dev/",
        extracted.trace_events.len()
    );

    Ok(())
}
