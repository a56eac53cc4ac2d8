//! JSON hierarchy report writer.
//!
//! A versioned document carrying every group's depth-annotated sequence,
//! for downstream tooling that wants more than the CSV sheets.

use crate::hierarchy::HierarchyEntry;
use crate::utils::config::SCHEMA_VERSION;
use crate::utils::error::ReportError;
use chrono::Utc;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Top-level report structure written to JSON
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HierarchyReport {
    /// Schema version for compatibility checking
    pub version: String,

    /// Trace file the report was built from
    pub source: String,

    /// Timestamp when the report was generated (RFC 3339)
    pub generated_at: String,

    /// Per-group hierarchies, in key order
    pub groups: Vec<GroupHierarchy>,
}

/// One grouping key's reconstructed hierarchy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupHierarchy {
    /// Grouping key (rendered pid)
    pub key: String,

    /// Pre-order, depth-annotated entries
    pub entries: Vec<HierarchyEntry>,
}

impl HierarchyReport {
    /// Assemble a report from built hierarchies
    ///
    /// **Public** - used by the report command
    pub fn new(source: &str, groups: BTreeMap<String, Vec<HierarchyEntry>>) -> Self {
        Self {
            version: SCHEMA_VERSION.to_string(),
            source: source.to_string(),
            generated_at: Utc::now().to_rfc3339(),
            groups: groups
                .into_iter()
                .map(|(key, entries)| GroupHierarchy { key, entries })
                .collect(),
        }
    }

    /// Total number of entries across all groups
    pub fn total_entries(&self) -> usize {
        self.groups.iter().map(|g| g.entries.len()).sum()
    }
}

/// Write a report to a JSON file
///
/// **Public** - main entry point for JSON output
///
/// # Errors
/// * `ReportError::WriteFailed` - I/O error during write
/// * `ReportError::SerializationFailed` - JSON serialization error
/// * `ReportError::InvalidPath` - path cannot be created or is invalid
pub fn write_report(
    report: &HierarchyReport,
    output_path: impl AsRef<Path>,
) -> Result<(), ReportError> {
    let output_path = output_path.as_ref();

    info!("Writing report to: {}", output_path.display());

    validate_output_path(output_path)?;

    if let Some(parent) = output_path.parent() {
        if !parent.exists() {
            debug!("Creating parent directories: {}", parent.display());
            std::fs::create_dir_all(parent).map_err(|e| {
                ReportError::InvalidPath(format!(
                    "Cannot create directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }

    let file = File::create(output_path).map_err(ReportError::WriteFailed)?;
    let writer = BufWriter::new(file);

    serde_json::to_writer_pretty(writer, report).map_err(ReportError::SerializationFailed)?;

    info!(
        "Report written successfully ({} groups, {} entries)",
        report.groups.len(),
        report.total_entries()
    );

    Ok(())
}

/// Read a report from a JSON file
///
/// **Public** - useful for validation and testing
pub fn read_report(input_path: impl AsRef<Path>) -> Result<HierarchyReport, ReportError> {
    let input_path = input_path.as_ref();

    debug!("Reading report from: {}", input_path.display());

    let file = File::open(input_path).map_err(ReportError::WriteFailed)?;
    let report: HierarchyReport =
        serde_json::from_reader(file).map_err(ReportError::SerializationFailed)?;

    debug!(
        "Report loaded: version {}, {} groups",
        report.version,
        report.groups.len()
    );

    Ok(report)
}

/// Validate that output path is writable
///
/// **Private** - internal validation
fn validate_output_path(path: &Path) -> Result<(), ReportError> {
    if path.as_os_str().is_empty() {
        return Err(ReportError::InvalidPath("Path is empty".to_string()));
    }

    if path.exists() && path.is_dir() {
        return Err(ReportError::InvalidPath(format!(
            "Path is a directory: {}",
            path.display()
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    fn test_report() -> HierarchyReport {
        let mut groups = BTreeMap::new();
        groups.insert(
            "1".to_string(),
            vec![HierarchyEntry {
                name: "fwd".to_string(),
                depth: 0,
                start: 0,
                duration: 100,
                end: 100,
            }],
        );
        HierarchyReport::new("trace.json", groups)
    }

    #[test]
    fn test_write_and_read_report() {
        let report = test_report();
        let temp_file = NamedTempFile::new().unwrap();
        let path = temp_file.path();

        write_report(&report, path).unwrap();
        let loaded = read_report(path).unwrap();

        assert_eq!(loaded.version, report.version);
        assert_eq!(loaded.source, "trace.json");
        assert_eq!(loaded.groups.len(), 1);
        assert_eq!(loaded.groups[0].entries[0].name, "fwd");
    }

    #[test]
    fn test_total_entries() {
        assert_eq!(test_report().total_entries(), 1);
    }

    #[test]
    fn test_validate_output_path_empty() {
        let result = validate_output_path(Path::new(""));
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_output_path_directory() {
        let temp_dir = tempfile::tempdir().unwrap();
        let result = validate_output_path(temp_dir.path());
        assert!(result.is_err());
    }

    #[test]
    fn test_write_creates_parent_dirs() {
        let temp_dir = tempfile::tempdir().unwrap();
        let nested_path = temp_dir.path().join("nested/dirs/report.json");

        write_report(&test_report(), &nested_path).unwrap();
        assert!(nested_path.exists());
    }
}
