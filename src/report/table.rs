//! Tabular hierarchy report writer.
//!
//! One CSV sheet per grouping key, written into an output directory.
//! The hierarchy column carries the depth as indentation so the nesting
//! is readable in any spreadsheet tool.

use crate::hierarchy::HierarchyEntry;
use crate::utils::config::{INDENT_WIDTH, MICROS_PER_MILLI};
use crate::utils::error::ReportError;
use log::{debug, info};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Write one CSV file per group into `output_dir`
///
/// **Public** - main entry point for tabular output
///
/// # Arguments
/// * `groups` - per-key hierarchy sequences from the builder
/// * `output_dir` - directory receiving one `<key>.csv` per group
///
/// # Returns
/// Paths of the files written, in key order
///
/// # Errors
/// * `ReportError::InvalidPath` - output path empty or an existing file
/// * `ReportError::WriteFailed` - I/O error during write
pub fn write_table_report(
    groups: &BTreeMap<String, Vec<HierarchyEntry>>,
    output_dir: impl AsRef<Path>,
) -> Result<Vec<PathBuf>, ReportError> {
    let output_dir = output_dir.as_ref();

    validate_output_dir(output_dir)?;

    if !output_dir.exists() {
        debug!("Creating output directory: {}", output_dir.display());
        std::fs::create_dir_all(output_dir)?;
    }

    let mut written = Vec::with_capacity(groups.len());

    for (key, entries) in groups {
        let path = output_dir.join(format!("{}.csv", sanitize_sheet_name(key)));
        write_sheet(entries, &path)?;

        info!(
            "Sheet written: {} ({} rows)",
            path.display(),
            entries.len()
        );
        written.push(path);
    }

    Ok(written)
}

/// Write a single group's hierarchy as CSV
///
/// **Private** - per-sheet writer
fn write_sheet(entries: &[HierarchyEntry], path: &Path) -> Result<(), ReportError> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);

    writeln!(
        writer,
        "hierarchy,start_ms,duration_ms,end_ms,depth"
    )?;

    for entry in entries {
        let indent = " ".repeat(entry.depth as usize * INDENT_WIDTH);
        writeln!(
            writer,
            "{},{:.2},{:.2},{:.2},{}",
            csv_field(&format!("{}[{}]", indent, entry.name)),
            entry.start as f64 / MICROS_PER_MILLI,
            entry.duration as f64 / MICROS_PER_MILLI,
            entry.end as f64 / MICROS_PER_MILLI,
            entry.depth
        )?;
    }

    writer.flush()?;
    Ok(())
}

/// Quote a CSV field when it needs quoting
///
/// **Private** - minimal RFC 4180 escaping
fn csv_field(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Turn a grouping key into a safe sheet file name
///
/// **Private** - strips the characters spreadsheet tools reject
fn sanitize_sheet_name(key: &str) -> String {
    let cleaned: String = key
        .chars()
        .filter(|c| !"[]:/?*\\".contains(*c))
        .map(|c| if c == ' ' { '_' } else { c })
        .collect();

    let trimmed = cleaned.trim_matches('_').to_string();
    if trimmed.is_empty() {
        "group".to_string()
    } else {
        trimmed
    }
}

/// Validate the output directory path
///
/// **Private** - internal validation
fn validate_output_dir(path: &Path) -> Result<(), ReportError> {
    if path.as_os_str().is_empty() {
        return Err(ReportError::InvalidPath("Path is empty".to_string()));
    }

    if path.exists() && !path.is_dir() {
        return Err(ReportError::InvalidPath(format!(
            "Path is not a directory: {}",
            path.display()
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, depth: u32, start: i64, duration: i64) -> HierarchyEntry {
        HierarchyEntry {
            name: name.to_string(),
            depth,
            start,
            duration,
            end: start + duration,
        }
    }

    #[test]
    fn test_sanitize_sheet_name() {
        assert_eq!(
            sanitize_sheet_name("[Model Structure] rank/0"),
            "Model_Structure_rank0"
        );
        assert_eq!(sanitize_sheet_name("42"), "42");
        assert_eq!(sanitize_sheet_name("[]*?"), "group");
    }

    #[test]
    fn test_csv_field_quoting() {
        assert_eq!(csv_field("plain"), "plain");
        assert_eq!(csv_field("a,b"), "\"a,b\"");
        assert_eq!(csv_field("say \"hi\""), "\"say \"\"hi\"\"\"");
    }

    #[test]
    fn test_write_table_report() {
        let dir = tempfile::tempdir().unwrap();

        let mut groups = BTreeMap::new();
        groups.insert(
            "7".to_string(),
            vec![entry("fwd", 0, 0, 100_000), entry("attn", 1, 10_000, 20_000)],
        );

        let written = write_table_report(&groups, dir.path()).unwrap();
        assert_eq!(written.len(), 1);

        let content = std::fs::read_to_string(&written[0]).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines[0], "hierarchy,start_ms,duration_ms,end_ms,depth");
        assert_eq!(lines[1], "[fwd],0.00,100.00,100.00,0");
        assert_eq!(lines[2], "    [attn],10.00,20.00,30.00,1");
    }

    #[test]
    fn test_write_creates_output_dir() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("reports/run1");

        let mut groups = BTreeMap::new();
        groups.insert("1".to_string(), vec![entry("a", 0, 0, 10)]);

        write_table_report(&groups, &nested).unwrap();
        assert!(nested.join("1.csv").exists());
    }

    #[test]
    fn test_rejects_file_as_output_dir() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let groups: BTreeMap<String, Vec<HierarchyEntry>> = BTreeMap::new();

        let result = write_table_report(&groups, file.path());
        assert!(matches!(result, Err(ReportError::InvalidPath(_))));
    }
}
