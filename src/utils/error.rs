//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.

use thiserror::Error;

/// Errors that can occur while loading a trace file
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Failed to read trace file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON deserialization failed: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Invalid trace format: {0}")]
    InvalidFormat(String),
}

/// Errors raised at the event-to-interval validation boundary.
///
/// The hierarchy core assumes validated input; anything malformed is
/// rejected here before an `Interval` is ever constructed.
#[derive(Error, Debug)]
pub enum IntervalError {
    #[error("Invalid interval '{name}': negative duration {duration}")]
    NegativeDuration { name: String, duration: i64 },
}

/// Errors that can occur during report output
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Failed to write file: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("Failed to serialize JSON: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    #[error("Invalid output path: {0}")]
    InvalidPath(String),
}
