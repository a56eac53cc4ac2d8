//! Chrome-trace-format event schema.
//!
//! Trace files carry a flat `traceEvents` array. Fields are sparse in
//! practice, so everything defaults; `pid`/`tid` may be numbers or
//! strings depending on which tool produced the file (synthetic
//! processes like "[Model Structure]" use string pids).

use serde::{Deserialize, Serialize};
use std::fmt;

/// A raw trace event as it appears on disk
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraceEvent {
    /// Event label
    #[serde(default)]
    pub name: String,

    /// Category, possibly comma-separated
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub cat: String,

    /// Chrome trace phase ("X" complete, "M" metadata, ...)
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub ph: String,

    /// Process identifier (number or string)
    #[serde(default)]
    pub pid: TraceId,

    /// Thread identifier (number or string)
    #[serde(default)]
    pub tid: TraceId,

    /// Start timestamp in microseconds
    #[serde(default)]
    pub ts: i64,

    /// Duration in microseconds
    #[serde(default)]
    pub dur: i64,

    /// Tool-specific payload, passed through untouched
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub args: Option<serde_json::Value>,
}

/// Process/thread identifier that may be numeric or textual
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TraceId {
    Num(i64),
    Text(String),
}

impl Default for TraceId {
    fn default() -> Self {
        TraceId::Num(0)
    }
}

impl fmt::Display for TraceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TraceId::Num(n) => write!(f, "{}", n),
            TraceId::Text(s) => write!(f, "{}", s),
        }
    }
}

impl TraceEvent {
    /// True if this is a metadata event (phase "M")
    pub fn is_metadata(&self) -> bool {
        self.ph == crate::utils::config::METADATA_PHASE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_minimal_event() {
        let event: TraceEvent = serde_json::from_str(r#"{"name": "attn"}"#).unwrap();
        assert_eq!(event.name, "attn");
        assert_eq!(event.ts, 0);
        assert_eq!(event.dur, 0);
        assert_eq!(event.pid, TraceId::Num(0));
    }

    #[test]
    fn test_deserialize_string_pid() {
        let event: TraceEvent =
            serde_json::from_str(r#"{"name": "fwd", "pid": "[Model Structure] 12"}"#).unwrap();
        assert_eq!(event.pid.to_string(), "[Model Structure] 12");
    }

    #[test]
    fn test_deserialize_numeric_pid() {
        let event: TraceEvent = serde_json::from_str(r#"{"name": "k", "pid": 7}"#).unwrap();
        assert_eq!(event.pid, TraceId::Num(7));
        assert_eq!(event.pid.to_string(), "7");
    }

    #[test]
    fn test_metadata_detection() {
        let event: TraceEvent =
            serde_json::from_str(r#"{"name": "process_name", "ph": "M"}"#).unwrap();
        assert!(event.is_metadata());
    }
}
