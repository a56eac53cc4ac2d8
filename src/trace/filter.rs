//! Event filtering and grouping.
//!
//! The hierarchy core only sees intervals that share one grouping key
//! and belong to the events of interest. This module does the narrowing:
//! category and name-prefix filters, model-structure process selection,
//! pid grouping, and the validated event-to-interval conversion.

use super::event::TraceEvent;
use crate::hierarchy::Interval;
use crate::utils::config::{MODEL_STRUCTURE_MARKER, MODULE_NAME_PREFIX};
use crate::utils::error::IntervalError;
use log::debug;
use std::collections::BTreeMap;

/// Select events carrying the given category
///
/// **Public** - upstream filter for the hierarchy core
///
/// Categories may be comma-separated lists ("cuda,kernel"); an event
/// matches when any element equals `category`.
pub fn events_with_category<'a>(events: &'a [TraceEvent], category: &str) -> Vec<&'a TraceEvent> {
    let matched: Vec<&TraceEvent> = events
        .iter()
        .filter(|e| e.cat.split(',').any(|c| c.trim() == category))
        .collect();

    debug!("Matched {} events with category '{}'", matched.len(), category);
    matched
}

/// Select events whose name starts with `prefix`
///
/// **Public** - used for module-scope event extraction
pub fn events_with_name_prefix<'a>(events: &'a [TraceEvent], prefix: &str) -> Vec<&'a TraceEvent> {
    let matched: Vec<&TraceEvent> = events
        .iter()
        .filter(|e| e.name.starts_with(prefix))
        .collect();

    debug!("Matched {} events with name prefix '{}'", matched.len(), prefix);
    matched
}

/// Select events from synthetic model-structure processes
///
/// **Public** - input selection for the `modules` report mode
///
/// Metadata events (phase "M") are dropped; they describe the process,
/// they are not part of the structure.
pub fn model_structure_events(events: &[TraceEvent]) -> Vec<&TraceEvent> {
    events
        .iter()
        .filter(|e| e.pid.to_string().contains(MODEL_STRUCTURE_MARKER) && !e.is_metadata())
        .collect()
}

/// Select module-scope events (names starting with "nn.Module")
///
/// **Public** - convenience wrapper used by extraction
pub fn module_events(events: &[TraceEvent]) -> Vec<&TraceEvent> {
    events_with_name_prefix(events, MODULE_NAME_PREFIX)
}

/// Group events by their rendered pid
///
/// **Public** - one group per process, keys sorted for determinism
pub fn group_by_pid<'a>(events: &[&'a TraceEvent]) -> BTreeMap<String, Vec<&'a TraceEvent>> {
    let mut groups: BTreeMap<String, Vec<&TraceEvent>> = BTreeMap::new();

    for event in events {
        groups.entry(event.pid.to_string()).or_default().push(event);
    }

    debug!("Grouped events into {} processes", groups.len());
    groups
}

/// Convert grouped events into validated intervals
///
/// **Public** - the validation boundary in front of the hierarchy core
///
/// Missing `ts`/`dur` have already defaulted to 0 at deserialization;
/// a negative duration is rejected here so the core never sees one.
pub fn to_intervals(events: &[&TraceEvent]) -> Result<Vec<Interval>, IntervalError> {
    events
        .iter()
        .map(|e| Interval::new(e.name.clone(), e.ts, e.dur))
        .collect()
}
