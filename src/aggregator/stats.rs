//! Summary statistics over filtered event sets.
//!
//! Counts, most-frequent names, detected numeric layers and the overall
//! time range. This is plain aggregation glue for the `analyze` command
//! and the `--summary` flag; it never feeds back into hierarchy
//! construction.

use crate::trace::TraceEvent;
use log::debug;
use std::collections::HashMap;

/// Statistics for one filtered event set
///
/// **Public** - returned from EventStats::from_events
#[derive(Debug, Clone, Default)]
pub struct EventStats {
    /// Total number of events
    pub total_events: usize,

    /// Occurrences per event name
    pub name_counts: HashMap<String, usize>,

    /// Digit-only names, sorted numerically (detected layers)
    pub numeric_layers: Vec<u64>,

    /// Earliest start timestamp (microseconds)
    pub min_ts: i64,

    /// Latest end timestamp (microseconds)
    pub max_end: i64,

    /// Sum of all event durations (microseconds)
    pub total_duration: i64,
}

impl EventStats {
    /// Compute statistics over an event set
    ///
    /// **Public** - main entry point
    pub fn from_events(events: &[&TraceEvent]) -> Self {
        debug!("Computing statistics over {} events", events.len());

        if events.is_empty() {
            return Self::default();
        }

        let mut name_counts: HashMap<String, usize> = HashMap::new();
        for event in events {
            *name_counts.entry(event.name.clone()).or_insert(0) += 1;
        }

        let mut numeric_layers: Vec<u64> = name_counts
            .keys()
            .filter_map(|name| {
                if !name.is_empty() && name.bytes().all(|b| b.is_ascii_digit()) {
                    name.parse().ok()
                } else {
                    None
                }
            })
            .collect();
        numeric_layers.sort_unstable();

        Self {
            total_events: events.len(),
            name_counts,
            numeric_layers,
            min_ts: events.iter().map(|e| e.ts).min().unwrap_or(0),
            max_end: events.iter().map(|e| e.ts + e.dur).max().unwrap_or(0),
            total_duration: events.iter().map(|e| e.dur).sum(),
        }
    }

    /// Wall-clock span covered by the event set, in milliseconds
    pub fn span_ms(&self) -> f64 {
        (self.max_end - self.min_ts) as f64 / crate::utils::config::MICROS_PER_MILLI
    }

    /// Summed event time, in milliseconds
    pub fn total_duration_ms(&self) -> f64 {
        self.total_duration as f64 / crate::utils::config::MICROS_PER_MILLI
    }

    /// Most frequent names, descending by count (name-ascending on ties)
    ///
    /// **Public** - for top-N listings
    pub fn top_names(&self, n: usize) -> Vec<(&str, usize)> {
        let mut names: Vec<(&str, usize)> = self
            .name_counts
            .iter()
            .map(|(name, &count)| (name.as_str(), count))
            .collect();

        names.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        names.truncate(n);
        names
    }

    /// Render a multi-line text summary
    ///
    /// **Public** - used by the analyze command and --summary output
    pub fn render(&self, top_n: usize) -> String {
        if self.total_events == 0 {
            return "No matching events.".to_string();
        }

        let mut out = String::new();

        out.push_str(&format!("Total Events: {}\n", self.total_events));
        out.push_str(&format!("Unique Names: {}\n", self.name_counts.len()));

        out.push_str(&format!("\nTop {} Most Frequent Events:\n", top_n));
        for (i, (name, count)) in self.top_names(top_n).iter().enumerate() {
            let display_name = if name.chars().count() <= 80 {
                name.to_string()
            } else {
                format!("{}...", name.chars().take(77).collect::<String>())
            };
            out.push_str(&format!("  {}. {}: {} times\n", i + 1, display_name, count));
        }

        if !self.numeric_layers.is_empty() {
            out.push_str(&format!(
                "\nDetected Numbered Layers: {}\n",
                self.numeric_layers.len()
            ));
            out.push_str(&format!("Layer Numbers: {:?}\n", self.numeric_layers));
        }

        out.push_str("\nTime Range:\n");
        out.push_str(&format!("  Start: {} us\n", self.min_ts));
        out.push_str(&format!("  End: {} us\n", self.max_end));
        out.push_str(&format!("  Span: {:.2} ms\n", self.span_ms()));
        out.push_str(&format!("  Total Event Time: {:.2} ms\n", self.total_duration_ms()));

        out
    }
}
