//! Root selection: the maximal (outermost) intervals in a group.
//!
//! A root is an interval not strictly contained by any other interval in
//! its group. Selection is O(n^2): each candidate is checked against all
//! others, which is fine for the few thousand events a single group
//! carries. An interval tree would bring this down to O(n log n) if
//! traces ever get much larger.

use super::builder::BuildPolicy;
use super::interval::Interval;
use log::debug;

/// Select the roots of a grouped interval set
///
/// **Public** - first stage of hierarchy construction
///
/// Returns indices into `intervals`, ascending by start time (stable).
///
/// With `exclude_numeric_roots` set, digit-named intervals are never
/// selected even when nothing contains them; they represent enumerated
/// sub-layers that belong under a non-numeric ancestor. The exclusion is
/// not relaxed when it empties the root set - the fallback below applies
/// instead.
///
/// Fallback: a non-empty input with an empty root set yields the single
/// interval with the minimum start (first such on ties), so the builder
/// always has an entry point.
pub fn select_roots(intervals: &[Interval], policy: &BuildPolicy) -> Vec<usize> {
    let mut roots: Vec<usize> = (0..intervals.len())
        .filter(|&i| {
            let contained = intervals
                .iter()
                .enumerate()
                .any(|(j, other)| j != i && other.strictly_contains(&intervals[i]));
            if contained {
                return false;
            }
            !(policy.exclude_numeric_roots && intervals[i].has_numeric_name())
        })
        .collect();

    if roots.is_empty() {
        if let Some(earliest) = min_start_index(intervals) {
            debug!("No maximal interval found, falling back to earliest event");
            roots.push(earliest);
        }
    }

    roots.sort_by_key(|&i| intervals[i].start);
    roots
}

/// Index of the interval with the globally minimum start
///
/// **Private** - degenerate-case fallback for select_roots
fn min_start_index(intervals: &[Interval]) -> Option<usize> {
    intervals
        .iter()
        .enumerate()
        .min_by_key(|(_, iv)| iv.start)
        .map(|(i, _)| i)
}
