//! Recursive hierarchy construction from flat interval sets.
//!
//! Profiler traces carry no parent pointers; the nesting structure is
//! implicit in interval containment. This module reconstructs it: roots
//! first, then each node's immediate children by nearest containment,
//! linearized into a depth-annotated pre-order sequence.
//!
//! Two legacy renderings of this algorithm differed only in how they
//! treat digit-named "layer" nodes. Both behaviors live here behind
//! [`BuildPolicy`]; pick the constructor matching the trace flavor.

use super::interval::Interval;
use super::roots::select_roots;
use log::debug;
use serde::{Deserialize, Serialize};

/// Policy flags for numbered-layer handling
///
/// **Public** - passed by the caller per group
///
/// The two flags mirror each other and must be toggled together: a trace
/// whose digit-named events are enumerated layers wants both on, any
/// other trace wants both off. Mixing them produces trees that agree
/// with neither legacy behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildPolicy {
    /// Never select a digit-named interval as a forest root
    pub exclude_numeric_roots: bool,

    /// Attach every interval nested anywhere inside a digit-named node
    /// as a direct child, skipping the nearest-containment filter
    pub flatten_numeric_children: bool,
}

impl BuildPolicy {
    /// No special casing of digit-named intervals
    ///
    /// Matches the model-structure report behavior.
    pub fn plain() -> Self {
        Self {
            exclude_numeric_roots: false,
            flatten_numeric_children: false,
        }
    }

    /// Digit-named intervals are enumerated layers
    ///
    /// Matches the NVTX annotation report behavior: numeric nodes are
    /// never roots and their descendants are flattened into siblings.
    pub fn numeric_layers() -> Self {
        Self {
            exclude_numeric_roots: true,
            flatten_numeric_children: true,
        }
    }
}

impl Default for BuildPolicy {
    fn default() -> Self {
        Self::plain()
    }
}

/// One row of the linearized hierarchy
///
/// **Public** - consumed by report writers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HierarchyEntry {
    /// Event label
    pub name: String,

    /// Nesting depth; 0 for forest roots
    pub depth: u32,

    /// Start timestamp (caller's unit)
    pub start: i64,

    /// Duration (caller's unit)
    pub duration: i64,

    /// End timestamp (`start + duration`)
    pub end: i64,
}

impl HierarchyEntry {
    fn from_interval(interval: &Interval, depth: u32) -> Self {
        Self {
            name: interval.name.clone(),
            depth,
            start: interval.start,
            duration: interval.duration,
            end: interval.end(),
        }
    }
}

/// Build the containment hierarchy for one grouped interval set
///
/// **Public** - main entry point of the hierarchy core
///
/// # Arguments
/// * `intervals` - all intervals sharing one grouping key (e.g. one pid)
/// * `policy` - numbered-layer handling, per the trace flavor
///
/// # Returns
/// Depth-annotated pre-order traversal of the reconstructed forest:
/// each node before its descendants, siblings ascending by start time
/// (stable on ties). Empty input yields an empty sequence.
///
/// The input is read-only; the whole computation is a pure function of
/// `(intervals, policy)`, so repeated calls produce identical output.
pub fn build_hierarchy(intervals: &[Interval], policy: &BuildPolicy) -> Vec<HierarchyEntry> {
    debug!("Building hierarchy from {} intervals", intervals.len());

    let mut entries = Vec::with_capacity(intervals.len());

    for root in select_roots(intervals, policy) {
        visit(intervals, root, 0, policy, &mut entries);
    }

    debug!("Hierarchy has {} entries", entries.len());
    entries
}

/// Emit `node` at `depth`, then recurse into its immediate children
///
/// **Private** - recursion driver for build_hierarchy
///
/// Terminates because a child's span is strictly smaller than its
/// parent's: containment is well-founded on finite intervals.
///
/// Digit-named nodes under the flatten policy are handled here rather
/// than in the child filter: every candidate inside the node is emitted
/// once at `depth + 1` as a sibling, with no further recursion.
/// Containment is transitive, so the candidate set already covers all
/// of the node's descendants; re-nesting them would emit nested
/// candidates a second time under their true parent.
fn visit(
    intervals: &[Interval],
    node: usize,
    depth: u32,
    policy: &BuildPolicy,
    entries: &mut Vec<HierarchyEntry>,
) {
    entries.push(HierarchyEntry::from_interval(&intervals[node], depth));

    let parent = &intervals[node];

    if policy.flatten_numeric_children && parent.has_numeric_name() {
        let mut flattened = contained_candidates(intervals, node);
        flattened.sort_by_key(|&i| intervals[i].start); // stable, ties keep encounter order

        for child in flattened {
            entries.push(HierarchyEntry::from_interval(&intervals[child], depth + 1));
        }
        return;
    }

    let mut children = immediate_children(intervals, node);
    children.sort_by_key(|&i| intervals[i].start); // stable, ties keep encounter order

    for child in children {
        visit(intervals, child, depth + 1, policy, entries);
    }
}

/// Everything strictly inside `node`, at any depth, in encounter order
///
/// **Private** - candidate set shared by both child-selection paths
fn contained_candidates(intervals: &[Interval], node: usize) -> Vec<usize> {
    let parent = &intervals[node];

    (0..intervals.len())
        .filter(|&i| i != node && parent.strictly_contains(&intervals[i]))
        .collect()
}

/// Compute the immediate children of `node`
///
/// **Private** - nearest-containment selection
///
/// Candidates are every interval strictly inside `node`, at any depth.
/// The minimality filter then drops candidates contained by another
/// candidate, leaving only direct children; grandchildren are found when
/// their parent is itself visited.
fn immediate_children(intervals: &[Interval], node: usize) -> Vec<usize> {
    let candidates = contained_candidates(intervals, node);

    candidates
        .iter()
        .copied()
        .filter(|&i| {
            !candidates
                .iter()
                .any(|&j| j != i && intervals[j].strictly_contains(&intervals[i]))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn iv(name: &str, start: i64, duration: i64) -> Interval {
        Interval::new(name, start, duration).unwrap()
    }

    fn names_and_depths(entries: &[HierarchyEntry]) -> Vec<(&str, u32)> {
        entries.iter().map(|e| (e.name.as_str(), e.depth)).collect()
    }

    #[test]
    fn test_two_children_under_one_root() {
        // A spans both B and C; B starts earlier so it comes first
        let set = vec![iv("A", 0, 100), iv("B", 10, 20), iv("C", 50, 10)];
        let entries = build_hierarchy(&set, &BuildPolicy::plain());

        assert_eq!(
            names_and_depths(&entries),
            vec![("A", 0), ("B", 1), ("C", 1)]
        );
    }

    #[test]
    fn test_grandchild_attaches_to_nearest_container() {
        let set = vec![
            iv("root", 0, 100),
            iv("mid", 10, 50),
            iv("leaf", 20, 10),
        ];
        let entries = build_hierarchy(&set, &BuildPolicy::plain());

        assert_eq!(
            names_and_depths(&entries),
            vec![("root", 0), ("mid", 1), ("leaf", 2)]
        );
    }

    #[test]
    fn test_equal_span_intervals_are_sibling_roots() {
        let set = vec![iv("X", 0, 50), iv("Y", 0, 50)];
        let entries = build_hierarchy(&set, &BuildPolicy::plain());

        assert_eq!(names_and_depths(&entries), vec![("X", 0), ("Y", 0)]);
    }

    #[test]
    fn test_numeric_flatten_divergence() {
        // Q nests inside P. Flattened, both are siblings under "3";
        // plain, Q is found one level deeper under P.
        let set = vec![iv("3", 0, 30), iv("P", 5, 10), iv("Q", 7, 3)];

        let flat = build_hierarchy(&set, &BuildPolicy::numeric_layers());
        assert_eq!(
            names_and_depths(&flat),
            vec![("3", 0), ("P", 1), ("Q", 1)]
        );

        let nested = build_hierarchy(&set, &BuildPolicy::plain());
        assert_eq!(
            names_and_depths(&nested),
            vec![("3", 0), ("P", 1), ("Q", 2)]
        );
    }

    #[test]
    fn test_flatten_emits_each_interval_once() {
        // A grandchild nested inside a child of a digit-named node must
        // not show up twice: once flattened, it is not re-nested under
        // its true parent.
        let set = vec![iv("3", 0, 30), iv("P", 5, 10), iv("Q", 7, 3)];
        let entries = build_hierarchy(&set, &BuildPolicy::numeric_layers());

        assert_eq!(entries.len(), set.len());
        assert_eq!(entries.iter().filter(|e| e.name == "Q").count(), 1);
    }

    #[test]
    fn test_numeric_node_with_flat_operations() {
        // Neither child nests in the other (Q ends past P's end)
        let set = vec![iv("3", 0, 30), iv("P", 5, 10), iv("Q", 12, 5)];

        for policy in [BuildPolicy::numeric_layers(), BuildPolicy::plain()] {
            let entries = build_hierarchy(&set, &policy);
            assert_eq!(
                names_and_depths(&entries),
                vec![("3", 0), ("P", 1), ("Q", 1)]
            );
        }
    }

    #[test]
    fn test_empty_input() {
        let entries = build_hierarchy(&[], &BuildPolicy::plain());
        assert!(entries.is_empty());
    }

    #[test]
    fn test_single_zero_duration_interval() {
        let set = vec![iv("tick", 42, 0)];
        let entries = build_hierarchy(&set, &BuildPolicy::plain());

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].depth, 0);
        assert_eq!(entries[0].start, 42);
        assert_eq!(entries[0].end, 42);
    }

    #[test]
    fn test_idempotent() {
        let set = vec![
            iv("fwd", 0, 1000),
            iv("0", 10, 400),
            iv("attn", 20, 100),
            iv("mlp", 150, 200),
            iv("1", 450, 400),
            iv("attn", 460, 100),
        ];

        let first = build_hierarchy(&set, &BuildPolicy::numeric_layers());
        let second = build_hierarchy(&set, &BuildPolicy::numeric_layers());
        assert_eq!(first, second);
    }

    #[test]
    fn test_every_interval_appears_once() {
        // "proj" nests inside "attn" inside the digit-named "0", so the
        // flatten path has real re-nesting potential here.
        let set = vec![
            iv("fwd", 0, 1000),
            iv("embed", 5, 50),
            iv("0", 60, 300),
            iv("ln", 70, 20),
            iv("attn", 100, 120),
            iv("proj", 110, 40),
            iv("1", 400, 300),
            iv("ln", 410, 20),
            iv("head", 750, 100),
        ];

        for policy in [BuildPolicy::plain(), BuildPolicy::numeric_layers()] {
            let entries = build_hierarchy(&set, &policy);
            assert_eq!(entries.len(), set.len());
            for interval in &set {
                let hits = entries
                    .iter()
                    .filter(|e| e.name == interval.name && e.start == interval.start)
                    .count();
                assert_eq!(hits, 1, "{} should appear exactly once", interval.name);
            }
        }
    }

    #[test]
    fn test_depth_consistency() {
        let set = vec![
            iv("fwd", 0, 1000),
            iv("block", 100, 500),
            iv("attn", 150, 200),
            iv("proj", 160, 50),
            iv("mlp", 400, 150),
        ];
        let entries = build_hierarchy(&set, &BuildPolicy::plain());

        for (i, entry) in entries.iter().enumerate() {
            if entry.depth == 0 {
                continue;
            }
            // The nearest earlier entry one level up is the parent and
            // must span this entry.
            let parent = entries[..i]
                .iter()
                .rev()
                .find(|p| p.depth == entry.depth - 1)
                .expect("non-root entry without a parent");
            assert!(parent.start <= entry.start && parent.end >= entry.end);
        }
    }

    #[test]
    fn test_sibling_ordering_is_ascending_start() {
        let set = vec![
            iv("root", 0, 100),
            iv("late", 60, 10),
            iv("early", 10, 10),
            iv("mid", 30, 10),
        ];
        let entries = build_hierarchy(&set, &BuildPolicy::plain());

        let starts: Vec<i64> = entries
            .iter()
            .filter(|e| e.depth == 1)
            .map(|e| e.start)
            .collect();
        assert_eq!(starts, vec![10, 30, 60]);
    }

    #[test]
    fn test_duplicate_intervals_are_distinct_nodes() {
        let set = vec![iv("root", 0, 100), iv("op", 10, 5), iv("op", 10, 5)];
        let entries = build_hierarchy(&set, &BuildPolicy::plain());

        assert_eq!(entries.len(), 3);
        assert_eq!(entries.iter().filter(|e| e.name == "op").count(), 2);
        assert!(entries.iter().filter(|e| e.name == "op").all(|e| e.depth == 1));
    }

    #[test]
    fn test_input_not_mutated() {
        let set = vec![iv("A", 0, 100), iv("B", 10, 20)];
        let snapshot = set.clone();
        let _ = build_hierarchy(&set, &BuildPolicy::plain());
        assert_eq!(set, snapshot);
    }
}
