//! Interval records and the strict containment predicate.
//!
//! An interval is the only domain entity the hierarchy core knows about:
//! a named event with a start timestamp and a non-negative duration.
//! Everything above this module is built on `strictly_contains`.

use crate::utils::error::IntervalError;

/// A named, timestamped, duration-bearing event.
///
/// **Public** - input record for the hierarchy builder
///
/// Intervals are immutable once constructed. The builder never touches
/// `name`/`start`/`duration`; derived data (depth, children) lives in the
/// builder's output, not here. Two intervals with identical fields are
/// still distinct nodes: the core works with indices into a slice, so
/// identity is positional, never value equality.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interval {
    /// Event label; an all-digit label denotes a numbered layer
    pub name: String,

    /// Start timestamp in the caller's time unit (typically microseconds)
    pub start: i64,

    /// Non-negative duration in the same unit
    pub duration: i64,
}

impl Interval {
    /// Create a validated interval
    ///
    /// **Public** - the only constructor; this is the validation boundary
    ///
    /// # Errors
    /// * `IntervalError::NegativeDuration` - duration below zero
    pub fn new(name: impl Into<String>, start: i64, duration: i64) -> Result<Self, IntervalError> {
        let name = name.into();
        if duration < 0 {
            return Err(IntervalError::NegativeDuration { name, duration });
        }
        Ok(Self {
            name,
            start,
            duration,
        })
    }

    /// End timestamp (`start + duration`)
    pub fn end(&self) -> i64 {
        self.start + self.duration
    }

    /// True if this interval properly encloses `other`.
    ///
    /// Covers `other`'s span and is not identical to it. The strictness
    /// clause keeps the relation irreflexive: two intervals with equal
    /// spans never contain each other, so span ties are resolved purely
    /// by traversal order downstream.
    pub fn strictly_contains(&self, other: &Interval) -> bool {
        self.start <= other.start
            && self.end() >= other.end()
            && (self.start < other.start || self.end() > other.end())
    }

    /// True if the name is composed entirely of decimal digits.
    ///
    /// Digit-only labels denote enumerated layers in the upstream label
    /// scheme; the root selector and builder treat them specially when
    /// the numeric-layer policies are enabled.
    pub fn has_numeric_name(&self) -> bool {
        !self.name.is_empty() && self.name.bytes().all(|b| b.is_ascii_digit())
    }
}
