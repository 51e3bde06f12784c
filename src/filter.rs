/// Magnitude and time-window filtering.
///
/// Pure functions over immutable event slices: the input is never mutated,
/// the output is a fresh sequence preserving the input's relative order,
/// and concurrent calls over shared slices are safe. One filter pass per
/// rendered page is the expected usage.

use chrono::{DateTime, Utc};

use crate::model::Event;

// ---------------------------------------------------------------------------
// Time window
// ---------------------------------------------------------------------------

/// A half-open UTC interval `[start, end)`.
///
/// An inverted window (`start >= end`) is empty by definition — callers get
/// an empty result rather than an error.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeWindow {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> TimeWindow {
        TimeWindow { start, end }
    }

    /// Half-open containment: `start <= t < end`.
    pub fn contains(&self, t: DateTime<Utc>) -> bool {
        self.start <= t && t < self.end
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }
}

// ---------------------------------------------------------------------------
// Filtering
// ---------------------------------------------------------------------------

/// Returns the events with `magnitude >= min_magnitude` whose time falls in
/// `window`, preserving input order.
///
/// The magnitude bound is inclusive; the window is half-open. An empty or
/// inverted window yields an empty result.
pub fn filter(events: &[Event], min_magnitude: f64, window: TimeWindow) -> Vec<Event> {
    if window.is_empty() {
        return Vec::new();
    }
    events
        .iter()
        .filter(|e| e.magnitude >= min_magnitude && window.contains(e.time))
        .cloned()
        .collect()
}

/// Magnitude-only variant used by pages that show the whole loaded range.
pub fn filter_by_magnitude(events: &[Event], min_magnitude: f64) -> Vec<Event> {
    events
        .iter()
        .filter(|e| e.magnitude >= min_magnitude)
        .cloned()
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
