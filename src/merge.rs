/// Live/historical sequence merging.
///
/// When a page is scoped to both sources, the two normalized batches are
/// combined into one chronological sequence. Near the overlap boundary the
/// same natural event can appear in both feeds under one id — rare, but
/// when it happens the LIVE record wins, being fresher and more precise.

use std::collections::HashSet;

use crate::model::Event;

/// Merges two event sequences into one, ordered by occurrence time and
/// deduplicated by id with LIVE records taking precedence.
///
/// Inputs are expected to be individually deduplicated already (the batch
/// normalizer guarantees that); this only resolves cross-source clashes.
pub fn merge(live: &[Event], historical: &[Event]) -> Vec<Event> {
    let live_ids: HashSet<&str> = live.iter().map(|e| e.id.as_str()).collect();

    let mut merged: Vec<Event> = live
        .iter()
        .cloned()
        .chain(
            historical
                .iter()
                .filter(|e| !live_ids.contains(e.id.as_str()))
                .cloned(),
        )
        .collect();

    // Stable sort: on identical timestamps the live record, which was
    // chained first, stays first.
    merged.sort_by_key(|e| e.time);
    merged
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
