/// Raw record normalization for the seismic analysis pipeline.
///
/// Each data source gets one adapter module converting its raw record shape
/// into the canonical `model::Event`; no downstream stage ever re-checks
/// field presence. The batch driver here is shared by both adapters: it
/// collects per-record outcomes, skips (and counts) invalid records, and
/// flags duplicate ids without ever aborting a whole batch.
///
/// Submodules:
/// - `usgs`    — live USGS earthquake GeoJSON feed adapter.
/// - `archive` — historical archive CSV row adapter.

pub mod archive;
pub mod usgs;

use std::collections::HashSet;

use crate::model::{Event, NormalizationError};

// ---------------------------------------------------------------------------
// Batch outcomes
// ---------------------------------------------------------------------------

/// Result of normalizing one batch of raw records.
///
/// `events` preserves the input order of the accepted records. `skipped`
/// carries the zero-based input index of each rejected record alongside the
/// reason, so callers can surface a diagnostic count (or the full detail)
/// to an operator. Duplicate ids keep the first-seen record; later
/// occurrences are non-fatal and recorded in `duplicate_ids`.
#[derive(Debug, Clone, Default)]
pub struct NormalizedBatch {
    pub events: Vec<Event>,
    pub skipped: Vec<(usize, NormalizationError)>,
    pub duplicate_ids: Vec<String>,
}

impl NormalizedBatch {
    /// Number of records accepted into the canonical sequence.
    pub fn accepted_count(&self) -> usize {
        self.events.len()
    }

    /// Number of records rejected with a `NormalizationError`.
    pub fn skipped_count(&self) -> usize {
        self.skipped.len()
    }

    /// Total raw records seen, accepted or not.
    pub fn total_count(&self) -> usize {
        self.events.len() + self.skipped.len() + self.duplicate_ids.len()
    }
}

/// Folds a sequence of per-record outcomes into a `NormalizedBatch`.
///
/// One bad record never poisons the batch: errors are recorded against
/// their input index and the fold continues. Within a single batch the
/// first record with a given id wins; later ones are flagged as duplicates.
pub fn collect_events<I>(outcomes: I) -> NormalizedBatch
where
    I: IntoIterator<Item = Result<Event, NormalizationError>>,
{
    let mut batch = NormalizedBatch::default();
    let mut seen_ids: HashSet<String> = HashSet::new();

    for (index, outcome) in outcomes.into_iter().enumerate() {
        match outcome {
            Ok(event) => {
                if seen_ids.insert(event.id.clone()) {
                    batch.events.push(event);
                } else {
                    batch.duplicate_ids.push(event.id);
                }
            }
            Err(err) => batch.skipped.push((index, err)),
        }
    }

    batch
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::EventSource;
    use chrono::{TimeZone, Utc};

    fn event(id: &str, magnitude: f64) -> Event {
        Event {
            id: id.to_string(),
            time: Utc.with_ymd_and_hms(2026, 1, 15, 8, 30, 0).unwrap(),
            latitude: 35.0,
            longitude: 139.0,
            depth_km: Some(10.0),
            magnitude,
            place: None,
            source: EventSource::Live,
            country: None,
        }
    }

    #[test]
    fn test_collect_events_keeps_input_order() {
        let batch = collect_events(vec![
            Ok(event("a", 4.0)),
            Ok(event("b", 5.0)),
            Ok(event("c", 6.0)),
        ]);
        let ids: Vec<_> = batch.events.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
        assert_eq!(batch.skipped_count(), 0);
    }

    #[test]
    fn test_one_bad_record_does_not_abort_batch() {
        let batch = collect_events(vec![
            Ok(event("a", 4.0)),
            Err(NormalizationError::MissingMagnitude("b".to_string())),
            Ok(event("c", 6.0)),
        ]);
        assert_eq!(batch.accepted_count(), 2);
        assert_eq!(batch.skipped_count(), 1);
        assert_eq!(
            batch.skipped[0].0, 1,
            "skipped entry should carry the input index of the bad record"
        );
    }

    #[test]
    fn test_duplicate_id_keeps_first_seen_record() {
        let batch = collect_events(vec![
            Ok(event("a", 4.0)),
            Ok(event("a", 9.9)),
        ]);
        assert_eq!(batch.accepted_count(), 1);
        assert_eq!(
            batch.events[0].magnitude, 4.0,
            "first-seen record must win on duplicate id"
        );
        assert_eq!(batch.duplicate_ids, vec!["a".to_string()]);
    }

    #[test]
    fn test_total_count_accounts_for_every_raw_record() {
        let batch = collect_events(vec![
            Ok(event("a", 4.0)),
            Err(NormalizationError::MalformedRecord("truncated".to_string())),
            Ok(event("a", 5.0)),
        ]);
        assert_eq!(batch.total_count(), 3);
    }
}
