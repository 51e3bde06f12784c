/// Summary statistics and grouped histograms over filtered event sequences.
///
/// Every function here is pure and total: an empty input yields zero-valued
/// statistics, never an error. Arg-max style values (max magnitude, latest
/// magnitude, mean depth) are `Option`s so "no data" stays distinguishable
/// from a real zero.

use std::collections::HashMap;

use chrono::{Datelike, Duration, NaiveDate};
use serde::Serialize;

use crate::filter::TimeWindow;
use crate::model::Event;

/// Inclusive magnitude bound for the "strong event" count.
pub const STRONG_MAGNITUDE: f64 = 5.0;

/// Number of fixed-width magnitude histogram buckets, covering [0, 10).
pub const MAGNITUDE_BUCKET_COUNT: usize = 10;

// ---------------------------------------------------------------------------
// Summary statistics
// ---------------------------------------------------------------------------

/// Headline numbers for a filtered event set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryStats {
    /// Total events in the sequence.
    pub count: usize,
    /// Largest magnitude, `None` when the sequence is empty.
    pub max_magnitude: Option<f64>,
    /// Magnitude of the most recent event, `None` when empty.
    pub latest_magnitude: Option<f64>,
    /// Events with magnitude >= `STRONG_MAGNITUDE`.
    pub strong_count: usize,
    /// Mean depth over events with a known depth only. Events with unknown
    /// depth are excluded from the denominator, not treated as zero.
    pub mean_depth_km: Option<f64>,
}

/// Computes headline statistics over an event sequence.
pub fn summarize(events: &[Event]) -> SummaryStats {
    let max_magnitude = events
        .iter()
        .map(|e| e.magnitude)
        .fold(None, |acc: Option<f64>, m| {
            Some(acc.map_or(m, |a| a.max(m)))
        });

    let latest_magnitude = events
        .iter()
        .max_by_key(|e| e.time)
        .map(|e| e.magnitude);

    let strong_count = events
        .iter()
        .filter(|e| e.magnitude >= STRONG_MAGNITUDE)
        .count();

    let known_depths: Vec<f64> = events.iter().filter_map(|e| e.depth_km).collect();
    let mean_depth_km = if known_depths.is_empty() {
        None
    } else {
        Some(known_depths.iter().sum::<f64>() / known_depths.len() as f64)
    };

    SummaryStats {
        count: events.len(),
        max_magnitude,
        latest_magnitude,
        strong_count,
        mean_depth_km,
    }
}

// ---------------------------------------------------------------------------
// Magnitude histogram
// ---------------------------------------------------------------------------

/// One fixed-width magnitude bucket covering `[lower, lower + 1.0)`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MagnitudeBucket {
    pub lower: f64,
    pub count: usize,
}

/// Buckets events by magnitude into `MAGNITUDE_BUCKET_COUNT` width-1.0
/// ranges with inclusive lower bounds, all buckets present (zero-filled).
///
/// Magnitudes below 0 (micro-events on some scales) land in the first
/// bucket and anything at or above 9 in the last, so no event is dropped.
pub fn magnitude_histogram(events: &[Event]) -> Vec<MagnitudeBucket> {
    let mut counts = [0usize; MAGNITUDE_BUCKET_COUNT];
    for event in events {
        let index = (event.magnitude.floor() as i64)
            .clamp(0, MAGNITUDE_BUCKET_COUNT as i64 - 1) as usize;
        counts[index] += 1;
    }
    counts
        .iter()
        .enumerate()
        .map(|(i, &count)| MagnitudeBucket {
            lower: i as f64,
            count,
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Temporal series
// ---------------------------------------------------------------------------

/// Per-day counts and maxima for live windows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyBucket {
    pub date: NaiveDate,
    pub count: usize,
    pub max_magnitude: Option<f64>,
}

/// Per-year counts and maxima for historical ranges.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearlyBucket {
    pub year: i32,
    pub count: usize,
    pub max_magnitude: Option<f64>,
}

/// Buckets events per UTC day across the window, chronologically, with
/// zero-filled gaps. Events outside the half-open window are ignored; an
/// empty window yields an empty series.
pub fn daily_series(events: &[Event], window: TimeWindow) -> Vec<DailyBucket> {
    if window.is_empty() {
        return Vec::new();
    }

    let mut per_day: HashMap<NaiveDate, (usize, f64)> = HashMap::new();
    for event in events.iter().filter(|e| window.contains(e.time)) {
        let entry = per_day
            .entry(event.time.date_naive())
            .or_insert((0, f64::NEG_INFINITY));
        entry.0 += 1;
        entry.1 = entry.1.max(event.magnitude);
    }

    // Last calendar day with any coverage inside the half-open window.
    let first = window.start.date_naive();
    let last = (window.end - Duration::nanoseconds(1)).date_naive();

    let mut series = Vec::new();
    let mut day = first;
    while day <= last {
        let bucket = match per_day.get(&day) {
            Some(&(count, max)) => DailyBucket {
                date: day,
                count,
                max_magnitude: Some(max),
            },
            None => DailyBucket {
                date: day,
                count: 0,
                max_magnitude: None,
            },
        };
        series.push(bucket);
        day = day + Duration::days(1);
    }
    series
}

/// Buckets events per calendar year over `start_year..=end_year`,
/// chronologically, with zero-filled gaps. An inverted range yields an
/// empty series.
pub fn yearly_series(events: &[Event], start_year: i32, end_year: i32) -> Vec<YearlyBucket> {
    if start_year > end_year {
        return Vec::new();
    }

    let mut per_year: HashMap<i32, (usize, f64)> = HashMap::new();
    for event in events {
        let year = event.time.year();
        if year < start_year || year > end_year {
            continue;
        }
        let entry = per_year.entry(year).or_insert((0, f64::NEG_INFINITY));
        entry.0 += 1;
        entry.1 = entry.1.max(event.magnitude);
    }

    (start_year..=end_year)
        .map(|year| match per_year.get(&year) {
            Some(&(count, max)) => YearlyBucket {
                year,
                count,
                max_magnitude: Some(max),
            },
            None => YearlyBucket {
                year,
                count: 0,
                max_magnitude: None,
            },
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Country ranking
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountryCount {
    pub country: String,
    pub count: usize,
}

/// Attributed-event counts per country plus an explicit unattributed total.
///
/// Events with unknown country are never silently dropped — they show up
/// in `unattributed` so the ranking always accounts for the whole input.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountryRanking {
    /// Sorted descending by count, ties broken alphabetically by name.
    pub ranked: Vec<CountryCount>,
    pub unattributed: usize,
}

/// Ranks countries by attributed event count.
pub fn country_ranking(events: &[Event]) -> CountryRanking {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    let mut unattributed = 0;
    for event in events {
        match event.country.as_deref() {
            Some(country) => *counts.entry(country).or_insert(0) += 1,
            None => unattributed += 1,
        }
    }

    let mut ranked: Vec<CountryCount> = counts
        .into_iter()
        .map(|(country, count)| CountryCount {
            country: country.to_string(),
            count,
        })
        .collect();
    ranked.sort_by(|a, b| b.count.cmp(&a.count).then(a.country.cmp(&b.country)));

    CountryRanking {
        ranked,
        unattributed,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
