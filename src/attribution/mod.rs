/// Country attribution of epicenter coordinates.
///
/// Maps a coordinate to the most plausible owning country: even-odd
/// containment against the boundary polygon set, with a nearest-boundary-
/// vertex fallback for the large share of epicenters (oceanic, ~30% in
/// practice) that fall inside no polygon at all. Beyond a configurable
/// distance cutoff the result is "unknown" — an expected outcome, not an
/// error.
///
/// The whole stage is explicitly approximate: boundary data is coarse,
/// coastal rounding loses precision, and the fallback is a heuristic. An
/// attribution is a statistical estimate for aggregation, never a
/// geopolitical assertion.
///
/// The index is an explicit injectable object with its own cache, not a
/// process-global singleton — construct one at startup, pass it by
/// reference, and tests get an isolated empty instance for free.
///
/// Submodules:
/// - `geometry` — ray casting and distance primitives.

pub mod geometry;

use std::collections::HashMap;
use std::sync::Mutex;

use serde::Serialize;

use crate::boundaries::CountryPolygon;
use crate::logging::{self, DataSource};
use crate::model::Event;
use crate::settings::AttributionSettings;

use geometry::{approx_distance_km, point_in_rings};

// ---------------------------------------------------------------------------
// Resolution types
// ---------------------------------------------------------------------------

/// How a country was arrived at, for traceability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AttributionMethod {
    /// Exactly one polygon contained the point.
    Containment,
    /// No polygon contained the point; nearest boundary vertex within the
    /// distance cutoff decided it.
    NearestBoundary,
    /// Multiple polygons contained the point (overlapping boundary data);
    /// the first in alphabetical country order won. Low confidence.
    OverlapTieBreak,
}

/// A successful attribution with its provenance.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Resolution {
    pub country: String,
    pub method: AttributionMethod,
}

// ---------------------------------------------------------------------------
// Attribution index
// ---------------------------------------------------------------------------

/// Rounded-coordinate cache key. Rounding collapses near-duplicate
/// epicenters onto one lookup; the precision is a tunable trade-off between
/// hit rate and coastline accuracy.
type CacheKey = (i64, i64);

pub struct AttributionIndex {
    /// Polygon set sorted by country name. The sort fixes the iteration
    /// order, which is what makes the overlap tie-break deterministic.
    polygons: Vec<CountryPolygon>,
    settings: AttributionSettings,
    /// Rounded coordinate -> attribution result. Shared mutable state,
    /// guarded by a plain lock; a recompute lost to a cache race is
    /// harmless because resolution is a pure function of its inputs.
    cache: Mutex<HashMap<CacheKey, Option<String>>>,
}

impl AttributionIndex {
    /// Builds the index once from a validated boundary set. No per-query
    /// rebuilding happens after this.
    pub fn new(mut polygons: Vec<CountryPolygon>, settings: AttributionSettings) -> AttributionIndex {
        polygons.sort_by(|a, b| a.country.cmp(&b.country));
        AttributionIndex {
            polygons,
            settings,
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Uncached resolution: containment first, nearest-boundary fallback
    /// second, `None` beyond the cutoff.
    pub fn resolve(&self, latitude: f64, longitude: f64) -> Option<Resolution> {
        let containing: Vec<&CountryPolygon> = self
            .polygons
            .iter()
            .filter(|p| point_in_rings(latitude, longitude, &p.rings))
            .collect();

        match containing.len() {
            1 => Some(Resolution {
                country: containing[0].country.clone(),
                method: AttributionMethod::Containment,
            }),
            0 => self.nearest_within_cutoff(latitude, longitude),
            _ => {
                // Overlapping boundary data. The polygon set is sorted by
                // country name, so the first match is the alphabetical one.
                logging::warn(
                    DataSource::Attribution,
                    Some(&format!("{:.3},{:.3}", latitude, longitude)),
                    &format!(
                        "point contained by {} overlapping polygons, \
                         tie-break chose '{}'",
                        containing.len(),
                        containing[0].country
                    ),
                );
                Some(Resolution {
                    country: containing[0].country.clone(),
                    method: AttributionMethod::OverlapTieBreak,
                })
            }
        }
    }

    fn nearest_within_cutoff(&self, latitude: f64, longitude: f64) -> Option<Resolution> {
        let mut best: Option<(f64, &str)> = None;
        for polygon in &self.polygons {
            for ring in &polygon.rings {
                for vertex in ring {
                    let d = approx_distance_km(latitude, longitude, vertex[0], vertex[1]);
                    if best.map_or(true, |(bd, _)| d < bd) {
                        best = Some((d, polygon.country.as_str()));
                    }
                }
            }
        }
        match best {
            Some((distance, country)) if distance <= self.settings.max_fallback_distance_km => {
                Some(Resolution {
                    country: country.to_string(),
                    method: AttributionMethod::NearestBoundary,
                })
            }
            _ => None,
        }
    }

    /// Cached country lookup for a coordinate. `None` means unknown.
    ///
    /// The result is memoized under the rounded coordinate key for the
    /// lifetime of the index; boundary data is static per process, so the
    /// cache is never invalidated. Resolution runs outside the lock — two
    /// threads racing on the same key may both compute, and the second
    /// insert is a no-op with an identical value.
    pub fn attribute(&self, latitude: f64, longitude: f64) -> Option<String> {
        let key = self.cache_key(latitude, longitude);

        if let Some(cached) = self.cache.lock().unwrap().get(&key) {
            return cached.clone();
        }

        let resolved = self.resolve(latitude, longitude).map(|r| r.country);
        self.cache
            .lock()
            .unwrap()
            .entry(key)
            .or_insert_with(|| resolved.clone());
        resolved
    }

    /// Returns annotated copies of the given events, each carrying its
    /// attribution result. Input events are never mutated.
    pub fn attribute_events(&self, events: &[Event]) -> Vec<Event> {
        events
            .iter()
            .map(|e| e.with_country(self.attribute(e.latitude, e.longitude)))
            .collect()
    }

    /// Number of distinct rounded coordinates resolved so far.
    pub fn cache_len(&self) -> usize {
        self.cache.lock().unwrap().len()
    }

    fn cache_key(&self, latitude: f64, longitude: f64) -> CacheKey {
        let scale = 10f64.powi(self.settings.cache_rounding_decimals as i32);
        (
            (latitude * scale).round() as i64,
            (longitude * scale).round() as i64,
        )
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boundaries::CountryPolygon;

    fn square(country: &str, lat0: f64, lon0: f64, lat1: f64, lon1: f64) -> CountryPolygon {
        CountryPolygon::single_ring(
            country,
            vec![[lat0, lon0], [lat0, lon1], [lat1, lon1], [lat1, lon0]],
        )
    }

    /// Two disjoint squares and one overlapping pair, default settings.
    fn test_index() -> AttributionIndex {
        AttributionIndex::new(
            vec![
                square("Eastland", 0.0, 20.0, 10.0, 30.0),
                square("Westland", 0.0, -30.0, 10.0, -20.0),
                // Zeta overlaps Eastland's northeast corner but sorts last.
                square("Zeta", 8.0, 28.0, 18.0, 38.0),
            ],
            AttributionSettings::default(),
        )
    }

    #[test]
    fn test_single_containment_returns_that_country() {
        let index = test_index();
        let r = index.resolve(5.0, 25.0).expect("point is inside Eastland");
        assert_eq!(r.country, "Eastland");
        assert_eq!(r.method, AttributionMethod::Containment);
    }

    #[test]
    fn test_point_outside_all_polygons_falls_back_to_nearest_boundary() {
        let index = test_index();
        // ~1 degree east of Eastland's edge, well inside the 500 km cutoff.
        let r = index.resolve(5.0, 31.0).expect("near-coastal point resolves");
        assert_eq!(r.country, "Eastland");
        assert_eq!(r.method, AttributionMethod::NearestBoundary);
    }

    #[test]
    fn test_mid_ocean_point_beyond_cutoff_is_unknown() {
        let index = test_index();
        // Mid-Pacific, thousands of km from every test polygon vertex.
        assert_eq!(index.resolve(0.0, -160.0), None);
        assert_eq!(index.attribute(0.0, -160.0), None);
    }

    #[test]
    fn test_overlap_tie_break_is_alphabetical_and_low_confidence() {
        let index = test_index();
        // (9, 29) is inside both Eastland and Zeta.
        let r = index.resolve(9.0, 29.0).expect("overlap still resolves");
        assert_eq!(r.country, "Eastland", "alphabetical first must win");
        assert_eq!(r.method, AttributionMethod::OverlapTieBreak);
    }

    #[test]
    fn test_overlap_tie_break_ignores_construction_order() {
        // Same polygons handed over in reverse order must give the same answer.
        let index = AttributionIndex::new(
            vec![
                square("Zeta", 8.0, 28.0, 18.0, 38.0),
                square("Eastland", 0.0, 20.0, 10.0, 30.0),
            ],
            AttributionSettings::default(),
        );
        let r = index.resolve(9.0, 29.0).unwrap();
        assert_eq!(r.country, "Eastland");
    }

    #[test]
    fn test_attribute_is_idempotent_and_cached() {
        let index = test_index();
        let first = index.attribute(5.0, 25.0);
        let second = index.attribute(5.0, 25.0);
        assert_eq!(first, second, "same coordinate must attribute identically");
        assert_eq!(first.as_deref(), Some("Eastland"));
        assert_eq!(index.cache_len(), 1, "repeat lookups share one cache entry");
    }

    #[test]
    fn test_near_duplicate_coordinates_share_a_cache_entry() {
        let index = test_index();
        // Differ only past the second decimal — same rounded key.
        index.attribute(5.0001, 25.0001);
        index.attribute(5.0049, 25.0032);
        assert_eq!(index.cache_len(), 1);
    }

    #[test]
    fn test_unknown_results_are_cached_too() {
        let index = test_index();
        index.attribute(0.0, -160.0);
        index.attribute(0.0, -160.0);
        assert_eq!(index.cache_len(), 1);
    }

    #[test]
    fn test_tight_cutoff_turns_coastal_points_unknown() {
        let index = AttributionIndex::new(
            vec![square("Eastland", 0.0, 20.0, 10.0, 30.0)],
            AttributionSettings {
                max_fallback_distance_km: 50.0,
                ..AttributionSettings::default()
            },
        );
        // ~1 degree (~111 km) off the boundary: beyond a 50 km cutoff.
        assert_eq!(index.resolve(5.0, 31.0), None);
    }

    #[test]
    fn test_attribute_events_annotates_copies() {
        use crate::model::{Event, EventSource};
        use chrono::{TimeZone, Utc};

        let index = test_index();
        let events = vec![Event {
            id: "a".to_string(),
            time: Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap(),
            latitude: 5.0,
            longitude: 25.0,
            depth_km: None,
            magnitude: 6.0,
            place: None,
            source: EventSource::Live,
            country: None,
        }];
        let attributed = index.attribute_events(&events);
        assert_eq!(attributed[0].country.as_deref(), Some("Eastland"));
        assert_eq!(events[0].country, None, "input events are immutable");
    }
}
