/// USGS Earthquake Hazards Program live feed adapter.
///
/// Deserializes the GeoJSON summary feed published at
/// https://earthquake.usgs.gov/earthquakes/feed/v1.0/ and converts each
/// feature into a canonical `Event` tagged `EventSource::Live`.
///
/// The HTTP fetch itself belongs to the caller — this module only defines
/// the feed's wire shape, the feed URL construction, and the per-feature
/// normalization. Feed docs:
/// https://earthquake.usgs.gov/earthquakes/feed/v1.0/geojson.php

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::ingest::{collect_events, NormalizedBatch};
use crate::model::{coordinates_in_range, Event, EventSource, NormalizationError};

const FEED_BASE_URL: &str = "https://earthquake.usgs.gov/earthquakes/feed/v1.0/summary";

// ============================================================================
// Feed Response Structures
// ============================================================================

/// Top-level GeoJSON summary feed document.
#[derive(Debug, Deserialize)]
pub struct QuakeFeed {
    pub metadata: Option<FeedMetadata>,
    pub features: Vec<QuakeFeature>,
}

#[derive(Debug, Deserialize)]
pub struct FeedMetadata {
    pub generated: Option<i64>,
    pub title: Option<String>,
    pub count: Option<usize>,
}

/// One seismic event feature from the feed.
#[derive(Debug, Deserialize)]
pub struct QuakeFeature {
    /// USGS event id, e.g. "us7000kufc".
    pub id: Option<String>,
    pub properties: QuakeProperties,
    pub geometry: Option<QuakeGeometry>,
}

#[derive(Debug, Deserialize)]
pub struct QuakeProperties {
    /// Magnitude. The feed does publish magnitude-less events occasionally;
    /// those are rejected at normalization.
    pub mag: Option<f64>,
    pub place: Option<String>,
    /// Origin time, milliseconds since the Unix epoch.
    pub time: Option<i64>,
    #[serde(rename = "type")]
    pub event_type: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct QuakeGeometry {
    /// `[longitude, latitude, depth_km]` — GeoJSON axis order, depth may
    /// be missing or negative (above-datum origins).
    pub coordinates: Vec<f64>,
}

// ============================================================================
// Feed URL construction
// ============================================================================

/// Builds a summary feed URL for a magnitude level and time window.
///
/// # Parameters
/// - `level`: "all", "1.0", "2.5", "4.5", or "significant"
/// - `window`: "hour", "day", "week", or "month"
pub fn build_feed_url(level: &str, window: &str) -> String {
    format!("{}/{}_{}.geojson", FEED_BASE_URL, level, window)
}

/// Parses a raw feed response body.
pub fn parse_feed(body: &str) -> Result<QuakeFeed, serde_json::Error> {
    serde_json::from_str(body)
}

// ============================================================================
// Normalization
// ============================================================================

/// Converts a single feed feature into a canonical `Event`.
pub fn event_from_feature(feature: &QuakeFeature) -> Result<Event, NormalizationError> {
    let id = feature
        .id
        .as_deref()
        .filter(|s| !s.is_empty())
        .ok_or_else(|| NormalizationError::MalformedRecord("feature has no id".to_string()))?;

    let geometry = feature.geometry.as_ref().ok_or_else(|| {
        NormalizationError::MalformedRecord(format!("feature {} has no geometry", id))
    })?;
    if geometry.coordinates.len() < 2 {
        return Err(NormalizationError::MalformedRecord(format!(
            "feature {} has {} coordinate components, expected at least 2",
            id,
            geometry.coordinates.len()
        )));
    }

    // GeoJSON order is [lon, lat, depth].
    let longitude = geometry.coordinates[0];
    let latitude = geometry.coordinates[1];
    if !coordinates_in_range(latitude, longitude) {
        return Err(NormalizationError::CoordinateOutOfRange {
            latitude,
            longitude,
        });
    }

    let magnitude = feature
        .properties
        .mag
        .filter(|m| m.is_finite())
        .ok_or_else(|| NormalizationError::MissingMagnitude(id.to_string()))?;

    let millis = feature
        .properties
        .time
        .ok_or_else(|| NormalizationError::BadTimestamp(format!("{}: no time field", id)))?;
    let time: DateTime<Utc> = DateTime::from_timestamp_millis(millis)
        .ok_or_else(|| NormalizationError::BadTimestamp(format!("{}: time={}", id, millis)))?;

    // Negative depths (origins above the reference datum) carry no useful
    // depth information for the statistics here; treat them as unknown.
    let depth_km = geometry
        .coordinates
        .get(2)
        .copied()
        .filter(|d| d.is_finite() && *d >= 0.0);

    Ok(Event {
        id: id.to_string(),
        time,
        latitude,
        longitude,
        depth_km,
        magnitude,
        place: feature.properties.place.clone(),
        source: EventSource::Live,
        country: None,
    })
}

/// Normalizes every feature in a parsed feed into a batch outcome.
pub fn normalize_feed(feed: &QuakeFeed) -> NormalizedBatch {
    collect_events(feed.features.iter().map(event_from_feature))
}

// ============================================================================
// Tests
// ============================================================================
