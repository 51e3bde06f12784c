/// Event, EventSource, NormalizationError
/// core data structures and error handling
///
/// Core data types for the seismic event analysis pipeline.
///
/// This module defines the shared domain model imported by all other modules.
/// It contains no I/O and almost no logic — types plus the coordinate range
/// check that every adapter needs.

use chrono::{DateTime, Utc};
use serde::Serialize;

// ---------------------------------------------------------------------------
// Coordinate bounds
// ---------------------------------------------------------------------------

/// Valid latitude range in degrees (WGS84).
pub const LAT_RANGE: (f64, f64) = (-90.0, 90.0);

/// Valid longitude range in degrees (WGS84).
pub const LON_RANGE: (f64, f64) = (-180.0, 180.0);

// ---------------------------------------------------------------------------
// Event types
// ---------------------------------------------------------------------------

/// Which collaborator a record came from. Never mutated after creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EventSource {
    /// Live feed covering a recent sliding window (millisecond timestamps).
    Live,
    /// Static multi-decade archive (day precision is acceptable).
    Historical,
}

/// A canonical seismic event record.
///
/// Produced by the adapters in `ingest::usgs` and `ingest::archive` and
/// treated as an immutable value object from then on: filtering and
/// attribution return new sequences or annotated copies rather than
/// mutating fields in place.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Event {
    /// Stable unique identifier, used for cross-source deduplication.
    pub id: String,
    /// Instant of occurrence, UTC.
    pub time: DateTime<Utc>,
    /// Epicenter latitude, degrees, in [-90, 90].
    pub latitude: f64,
    /// Epicenter longitude, degrees, in [-180, 180].
    pub longitude: f64,
    /// Hypocenter depth in km. `None` when unreported; excluded from depth
    /// statistics but not from other aggregates.
    pub depth_km: Option<f64>,
    /// Event magnitude. Required — a record with no magnitude is rejected.
    pub magnitude: f64,
    /// Free-text locality description, display-only.
    pub place: Option<String>,
    /// Originating source, fixed at normalization time.
    pub source: EventSource,
    /// Country assigned post-hoc by the attribution index. Absent until
    /// attribution runs; a statistical estimate, never authoritative
    /// ground truth.
    pub country: Option<String>,
}

impl Event {
    /// Returns a copy of this event carrying the given attribution result.
    pub fn with_country(&self, country: Option<String>) -> Event {
        Event {
            country,
            ..self.clone()
        }
    }
}

/// Checks that a coordinate pair is finite and inside the valid WGS84 ranges.
pub fn coordinates_in_range(latitude: f64, longitude: f64) -> bool {
    latitude.is_finite()
        && longitude.is_finite()
        && latitude >= LAT_RANGE.0
        && latitude <= LAT_RANGE.1
        && longitude >= LON_RANGE.0
        && longitude <= LON_RANGE.1
}

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors that can arise when normalizing a single raw record.
///
/// These are always recovered locally: the batch driver skips the offending
/// record, counts it, and keeps going. No normalization failure aborts a
/// whole batch.
#[derive(Debug, Clone, PartialEq)]
pub enum NormalizationError {
    /// The record has no magnitude value, or a non-numeric one.
    MissingMagnitude(String),
    /// Latitude or longitude outside the valid WGS84 ranges.
    CoordinateOutOfRange { latitude: f64, longitude: f64 },
    /// The record's timestamp could not be parsed.
    BadTimestamp(String),
    /// The raw record is structurally unusable (truncated row, missing id).
    MalformedRecord(String),
}

impl std::fmt::Display for NormalizationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NormalizationError::MissingMagnitude(id) => {
                write!(f, "Missing or non-numeric magnitude for record: {}", id)
            }
            NormalizationError::CoordinateOutOfRange {
                latitude,
                longitude,
            } => {
                write!(
                    f,
                    "Coordinates out of range: lat={}, lon={}",
                    latitude, longitude
                )
            }
            NormalizationError::BadTimestamp(raw) => {
                write!(f, "Unparseable timestamp: {}", raw)
            }
            NormalizationError::MalformedRecord(detail) => {
                write!(f, "Malformed record: {}", detail)
            }
        }
    }
}

impl std::error::Error for NormalizationError {}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
