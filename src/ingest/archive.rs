/// Historical archive adapter.
///
/// Parses rows of the multi-decade significant-earthquake archive (the
/// NCEI/USGS export distributed as `database.csv`) into canonical `Event`s
/// tagged `EventSource::Historical`. The caller is responsible for loading
/// the file into memory; this module only understands the row layout.
///
/// Column layout (21 comma-separated fields):
///   Date, Time, Latitude, Longitude, Type, Depth, Depth Error,
///   Depth Seismic Stations, Magnitude, Magnitude Type, Magnitude Error,
///   Magnitude Seismic Stations, Azimuthal Gap, Horizontal Distance,
///   Horizontal Error, Root Mean Square, ID, Source, Location Source,
///   Magnitude Source, Status

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

use crate::ingest::{collect_events, NormalizedBatch};
use crate::model::{coordinates_in_range, Event, EventSource, NormalizationError};

// Field indexes into an archive row.
const COL_DATE: usize = 0;
const COL_TIME: usize = 1;
const COL_LATITUDE: usize = 2;
const COL_LONGITUDE: usize = 3;
const COL_DEPTH: usize = 5;
const COL_MAGNITUDE: usize = 8;
const COL_ID: usize = 16;

/// Minimum number of fields a row must have to be usable (through ID).
const MIN_FIELDS: usize = COL_ID + 1;

// ============================================================================
// Row parsing
// ============================================================================

/// Parses values that might be empty or a "null" placeholder.
fn parse_field(s: &str) -> Option<f64> {
    let trimmed = s.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("null") {
        None
    } else {
        trimmed.parse().ok()
    }
}

/// Parses the Date/Time column pair into a UTC instant.
///
/// Rows normally carry "MM/DD/YYYY" and "HH:MM:SS". A handful of rows in
/// the archive instead carry a full RFC 3339 timestamp in the Date column;
/// both forms are accepted. A missing or unparseable Time falls back to
/// midnight — day precision is acceptable for historical events.
fn parse_row_timestamp(date: &str, time: &str) -> Result<DateTime<Utc>, NormalizationError> {
    let date = date.trim();

    if let Ok(parsed) = DateTime::parse_from_rfc3339(date) {
        return Ok(parsed.with_timezone(&Utc));
    }

    let day = NaiveDate::parse_from_str(date, "%m/%d/%Y")
        .map_err(|_| NormalizationError::BadTimestamp(date.to_string()))?;
    let clock = NaiveTime::parse_from_str(time.trim(), "%H:%M:%S")
        .unwrap_or_else(|_| NaiveTime::from_hms_opt(0, 0, 0).unwrap());

    Ok(DateTime::from_naive_utc_and_offset(day.and_time(clock), Utc))
}

/// Converts a single archive row into a canonical `Event`.
pub fn event_from_row(line: &str) -> Result<Event, NormalizationError> {
    let fields: Vec<&str> = line.split(',').collect();
    if fields.len() < MIN_FIELDS {
        return Err(NormalizationError::MalformedRecord(format!(
            "row has {} fields, expected at least {}",
            fields.len(),
            MIN_FIELDS
        )));
    }

    let id = fields[COL_ID].trim();
    if id.is_empty() {
        return Err(NormalizationError::MalformedRecord(
            "row has no ID field".to_string(),
        ));
    }

    let latitude = parse_field(fields[COL_LATITUDE]).ok_or_else(|| {
        NormalizationError::MalformedRecord(format!("{}: unparseable latitude", id))
    })?;
    let longitude = parse_field(fields[COL_LONGITUDE]).ok_or_else(|| {
        NormalizationError::MalformedRecord(format!("{}: unparseable longitude", id))
    })?;
    if !coordinates_in_range(latitude, longitude) {
        return Err(NormalizationError::CoordinateOutOfRange {
            latitude,
            longitude,
        });
    }

    let magnitude = parse_field(fields[COL_MAGNITUDE])
        .ok_or_else(|| NormalizationError::MissingMagnitude(id.to_string()))?;

    let time = parse_row_timestamp(fields[COL_DATE], fields[COL_TIME])?;

    // Same convention as the live adapter: unreported or negative depths
    // carry no depth information.
    let depth_km = parse_field(fields[COL_DEPTH]).filter(|d| *d >= 0.0);

    Ok(Event {
        id: id.to_string(),
        time,
        latitude,
        longitude,
        depth_km,
        magnitude,
        place: None, // archive rows carry no locality description
        source: EventSource::Historical,
        country: None,
    })
}

/// Parses a whole archive file body (header line included) into a batch.
///
/// The header and blank lines are not counted as records; every data row
/// produces exactly one outcome in the returned batch.
pub fn parse_archive_csv(csv: &str) -> NormalizedBatch {
    collect_events(
        csv.lines()
            .skip(1)
            .filter(|line| !line.trim().is_empty())
            .map(event_from_row),
    )
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    const HEADER: &str = "Date,Time,Latitude,Longitude,Type,Depth,Depth Error,Depth Seismic Stations,Magnitude,Magnitude Type,Magnitude Error,Magnitude Seismic Stations,Azimuthal Gap,Horizontal Distance,Horizontal Error,Root Mean Square,ID,Source,Location Source,Magnitude Source,Status";

    const GOOD_ROW: &str =
        "01/02/1965,13:44:18,19.246,145.616,Earthquake,131.6,,,6.0,MW,,,,,,,ISCGEM860706,ISCGEM,ISCGEM,ISCGEM,Automatic";

    #[test]
    fn test_event_from_row_parses_all_canonical_fields() {
        let event = event_from_row(GOOD_ROW).expect("well-formed row should parse");
        assert_eq!(event.id, "ISCGEM860706");
        assert_eq!(event.latitude, 19.246);
        assert_eq!(event.longitude, 145.616);
        assert_eq!(event.depth_km, Some(131.6));
        assert_eq!(event.magnitude, 6.0);
        assert_eq!(event.time.year(), 1965);
        assert_eq!(event.source, EventSource::Historical);
    }

    #[test]
    fn test_rfc3339_date_variant_is_accepted() {
        // A handful of archive rows carry a full timestamp in the Date column.
        let row = "1975-02-23T02:58:41.000Z,02:58:41,8.017,-71.678,Earthquake,33.0,,,5.6,MB,,,,,,,USP0000A09,US,US,US,Reviewed";
        let event = event_from_row(row).expect("RFC 3339 date variant should parse");
        assert_eq!(event.time.year(), 1975);
        assert_eq!(event.time.month(), 2);
    }

    #[test]
    fn test_missing_time_falls_back_to_midnight() {
        let row =
            "06/04/1970,,-22.0,-68.0,Earthquake,60.0,,,5.5,MB,,,,,,,TESTID0001,US,US,US,Reviewed";
        let event = event_from_row(row).expect("missing time is day-precision, not an error");
        assert_eq!(event.time.format("%H:%M:%S").to_string(), "00:00:00");
    }

    #[test]
    fn test_missing_magnitude_is_rejected() {
        let row =
            "01/02/1965,13:44:18,19.246,145.616,Earthquake,131.6,,,,MW,,,,,,,ISCGEM860706,ISCGEM,ISCGEM,ISCGEM,Automatic";
        let result = event_from_row(row);
        assert!(
            matches!(result, Err(NormalizationError::MissingMagnitude(_))),
            "magnitude is required, got {:?}",
            result
        );
    }

    #[test]
    fn test_truncated_row_is_malformed() {
        let result = event_from_row("01/02/1965,13:44:18,19.246");
        assert!(matches!(
            result,
            Err(NormalizationError::MalformedRecord(_))
        ));
    }

    #[test]
    fn test_parse_archive_csv_skips_header_and_counts_rejects() {
        let bad_row =
            "13/45/1965,99:99:99,19.246,145.616,Earthquake,131.6,,,6.0,MW,,,,,,,BADDATE001,ISCGEM,ISCGEM,ISCGEM,Automatic";
        let csv = format!("{}\n{}\n\n{}\n", HEADER, GOOD_ROW, bad_row);
        let batch = parse_archive_csv(&csv);
        assert_eq!(batch.accepted_count(), 1);
        assert_eq!(batch.skipped_count(), 1);
        assert!(matches!(
            batch.skipped[0].1,
            NormalizationError::BadTimestamp(_)
        ));
    }
}
