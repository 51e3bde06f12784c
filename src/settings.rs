/// Pipeline tunables, loadable from a TOML file.
///
/// Every knob has a sensible default so the pipeline runs with no settings
/// file at all; a file only needs to name the values it overrides:
///
/// ```toml
/// [attribution]
/// max_fallback_distance_km = 300.0
/// cache_rounding_decimals = 3
/// ```

use serde::Deserialize;
use std::error::Error;
use std::fs;

// ---------------------------------------------------------------------------
// Settings types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Deserialize, Default)]
#[serde(default)]
pub struct PipelineSettings {
    pub attribution: AttributionSettings,
}

/// Tunables for the country attribution index.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AttributionSettings {
    /// Maximum distance (km) from an epicenter to the nearest boundary
    /// vertex for the nearest-boundary fallback to assign a country.
    /// Generous by default so near-coastal events still attribute; beyond
    /// it the result is "unknown".
    pub max_fallback_distance_km: f64,
    /// Decimal places the cache key rounds coordinates to. 2 decimals is
    /// ~1.1 km at the equator — a trade-off between cache hit rate and
    /// attribution accuracy at coastlines.
    pub cache_rounding_decimals: u32,
}

impl Default for AttributionSettings {
    fn default() -> AttributionSettings {
        AttributionSettings {
            max_fallback_distance_km: 500.0,
            cache_rounding_decimals: 2,
        }
    }
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

/// Loads settings from a TOML file. Missing keys fall back to defaults;
/// out-of-range values are rejected here rather than misbehaving later.
pub fn load_settings(path: &str) -> Result<PipelineSettings, Box<dyn Error>> {
    let body = fs::read_to_string(path)?;
    let settings: PipelineSettings = toml::from_str(&body)?;

    if settings.attribution.max_fallback_distance_km < 0.0 {
        return Err(format!(
            "max_fallback_distance_km must be non-negative, got {}",
            settings.attribution.max_fallback_distance_km
        )
        .into());
    }
    if settings.attribution.cache_rounding_decimals > 6 {
        return Err(format!(
            "cache_rounding_decimals must be at most 6, got {}",
            settings.attribution.cache_rounding_decimals
        )
        .into());
    }

    Ok(settings)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
