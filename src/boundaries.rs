/// Country boundary polygon set.
///
/// The polygon data itself is an external collaborator: an opaque set of
/// named rings loaded once at startup and read-only for the life of the
/// process. This module owns the shape of that data, its JSON loading, and
/// the structural validation every other module relies on — the attribution
/// index assumes rings are non-degenerate and vertices are in range, so the
/// checks live here at the loading seam rather than on the query path.

use serde::{Deserialize, Serialize};

use crate::model::coordinates_in_range;

// ---------------------------------------------------------------------------
// Polygon types
// ---------------------------------------------------------------------------

/// A named country boundary: one or more rings of `[lat, lon]` vertices.
///
/// Multiple rings cover both disjoint landmasses (islands) and holes;
/// containment uses the even-odd rule across all rings combined, so the
/// distinction does not matter structurally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountryPolygon {
    /// Display name, also the attribution result value.
    pub country: String,
    /// Ordered vertex rings, `[latitude, longitude]` in degrees.
    pub rings: Vec<Vec<[f64; 2]>>,
}

impl CountryPolygon {
    /// Convenience constructor for a single-ring polygon.
    pub fn single_ring(country: &str, ring: Vec<[f64; 2]>) -> CountryPolygon {
        CountryPolygon {
            country: country.to_string(),
            rings: vec![ring],
        }
    }

    /// Total vertex count across all rings.
    pub fn vertex_count(&self) -> usize {
        self.rings.iter().map(|r| r.len()).sum()
    }
}

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Structural problems in a boundary set, caught at load time.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundaryError {
    /// The set contains no polygons at all.
    EmptySet,
    /// A ring has fewer than 3 vertices and cannot enclose anything.
    DegenerateRing { country: String, vertices: usize },
    /// A vertex falls outside the valid WGS84 ranges.
    VertexOutOfRange {
        country: String,
        latitude: f64,
        longitude: f64,
    },
    /// Two polygons share the same country name.
    DuplicateCountry(String),
}

impl std::fmt::Display for BoundaryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BoundaryError::EmptySet => write!(f, "Boundary set contains no polygons"),
            BoundaryError::DegenerateRing { country, vertices } => {
                write!(
                    f,
                    "Degenerate ring for '{}': {} vertices (need at least 3)",
                    country, vertices
                )
            }
            BoundaryError::VertexOutOfRange {
                country,
                latitude,
                longitude,
            } => {
                write!(
                    f,
                    "Vertex out of range for '{}': lat={}, lon={}",
                    country, latitude, longitude
                )
            }
            BoundaryError::DuplicateCountry(name) => {
                write!(f, "Duplicate country name in boundary set: '{}'", name)
            }
        }
    }
}

impl std::error::Error for BoundaryError {}

// ---------------------------------------------------------------------------
// Loading and validation
// ---------------------------------------------------------------------------

/// Validates a boundary set before it is handed to the attribution index.
pub fn validate(polygons: &[CountryPolygon]) -> Result<(), BoundaryError> {
    if polygons.is_empty() {
        return Err(BoundaryError::EmptySet);
    }

    let mut seen = std::collections::HashSet::new();
    for polygon in polygons {
        if !seen.insert(polygon.country.as_str()) {
            return Err(BoundaryError::DuplicateCountry(polygon.country.clone()));
        }
        for ring in &polygon.rings {
            if ring.len() < 3 {
                return Err(BoundaryError::DegenerateRing {
                    country: polygon.country.clone(),
                    vertices: ring.len(),
                });
            }
            for vertex in ring {
                if !coordinates_in_range(vertex[0], vertex[1]) {
                    return Err(BoundaryError::VertexOutOfRange {
                        country: polygon.country.clone(),
                        latitude: vertex[0],
                        longitude: vertex[1],
                    });
                }
            }
        }
    }
    Ok(())
}

/// Loads and validates a boundary set from its JSON representation:
/// an array of `{"country": ..., "rings": [[[lat, lon], ...], ...]}`.
pub fn load_from_json(body: &str) -> Result<Vec<CountryPolygon>, Box<dyn std::error::Error>> {
    let polygons: Vec<CountryPolygon> = serde_json::from_str(body)?;
    validate(&polygons)?;
    Ok(polygons)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
