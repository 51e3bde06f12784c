/// Planar geometry primitives for country attribution.
///
/// Containment treats (lon, lat) as planar (x, y) coordinates, which is the
/// usual simplification for boundary polygons of country scale; distances
/// use an equirectangular approximation of great-circle distance. Both are
/// deliberately approximate — attribution is a statistical estimate, and
/// these primitives are only as precise as the boundary data they run over.

/// Mean Earth radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

// ---------------------------------------------------------------------------
// Point-in-polygon (even-odd rule)
// ---------------------------------------------------------------------------

/// Even-odd containment test of a point against a set of vertex rings.
///
/// Casts a horizontal ray from the point and counts edge crossings across
/// all rings combined: an odd total means inside. Running the parity over
/// every ring at once is what makes holes work — a point inside an outer
/// ring and inside an inner (hole) ring crosses an even number of edges
/// and lands outside.
pub fn point_in_rings(latitude: f64, longitude: f64, rings: &[Vec<[f64; 2]>]) -> bool {
    let mut inside = false;
    for ring in rings {
        let n = ring.len();
        if n < 3 {
            continue; // validated upstream; a short ring encloses nothing
        }
        let mut j = n - 1;
        for i in 0..n {
            let (lat_i, lon_i) = (ring[i][0], ring[i][1]);
            let (lat_j, lon_j) = (ring[j][0], ring[j][1]);
            // Edge straddles the point's latitude, and the crossing of the
            // horizontal ray lies to the east of the point.
            if (lat_i > latitude) != (lat_j > latitude)
                && longitude
                    < (lon_j - lon_i) * (latitude - lat_i) / (lat_j - lat_i) + lon_i
            {
                inside = !inside;
            }
            j = i;
        }
    }
    inside
}

// ---------------------------------------------------------------------------
// Distance
// ---------------------------------------------------------------------------

/// Equirectangular approximation of the great-circle distance in km.
///
/// Accurate to well under a percent at the scales the nearest-boundary
/// fallback cares about (hundreds of km), and much cheaper than a full
/// haversine over every vertex of every polygon. Longitude differences are
/// wrapped so that points straddling the antimeridian measure short, not
/// around-the-world.
pub fn approx_distance_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let mut dlon = lon2 - lon1;
    if dlon > 180.0 {
        dlon -= 360.0;
    } else if dlon < -180.0 {
        dlon += 360.0;
    }

    let mean_lat = ((lat1 + lat2) / 2.0).to_radians();
    let x = dlon.to_radians() * mean_lat.cos();
    let y = (lat2 - lat1).to_radians();
    EARTH_RADIUS_KM * (x * x + y * y).sqrt()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn square(lat0: f64, lon0: f64, lat1: f64, lon1: f64) -> Vec<[f64; 2]> {
        vec![
            [lat0, lon0],
            [lat0, lon1],
            [lat1, lon1],
            [lat1, lon0],
        ]
    }

    #[test]
    fn test_point_strictly_inside_square_is_contained() {
        let rings = vec![square(0.0, 0.0, 10.0, 10.0)];
        assert!(point_in_rings(5.0, 5.0, &rings));
    }

    #[test]
    fn test_point_strictly_outside_square_is_not_contained() {
        let rings = vec![square(0.0, 0.0, 10.0, 10.0)];
        assert!(!point_in_rings(15.0, 5.0, &rings));
        assert!(!point_in_rings(5.0, -5.0, &rings));
        assert!(!point_in_rings(-5.0, -5.0, &rings));
    }

    #[test]
    fn test_point_in_hole_is_not_contained() {
        // A donut: 20x20 outer ring with a 10x10 hole in the middle.
        let rings = vec![
            square(-10.0, -10.0, 10.0, 10.0),
            square(-5.0, -5.0, 5.0, 5.0),
        ];
        assert!(
            !point_in_rings(0.0, 0.0, &rings),
            "point inside the hole crosses an even number of edges"
        );
        assert!(
            point_in_rings(7.0, 0.0, &rings),
            "point between hole and outer ring is inside"
        );
    }

    #[test]
    fn test_concave_polygon_containment() {
        // A "C" shape opening east: the notch must not count as inside.
        let rings = vec![vec![
            [0.0, 0.0],
            [10.0, 0.0],
            [10.0, 10.0],
            [8.0, 10.0],
            [8.0, 2.0],
            [2.0, 2.0],
            [2.0, 10.0],
            [0.0, 10.0],
        ]];
        assert!(point_in_rings(1.0, 5.0, &rings), "bottom bar of the C");
        assert!(!point_in_rings(5.0, 5.0, &rings), "inside the notch");
    }

    #[test]
    fn test_one_degree_of_latitude_is_about_111_km() {
        let d = approx_distance_km(0.0, 0.0, 1.0, 0.0);
        assert!(
            (d - 111.2).abs() < 1.0,
            "1 degree of latitude should be ~111 km, got {}",
            d
        );
    }

    #[test]
    fn test_longitude_shrinks_with_latitude() {
        let at_equator = approx_distance_km(0.0, 0.0, 0.0, 1.0);
        let at_60_north = approx_distance_km(60.0, 0.0, 60.0, 1.0);
        assert!(
            at_60_north < at_equator * 0.6,
            "a degree of longitude at 60N ({} km) should be about half of the \
             equatorial value ({} km)",
            at_60_north,
            at_equator
        );
    }

    #[test]
    fn test_antimeridian_distance_is_short() {
        // 179.5E to 179.5W is one degree apart, not 359.
        let d = approx_distance_km(0.0, 179.5, 0.0, -179.5);
        assert!(
            d < 150.0,
            "antimeridian-straddling distance should wrap, got {} km",
            d
        );
    }

    #[test]
    fn test_distance_is_symmetric() {
        let a = approx_distance_km(35.0, 139.0, 40.6, 142.9);
        let b = approx_distance_km(40.6, 142.9, 35.0, 139.0);
        assert!((a - b).abs() < 1e-9);
    }
}
