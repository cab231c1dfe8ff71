//! # Geometry
//!
//! Minimal geospatial primitives behind a small trait so the query engine
//! is not tied to a particular distance model or spatial index. The default
//! implementation is great-circle distance over a naive O(n) scan, which is
//! adequate at the corpus sizes of this domain.

use serde::{Deserialize, Serialize};

const EARTH_RADIUS_KM: f64 = 6371.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

/// Rectangle in (south, west, north, east) order, edges inclusive.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct BoundingBox {
    pub south: f64,
    pub west: f64,
    pub north: f64,
    pub east: f64,
}

impl BoundingBox {
    pub fn contains(&self, point: GeoPoint) -> bool {
        point.lat >= self.south
            && point.lat <= self.north
            && point.lng >= self.west
            && point.lng <= self.east
    }
}

/// Distance model used by radius queries. Implementations must be
/// symmetric and non-negative.
pub trait Geometry {
    fn distance_km(&self, a: GeoPoint, b: GeoPoint) -> f64;
}

/// Great-circle distance on a spherical Earth.
#[derive(Debug, Clone, Copy, Default)]
pub struct Haversine;

impl Geometry for Haversine {
    fn distance_km(&self, a: GeoPoint, b: GeoPoint) -> f64 {
        let lat_a = a.lat.to_radians();
        let lat_b = b.lat.to_radians();
        let d_lat = (b.lat - a.lat).to_radians();
        let d_lng = (b.lng - a.lng).to_radians();

        let h = (d_lat / 2.0).sin().powi(2)
            + lat_a.cos() * lat_b.cos() * (d_lng / 2.0).sin().powi(2);
        2.0 * EARTH_RADIUS_KM * h.sqrt().asin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PRAHA: GeoPoint = GeoPoint { lat: 50.0755, lng: 14.4378 };
    const BRNO: GeoPoint = GeoPoint { lat: 49.1951, lng: 16.6068 };

    #[test]
    fn praha_to_brno_is_about_184km() {
        let d = Haversine.distance_km(PRAHA, BRNO);
        assert!((d - 184.0).abs() < 3.0, "got {}", d);
    }

    #[test]
    fn distance_is_symmetric_and_zero_at_identity() {
        let ab = Haversine.distance_km(PRAHA, BRNO);
        let ba = Haversine.distance_km(BRNO, PRAHA);
        assert!((ab - ba).abs() < 1e-9);
        assert_eq!(Haversine.distance_km(PRAHA, PRAHA), 0.0);
    }

    #[test]
    fn bounding_box_edges_are_inclusive() {
        let bbox = BoundingBox { south: 50.0, west: 14.0, north: 50.2, east: 14.6 };
        assert!(bbox.contains(GeoPoint { lat: 50.0, lng: 14.0 }));
        assert!(bbox.contains(GeoPoint { lat: 50.2, lng: 14.6 }));
        assert!(bbox.contains(PRAHA));
        assert!(!bbox.contains(BRNO));
    }
}
