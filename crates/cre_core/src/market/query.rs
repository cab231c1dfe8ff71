//! # Geospatial Queries
//!
//! Bounding-box fetch and radius similarity search over a corpus snapshot.
//! Both operate on an immutable slice of listing projections: results are
//! "as of some snapshot", and concurrent queries over the same slice are
//! fully independent.

use crate::market::geo::{BoundingBox, GeoPoint, Geometry, Haversine};
use crate::market::listing::{ListingFilter, ListingSummary};

/// Area similarity band for radius search: ±30% of the reference area.
const AREA_SIMILARITY_BAND: f64 = 0.30;

pub struct GeoQuery<G: Geometry = Haversine> {
    geometry: G,
}

impl Default for GeoQuery<Haversine> {
    fn default() -> Self {
        Self { geometry: Haversine }
    }
}

impl<G: Geometry> GeoQuery<G> {
    pub fn with_geometry(geometry: G) -> Self {
        Self { geometry }
    }

    /// Fetch active listings whose position falls within `bounds`, applying
    /// optional attribute filters, capped at `limit`. Order follows the
    /// snapshot, stable for a fixed corpus.
    pub fn bbox_fetch<'a>(
        &self,
        listings: &'a [ListingSummary],
        bounds: &BoundingBox,
        filter: &ListingFilter,
        limit: usize,
    ) -> Vec<&'a ListingSummary> {
        listings
            .iter()
            .filter(|l| l.is_active)
            .filter(|l| l.position.is_some_and(|p| bounds.contains(p)))
            .filter(|l| filter.matches(l))
            .take(limit)
            .collect()
    }

    /// Find listings similar to the one identified by `reference_id`:
    /// same property and transaction type, within `radius_km`, area within
    /// ±30% when the reference area is known, identical room descriptor
    /// when the reference has one. A missing reference or a reference
    /// without a position yields an empty result; "no neighbors" is a
    /// valid outcome, not an error.
    pub fn radius_search<'a>(
        &self,
        listings: &'a [ListingSummary],
        reference_id: i64,
        radius_km: f64,
        limit: usize,
    ) -> Vec<&'a ListingSummary> {
        let Some(reference) = listings.iter().find(|l| l.id == reference_id) else {
            log::debug!("Similarity search: listing {} not in corpus", reference_id);
            return Vec::new();
        };
        let Some(origin) = reference.position else {
            return Vec::new();
        };

        listings
            .iter()
            .filter(|l| l.id != reference_id)
            .filter(|l| l.is_active)
            .filter(|l| l.property_type == reference.property_type)
            .filter(|l| l.transaction_type == reference.transaction_type)
            .filter(|l| self.within_radius(origin, l, radius_km))
            .filter(|l| area_similar(reference.area_usable, l.area_usable))
            .filter(|l| rooms_match(reference.rooms.as_deref(), l.rooms.as_deref()))
            .take(limit)
            .collect()
    }

    fn within_radius(&self, origin: GeoPoint, listing: &ListingSummary, radius_km: f64) -> bool {
        listing
            .position
            .is_some_and(|p| self.geometry.distance_km(origin, p) <= radius_km)
    }
}

fn area_similar(reference: Option<f64>, candidate: Option<f64>) -> bool {
    match reference {
        // No reference area: the constraint does not apply
        None => true,
        Some(area) => candidate.is_some_and(|c| {
            c >= area * (1.0 - AREA_SIMILARITY_BAND) && c <= area * (1.0 + AREA_SIMILARITY_BAND)
        }),
    }
}

fn rooms_match(reference: Option<&str>, candidate: Option<&str>) -> bool {
    match reference {
        None => true,
        Some(rooms) => candidate == Some(rooms),
    }
}
