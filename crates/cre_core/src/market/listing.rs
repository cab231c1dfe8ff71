use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::market::geo::GeoPoint;
use crate::valuation::AssessmentLabel;

/// Read-only projection of a listing, as the analytics engines need it.
/// Listings are owned by the ingestion collaborator; the core never mutates
/// them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingSummary {
    pub id: i64,
    pub position: Option<GeoPoint>,
    pub price: Option<f64>,
    pub price_per_sqm: Option<f64>,
    pub assessment: Option<AssessmentLabel>,
    /// e.g. "apartment", "house"
    pub property_type: Option<String>,
    /// e.g. "sale", "rent"
    pub transaction_type: Option<String>,
    /// Room layout descriptor, e.g. "2+kk"
    pub rooms: Option<String>,
    pub area_usable: Option<f64>,
    pub city: Option<String>,
    pub captured_at: DateTime<Utc>,
    pub is_active: bool,
}

/// Attribute filters for map queries. All optional; an empty filter
/// matches every active listing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListingFilter {
    pub property_type: Option<String>,
    pub transaction_type: Option<String>,
    pub price_min: Option<f64>,
    pub price_max: Option<f64>,
    pub assessment: Option<AssessmentLabel>,
}

impl ListingFilter {
    pub fn matches(&self, listing: &ListingSummary) -> bool {
        if let Some(kind) = &self.property_type {
            if listing.property_type.as_deref() != Some(kind.as_str()) {
                return false;
            }
        }
        if let Some(transaction) = &self.transaction_type {
            if listing.transaction_type.as_deref() != Some(transaction.as_str()) {
                return false;
            }
        }
        if let Some(min) = self.price_min {
            if !listing.price.is_some_and(|p| p >= min) {
                return false;
            }
        }
        if let Some(max) = self.price_max {
            if !listing.price.is_some_and(|p| p <= max) {
                return false;
            }
        }
        if let Some(assessment) = self.assessment {
            if listing.assessment != Some(assessment) {
                return false;
            }
        }
        true
    }
}

/// Case-insensitive substring match, the city-filter convention shared by
/// trends, heatmap, and room distribution.
pub(crate) fn city_matches(listing_city: Option<&str>, filter: &str) -> bool {
    listing_city
        .map(|c| c.to_lowercase().contains(&filter.to_lowercase()))
        .unwrap_or(false)
}
