//! # Market Analytics
//!
//! Corpus-level analytics over listing projections.
//!
//! - `listing` - the `ListingSummary` projection and attribute filters
//! - `geo` - geometry primitives (bounding box, haversine distance)
//! - `query` - bounding-box fetch and radius similarity search
//! - `heatmap` - grid-aggregated, normalized price intensity
//! - `trend` - daily price trends and market overview
//!
//! Every operation reads an immutable snapshot slice; concurrent queries
//! over the same snapshot are independent.

pub mod geo;
pub mod heatmap;
pub mod listing;
pub mod query;
pub mod trend;

pub use geo::{BoundingBox, GeoPoint, Geometry, Haversine};
pub use heatmap::{heatmap, HeatmapCell};
pub use listing::{ListingFilter, ListingSummary};
pub use query::GeoQuery;
pub use trend::{
    cities, overview, room_distribution, trend, trend_at, CityCount, GroupStats,
    MarketOverview, RoomStats, TrendPoint,
};
