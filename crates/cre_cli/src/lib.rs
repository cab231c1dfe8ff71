//! # CLI Library
//!
//! File-based front-end over the core: read feature maps and listing
//! corpus snapshots from JSON files, run the requested operation, return
//! the result as a JSON string for the binary to print.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use cre_core::market::{self, BoundingBox, GeoQuery, ListingFilter, ListingSummary};
use cre_core::{AnalyzerConfig, ValuationEngine};

/// Load a listing corpus snapshot from a JSON array file.
pub fn load_listings(path: &Path) -> Result<Vec<ListingSummary>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read listings from {}", path.display()))?;
    let listings: Vec<ListingSummary> = serde_json::from_str(&content)
        .with_context(|| format!("failed to parse listings from {}", path.display()))?;
    log::info!("Loaded {} listings from {}", listings.len(), path.display());
    Ok(listings)
}

pub fn run_predict(engine: &ValuationEngine, features_path: &Path) -> Result<String> {
    let request = fs::read_to_string(features_path)
        .with_context(|| format!("failed to read features from {}", features_path.display()))?;
    Ok(cre_core::predict_json(engine, &request)?)
}

pub fn run_batch(
    engine: &ValuationEngine,
    config: &AnalyzerConfig,
    batch_path: &Path,
) -> Result<String> {
    let request = fs::read_to_string(batch_path)
        .with_context(|| format!("failed to read batch from {}", batch_path.display()))?;
    Ok(cre_core::batch_valuate_json(engine, config, &request)?)
}

pub fn run_overview(listings: &[ListingSummary]) -> Result<String> {
    Ok(serde_json::to_string_pretty(&market::overview(listings))?)
}

pub fn run_trend(
    listings: &[ListingSummary],
    city: Option<&str>,
    property_type: Option<&str>,
    window_days: i64,
) -> Result<String> {
    let points = market::trend(listings, city, property_type, window_days)?;
    Ok(serde_json::to_string_pretty(&points)?)
}

pub fn run_heatmap(
    listings: &[ListingSummary],
    city: Option<&str>,
    grid_size: f64,
) -> Result<String> {
    let cells = market::heatmap(listings, city, grid_size);
    Ok(serde_json::to_string_pretty(&cells)?)
}

pub fn run_similar(
    listings: &[ListingSummary],
    reference_id: i64,
    radius_km: f64,
    limit: usize,
) -> Result<String> {
    let hits = GeoQuery::default().radius_search(listings, reference_id, radius_km, limit);
    Ok(serde_json::to_string_pretty(&hits)?)
}

pub fn run_bbox(
    listings: &[ListingSummary],
    bounds: BoundingBox,
    filter: &ListingFilter,
    limit: usize,
) -> Result<String> {
    let hits = GeoQuery::default().bbox_fetch(listings, &bounds, filter, limit);
    Ok(serde_json::to_string_pretty(&hits)?)
}
