//! # cre_core - Real Estate Valuation & Market Analytics Core
//!
//! Computational core of the Czech real-estate analyzer: fair-price
//! estimation for individual listings and market-level analytics over a
//! listing corpus.
//!
//! ## Features
//! - Trained-model or rule-based price prediction with one-shot fallback
//! - Below/at/above market classification with configurable thresholds
//! - Bounding-box and radius similarity queries over listing snapshots
//! - Normalized price heatmaps and daily price trends
//!
//! HTTP routing, persistence, and scraping ingestion are external
//! collaborators; this crate only consumes their projections.

pub mod api;
pub mod config;
pub mod error;
pub mod features;
pub mod market;
pub mod valuation;

pub use api::{batch_valuate_json, predict_json};
pub use config::AnalyzerConfig;
pub use error::{CoreError, Result};
pub use features::{normalize, FeatureRecord, RawFeatures};
pub use market::{
    cities, heatmap, overview, room_distribution, trend, BoundingBox, GeoPoint, GeoQuery,
    HeatmapCell, ListingFilter, ListingSummary, MarketOverview, TrendPoint,
};
pub use valuation::{
    classify, AssessmentLabel, BatchItem, BatchOutcome, ValuationEngine, ValuationResult,
};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    /// Valuation chain end to end: normalize, predict, classify.
    #[test]
    fn valuation_pipeline_praha_reference() {
        let config = AnalyzerConfig::default();
        let engine = ValuationEngine::rule_based(&config);

        let raw: RawFeatures = serde_json::from_str(
            r#"{
                "area_usable": 60.0,
                "rooms_count": 2.0,
                "city": "Praha",
                "condition": "good",
                "floor": 2,
                "floors_total": 5,
                "distance_to_center": 5.0
            }"#,
        )
        .unwrap();

        let result = engine.predict(&normalize(&raw));
        assert_eq!(result.predicted_price, 7_560_000.0);

        let (label, deviation) = classify(
            9_000_000.0,
            result.predicted_price,
            config.price_below_market_threshold,
            config.price_above_market_threshold,
        )
        .unwrap();
        assert_eq!(label, AssessmentLabel::AboveMarket);
        assert!((deviation - 19.0476).abs() < 1e-3);
    }

    #[test]
    fn predict_is_safe_to_call_concurrently() {
        use std::sync::Arc;
        use std::thread;

        let engine = Arc::new(ValuationEngine::rule_based(&AnalyzerConfig::default()));
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let engine = Arc::clone(&engine);
                thread::spawn(move || {
                    let raw = RawFeatures {
                        area_usable: Some(40.0 + i as f64 * 10.0),
                        ..Default::default()
                    };
                    engine.predict_raw(&raw).predicted_price
                })
            })
            .collect();

        for handle in handles {
            assert!(handle.join().unwrap() > 0.0);
        }
    }
}
