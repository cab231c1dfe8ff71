//! # JSON API
//!
//! String-in/string-out entry points for a transport layer (HTTP, RPC, FFI)
//! to wrap. The core mandates no wire format beyond these JSON value
//! contracts.

use serde::Serialize;

use crate::config::AnalyzerConfig;
use crate::error::Result;
use crate::features::RawFeatures;
use crate::valuation::{BatchItem, ValuationEngine};

#[derive(Debug, Serialize)]
pub struct PredictionResponse {
    pub predicted_price: f64,
    pub confidence: f64,
    pub price_per_sqm: f64,
    pub comparable_properties: u32,
}

/// Request body for [`batch_valuate_json`].
#[derive(Debug, serde::Deserialize)]
pub struct BatchValuationRequest {
    pub items: Vec<BatchItem>,
}

pub type BatchValuationResponse = crate::valuation::BatchOutcome;

/// Value a single property from a JSON feature map. Sparse input is fine;
/// only malformed JSON fails.
pub fn predict_json(engine: &ValuationEngine, request: &str) -> Result<String> {
    let raw: RawFeatures = serde_json::from_str(request)?;
    let result = engine.predict_raw(&raw);

    let response = PredictionResponse {
        predicted_price: result.predicted_price,
        confidence: result.confidence,
        price_per_sqm: result.price_per_sqm,
        comparable_properties: result.comparable_count,
    };
    Ok(serde_json::to_string(&response)?)
}

/// Value and classify a batch of listings. Per-item failures are reported
/// inside the response; only a malformed request fails the call itself.
pub fn batch_valuate_json(
    engine: &ValuationEngine,
    config: &AnalyzerConfig,
    request: &str,
) -> Result<String> {
    let request: BatchValuationRequest = serde_json::from_str(request)?;
    let outcome = engine.valuate_batch(&request.items, config);
    Ok(serde_json::to_string(&outcome)?)
}
