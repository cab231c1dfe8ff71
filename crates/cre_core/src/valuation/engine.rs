//! # Valuation Engine
//!
//! Dispatches a normalized feature record to exactly one pricing strategy,
//! chosen once at construction time: the trained model when its artifacts
//! load, the rule-based fallback otherwise. There is no per-call retry of
//! the load; a malformed artifact downgrades the engine for its lifetime.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::AnalyzerConfig;
use crate::features::{normalize, FeatureRecord, RawFeatures};
use crate::valuation::assessment::{classify, AssessmentLabel};
use crate::valuation::model::TrainedModel;
use crate::valuation::rules;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ValuationResult {
    /// Predicted fair price, rounded to the nearest whole currency unit.
    pub predicted_price: f64,
    /// Predicted price per m², 0 when area is non-positive.
    pub price_per_sqm: f64,
    /// In [0,1]; fixed per strategy, not a computed statistic.
    pub confidence: f64,
    /// 0 for the rule-based path, which performs no corpus lookup.
    pub comparable_count: u32,
}

enum Strategy {
    Trained(TrainedModel),
    RuleBased,
}

pub struct ValuationEngine {
    strategy: Strategy,
    model_confidence: f64,
    model_comparable_count: u32,
}

impl ValuationEngine {
    /// Build the engine, attempting the one-shot model load from
    /// `config.model_path`. Load failure is a configuration problem, not a
    /// caller-facing error: it is logged and the engine downgrades.
    pub fn new(config: &AnalyzerConfig) -> Self {
        let strategy = match TrainedModel::load(&config.model_path) {
            Ok(model) => {
                log::info!("Trained price model loaded from {}", config.model_path.display());
                Strategy::Trained(model)
            }
            Err(e) => {
                log::warn!("No usable trained model ({}), using rule-based fallback", e);
                Strategy::RuleBased
            }
        };

        Self {
            strategy,
            model_confidence: config.model_confidence,
            model_comparable_count: config.model_comparable_count,
        }
    }

    /// Force the rule-based strategy regardless of artifact availability.
    pub fn rule_based(config: &AnalyzerConfig) -> Self {
        Self {
            strategy: Strategy::RuleBased,
            model_confidence: config.model_confidence,
            model_comparable_count: config.model_comparable_count,
        }
    }

    pub fn model_loaded(&self) -> bool {
        matches!(self.strategy, Strategy::Trained(_))
    }

    /// Predict a fair price. Total over all feature records; neither
    /// strategy mutates shared state, so concurrent calls are safe.
    pub fn predict(&self, features: &FeatureRecord) -> ValuationResult {
        match &self.strategy {
            Strategy::Trained(model) => {
                let predicted_price = model.predict_log_price(features).exp();
                let price_per_sqm = if features.area_usable > 0.0 {
                    predicted_price / features.area_usable
                } else {
                    0.0
                };
                ValuationResult {
                    predicted_price: predicted_price.round(),
                    price_per_sqm: price_per_sqm.round(),
                    confidence: self.model_confidence,
                    comparable_count: self.model_comparable_count,
                }
            }
            Strategy::RuleBased => rules::predict(features),
        }
    }

    /// Normalize and predict in one step, for callers holding raw features.
    pub fn predict_raw(&self, raw: &RawFeatures) -> ValuationResult {
        self.predict(&normalize(raw))
    }

    /// Value and classify a batch of listings. Per-item failures (typically
    /// a missing observed price) are collected; the batch never aborts on a
    /// single item.
    pub fn valuate_batch(
        &self,
        items: &[BatchItem],
        config: &AnalyzerConfig,
    ) -> BatchOutcome {
        let results: Vec<std::result::Result<BatchAssessment, String>> = items
            .par_iter()
            .map(|item| self.valuate_item(item, config))
            .collect();

        let mut outcome = BatchOutcome::default();
        for result in results {
            match result {
                Ok(assessment) => {
                    outcome.updated_count += 1;
                    outcome.assessments.push(assessment);
                }
                Err(e) => {
                    outcome.failed_count += 1;
                    outcome.errors.push(e);
                }
            }
        }
        // Keep error payloads bounded
        outcome.errors.truncate(MAX_REPORTED_ERRORS);

        log::debug!(
            "Batch valuation: {} updated, {} failed",
            outcome.updated_count,
            outcome.failed_count
        );
        outcome
    }

    fn valuate_item(
        &self,
        item: &BatchItem,
        config: &AnalyzerConfig,
    ) -> std::result::Result<BatchAssessment, String> {
        let observed = item
            .observed_price
            .ok_or_else(|| format!("listing {} has no price", item.id))?;

        let result = self.predict_raw(&item.features);
        let (label, deviation_percent) = classify(
            observed,
            result.predicted_price,
            config.price_below_market_threshold,
            config.price_above_market_threshold,
        )
        .map_err(|e| format!("listing {}: {}", item.id, e))?;

        Ok(BatchAssessment {
            id: item.id,
            predicted_price: result.predicted_price,
            confidence: result.confidence,
            assessment: label,
            deviation_percent,
        })
    }
}

const MAX_REPORTED_ERRORS: usize = 10;

/// One listing in a batch valuation request.
#[derive(Debug, Clone, Deserialize)]
pub struct BatchItem {
    pub id: i64,
    pub features: RawFeatures,
    pub observed_price: Option<f64>,
}

/// Assessment produced for a successfully valued listing; the caller
/// persists these alongside the originating listings.
#[derive(Debug, Clone, Serialize)]
pub struct BatchAssessment {
    pub id: i64,
    pub predicted_price: f64,
    pub confidence: f64,
    pub assessment: AssessmentLabel,
    pub deviation_percent: f64,
}

#[derive(Debug, Default, Serialize)]
pub struct BatchOutcome {
    pub updated_count: usize,
    pub failed_count: usize,
    /// Capped at 10 entries to keep responses bounded.
    pub errors: Vec<String>,
    pub assessments: Vec<BatchAssessment>,
}
