//! # Valuation
//!
//! Fair-price estimation and asking-price classification.
//!
//! - `engine` - strategy dispatch, single and batch prediction
//! - `model` - trained model artifact loading and inference
//! - `rules` - deterministic rule-based fallback
//! - `assessment` - below/at/above market classification

pub mod assessment;
pub mod engine;
pub mod model;
pub mod rules;

pub use assessment::{classify, AssessmentLabel};
pub use engine::{BatchAssessment, BatchItem, BatchOutcome, ValuationEngine, ValuationResult};
pub use model::TrainedModel;
