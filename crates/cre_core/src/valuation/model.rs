//! # Trained Model Artifacts
//!
//! The offline training job exports three co-located JSON artifacts:
//!
//! - `price_model.json` — linear weights + intercept over the log-price target
//! - `encoder.json` — per-feature category vocabularies for one-hot encoding
//! - `scaler.json` — per-numeric-feature mean and standard deviation
//!
//! [`TrainedModel::load`] reads all three and cross-checks that the weight
//! vector length matches the encoded input width. Any missing or malformed
//! artifact fails the load as a whole; the engine then falls back to the
//! rule-based strategy.

use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::error::{CoreError, Result};
use crate::features::FeatureRecord;

pub const MODEL_FILE: &str = "price_model.json";
pub const ENCODER_FILE: &str = "encoder.json";
pub const SCALER_FILE: &str = "scaler.json";

const NUMERIC_FEATURE_COUNT: usize = 5;
const BOOLEAN_FEATURE_COUNT: usize = 5;

#[derive(Debug, Clone, Deserialize)]
struct ModelArtifact {
    intercept: f64,
    weights: Vec<f64>,
}

/// One categorical feature's fitted vocabulary. Categories not present in
/// the vocabulary encode to the all-zero row, mirroring an encoder fit with
/// unknown-handling enabled: inference never fails on an unseen category.
#[derive(Debug, Clone, Deserialize)]
pub struct EncoderFeature {
    pub name: String,
    pub categories: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct EncoderArtifact {
    features: Vec<EncoderFeature>,
}

#[derive(Debug, Clone, Deserialize)]
struct ScalerArtifact {
    means: Vec<f64>,
    stds: Vec<f64>,
}

/// A loaded, validated model. Read-only after construction, so concurrent
/// `predict_log_price` calls need no locking.
#[derive(Debug, Clone)]
pub struct TrainedModel {
    intercept: f64,
    weights: Vec<f64>,
    encoder: Vec<EncoderFeature>,
    means: Vec<f64>,
    stds: Vec<f64>,
}

impl TrainedModel {
    /// Load the artifact trio from `dir`. Returns an error if any file is
    /// absent, unparsable, or dimensionally inconsistent.
    pub fn load(dir: &Path) -> Result<Self> {
        let model: ModelArtifact = read_artifact(&dir.join(MODEL_FILE))?;
        let encoder: EncoderArtifact = read_artifact(&dir.join(ENCODER_FILE))?;
        let scaler: ScalerArtifact = read_artifact(&dir.join(SCALER_FILE))?;

        if scaler.means.len() != NUMERIC_FEATURE_COUNT
            || scaler.stds.len() != NUMERIC_FEATURE_COUNT
        {
            return Err(CoreError::Artifact(format!(
                "scaler expects {} numeric features, got means={} stds={}",
                NUMERIC_FEATURE_COUNT,
                scaler.means.len(),
                scaler.stds.len()
            )));
        }
        if scaler.stds.iter().any(|&s| s <= 0.0) {
            return Err(CoreError::Artifact("scaler has non-positive std".to_string()));
        }

        let one_hot_width: usize = encoder.features.iter().map(|f| f.categories.len()).sum();
        let expected = NUMERIC_FEATURE_COUNT + one_hot_width + BOOLEAN_FEATURE_COUNT;
        if model.weights.len() != expected {
            return Err(CoreError::Artifact(format!(
                "weight vector length {} does not match input width {} \
                 ({} numeric + {} one-hot + {} boolean)",
                model.weights.len(),
                expected,
                NUMERIC_FEATURE_COUNT,
                one_hot_width,
                BOOLEAN_FEATURE_COUNT
            )));
        }

        Ok(Self {
            intercept: model.intercept,
            weights: model.weights,
            encoder: encoder.features,
            means: scaler.means,
            stds: scaler.stds,
        })
    }

    /// Encode a feature record into the model's input vector: scaled
    /// numerics, then one-hot categoricals in artifact order, then amenity
    /// flags as 0/1.
    fn encode(&self, features: &FeatureRecord) -> Vec<f64> {
        let mut input = Vec::with_capacity(self.weights.len());

        for (i, value) in features.numeric_values().iter().enumerate() {
            input.push((value - self.means[i]) / self.stds[i]);
        }

        let categorical = features.categorical_values();
        for (i, feature) in self.encoder.iter().enumerate() {
            // Artifact order beyond the known five encodes as all-unknown.
            let value = categorical.get(i).copied().unwrap_or("");
            for category in &feature.categories {
                input.push(if category == value { 1.0 } else { 0.0 });
            }
        }

        for flag in features.boolean_values() {
            input.push(if flag { 1.0 } else { 0.0 });
        }

        input
    }

    /// Model output is log(price); the engine exponentiates.
    pub fn predict_log_price(&self, features: &FeatureRecord) -> f64 {
        let input = self.encode(features);
        self.intercept
            + input.iter().zip(self.weights.iter()).map(|(x, w)| x * w).sum::<f64>()
    }
}

fn read_artifact<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let content = fs::read_to_string(path)
        .map_err(|e| CoreError::Artifact(format!("{}: {}", path.display(), e)))?;
    serde_json::from_str(&content)
        .map_err(|e| CoreError::Artifact(format!("{}: {}", path.display(), e)))
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::features::{normalize, RawFeatures};
    use std::fs;

    /// Minimal consistent artifact set: one category per categorical
    /// feature, so input width is 5 + 5 + 5.
    pub(crate) fn write_test_artifacts(dir: &Path) {
        let weights: Vec<f64> = vec![0.0; 15];
        fs::write(
            dir.join(MODEL_FILE),
            serde_json::json!({ "intercept": 15.0, "weights": weights }).to_string(),
        )
        .unwrap();
        fs::write(
            dir.join(ENCODER_FILE),
            serde_json::json!({ "features": [
                { "name": "property_type", "categories": ["apartment"] },
                { "name": "condition", "categories": ["good"] },
                { "name": "construction_type", "categories": ["brick"] },
                { "name": "energy_rating", "categories": ["C"] },
                { "name": "city", "categories": ["Praha"] },
            ]})
            .to_string(),
        )
        .unwrap();
        fs::write(
            dir.join(SCALER_FILE),
            serde_json::json!({
                "means": [60.0, 2.0, 2.0, 5.0, 5.0],
                "stds": [1.0, 1.0, 1.0, 1.0, 1.0],
            })
            .to_string(),
        )
        .unwrap();
    }

    #[test]
    fn load_and_predict_from_artifacts() {
        let dir = tempfile::tempdir().unwrap();
        write_test_artifacts(dir.path());

        let model = TrainedModel::load(dir.path()).unwrap();
        let features = normalize(&RawFeatures::default());
        // All-zero weights: prediction is the intercept.
        assert_eq!(model.predict_log_price(&features), 15.0);
    }

    #[test]
    fn missing_artifact_fails_load() {
        let dir = tempfile::tempdir().unwrap();
        write_test_artifacts(dir.path());
        fs::remove_file(dir.path().join(SCALER_FILE)).unwrap();
        assert!(TrainedModel::load(dir.path()).is_err());
    }

    #[test]
    fn weight_length_mismatch_fails_load() {
        let dir = tempfile::tempdir().unwrap();
        write_test_artifacts(dir.path());
        fs::write(
            dir.path().join(MODEL_FILE),
            serde_json::json!({ "intercept": 15.0, "weights": [0.0, 0.0] }).to_string(),
        )
        .unwrap();
        assert!(TrainedModel::load(dir.path()).is_err());
    }

    #[test]
    fn unknown_category_encodes_to_zero_row() {
        let dir = tempfile::tempdir().unwrap();
        write_test_artifacts(dir.path());
        let model = TrainedModel::load(dir.path()).unwrap();

        let known = normalize(&RawFeatures::default());
        let unknown = normalize(&RawFeatures {
            city: Some("Atlantis".to_string()),
            ..Default::default()
        });

        let known_input = model.encode(&known);
        let unknown_input = model.encode(&unknown);
        // City is the last one-hot slot (index 5 + 4 = 9)
        assert_eq!(known_input[9], 1.0);
        assert_eq!(unknown_input[9], 0.0);
    }
}
