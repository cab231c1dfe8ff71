//! # Analyzer Configuration
//!
//! Runtime options for the valuation engine and the analytics engines.
//! Everything has a sensible default so the core runs with no config file;
//! a JSON override can be supplied through `CRE_CONFIG_PATH`.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::{env, fs};

use crate::error::{CoreError, Result};

/// Environment variable naming a JSON config file to load at startup.
pub const CONFIG_PATH_ENV: &str = "CRE_CONFIG_PATH";

/// Lower bound for the trend window, in days.
pub const TREND_WINDOW_MIN_DAYS: i64 = 7;
/// Upper bound for the trend window, in days.
pub const TREND_WINDOW_MAX_DAYS: i64 = 365;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Directory holding the trained model artifacts
    /// (`price_model.json`, `encoder.json`, `scaler.json`).
    pub model_path: PathBuf,

    /// Deviation below which a listing is priced `below_market`.
    pub price_below_market_threshold: f64,

    /// Deviation above which a listing is priced `above_market`.
    pub price_above_market_threshold: f64,

    /// Angular grid cell size for the price heatmap, in degrees (~1km at 0.01).
    pub heatmap_grid_size: f64,

    /// Default trailing window for price trends, in days.
    pub trend_window_days: i64,

    /// Confidence reported by the trained-model strategy. A fixed constant
    /// rather than a computed statistic; see the valuation engine docs.
    pub model_confidence: f64,

    /// Comparable-listings count reported by the trained-model strategy.
    /// Placeholder until a real corpus lookup is wired in.
    pub model_comparable_count: u32,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from("./ml/models"),
            price_below_market_threshold: -0.10,
            price_above_market_threshold: 0.10,
            heatmap_grid_size: 0.01,
            trend_window_days: 90,
            model_confidence: 0.85,
            model_comparable_count: 50,
        }
    }
}

impl AnalyzerConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: AnalyzerConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load config from the file named by `CRE_CONFIG_PATH`, or defaults
    /// when the variable is unset or empty.
    pub fn from_env() -> Result<Self> {
        let Ok(path) = env::var(CONFIG_PATH_ENV) else {
            return Ok(Self::default());
        };

        let path = path.trim();
        if path.is_empty() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| {
            CoreError::InvalidParameter(format!(
                "failed to read config from {CONFIG_PATH_ENV}='{path}': {e}"
            ))
        })?;

        let config = Self::from_json(&content)?;
        log::info!("Loaded analyzer config from {}", path);
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.price_below_market_threshold >= self.price_above_market_threshold {
            return Err(CoreError::InvalidParameter(format!(
                "below threshold ({}) must be less than above threshold ({})",
                self.price_below_market_threshold, self.price_above_market_threshold
            )));
        }
        if self.heatmap_grid_size <= 0.0 {
            return Err(CoreError::InvalidParameter(format!(
                "heatmap grid size must be positive, got {}",
                self.heatmap_grid_size
            )));
        }
        if !(TREND_WINDOW_MIN_DAYS..=TREND_WINDOW_MAX_DAYS).contains(&self.trend_window_days) {
            return Err(CoreError::InvalidParameter(format!(
                "trend window must be {}..={} days, got {}",
                TREND_WINDOW_MIN_DAYS, TREND_WINDOW_MAX_DAYS, self.trend_window_days
            )));
        }
        if !(0.0..=1.0).contains(&self.model_confidence) {
            return Err(CoreError::InvalidParameter(format!(
                "model confidence must be in [0,1], got {}",
                self.model_confidence
            )));
        }
        Ok(())
    }
}
