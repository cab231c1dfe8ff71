//! # Price Assessment
//!
//! Classifies an observed asking price against a predicted fair price into
//! a three-way market-position label. Pure arithmetic; the caller decides
//! what to do with the result.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{CoreError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssessmentLabel {
    BelowMarket,
    AtMarket,
    AboveMarket,
}

impl fmt::Display for AssessmentLabel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match self {
            AssessmentLabel::BelowMarket => "below_market",
            AssessmentLabel::AtMarket => "at_market",
            AssessmentLabel::AboveMarket => "above_market",
        };
        write!(f, "{}", s)
    }
}

/// Classify `observed_price` against `predicted_price`.
///
/// `deviation = (observed - predicted) / predicted`; below `lower_threshold`
/// the listing is priced below market, above `upper_threshold` above market,
/// otherwise at market. Returns the label and the deviation in percent.
///
/// Fails only when `predicted_price` is zero, where deviation is undefined.
pub fn classify(
    observed_price: f64,
    predicted_price: f64,
    lower_threshold: f64,
    upper_threshold: f64,
) -> Result<(AssessmentLabel, f64)> {
    if predicted_price == 0.0 {
        return Err(CoreError::InvalidParameter(
            "predicted price is zero, deviation undefined".to_string(),
        ));
    }

    let deviation = (observed_price - predicted_price) / predicted_price;

    let label = if deviation < lower_threshold {
        AssessmentLabel::BelowMarket
    } else if deviation > upper_threshold {
        AssessmentLabel::AboveMarket
    } else {
        AssessmentLabel::AtMarket
    };

    Ok((label, deviation * 100.0))
}
