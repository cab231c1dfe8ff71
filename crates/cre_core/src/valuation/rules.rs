//! # Rule-Based Valuation Strategy
//!
//! Deterministic fallback pricer used when no trained model is available.
//! Anchored on an average Praha apartment price per m² and adjusted by a
//! fixed chain of multipliers. No corpus lookup, no statistical backing:
//! confidence is reported accordingly by the engine.

use once_cell::sync::Lazy;
use std::collections::HashMap;

use crate::features::FeatureRecord;
use crate::valuation::ValuationResult;

/// Base price per m² for the reference market (Praha apartments, CZK).
pub const BASE_PRICE_PER_SQM: f64 = 120_000.0;

/// Confidence reported for rule-based predictions. Deliberately lower than
/// the trained path: nothing validates these multipliers statistically.
pub const RULE_BASED_CONFIDENCE: f64 = 0.60;

/// Approximate price levels of major Czech cities relative to Praha.
static CITY_MULTIPLIERS: Lazy<HashMap<&'static str, f64>> = Lazy::new(|| {
    HashMap::from([("Praha", 1.0), ("Brno", 0.65), ("Ostrava", 0.45), ("Plzeň", 0.55)])
});

const DEFAULT_CITY_MULTIPLIER: f64 = 0.5;

pub fn city_multiplier(city: &str) -> f64 {
    CITY_MULTIPLIERS.get(city).copied().unwrap_or(DEFAULT_CITY_MULTIPLIER)
}

fn property_type_multiplier(property_type: &str) -> f64 {
    if property_type == "apartment" {
        1.0
    } else {
        0.85
    }
}

fn condition_multiplier(condition: &str) -> f64 {
    match condition {
        "new" => 1.15,
        "renovated" => 1.05,
        "good" => 1.0,
        "original" => 0.85,
        "to_renovate" => 0.70,
        _ => 1.0,
    }
}

// Smaller units command a higher price per m².
fn rooms_multiplier(rooms_count: f64) -> f64 {
    if rooms_count <= 1.0 {
        1.10
    } else if rooms_count >= 4.0 {
        0.95
    } else {
        1.0
    }
}

fn floor_multiplier(floor: i32, floors_total: i32) -> f64 {
    if floor == 0 {
        0.95
    } else if floors_total > 0 && floor == floors_total {
        1.02
    } else {
        1.0
    }
}

fn distance_multiplier(distance_km: f64) -> f64 {
    if distance_km < 2.0 {
        1.15
    } else if distance_km < 5.0 {
        1.05
    } else if distance_km > 10.0 {
        0.90
    } else {
        1.0
    }
}

fn amenity_bonus(features: &FeatureRecord) -> f64 {
    let mut bonus = 0.0;
    if features.has_balcony {
        bonus += 0.02;
    }
    if features.has_terrace {
        bonus += 0.04;
    }
    if features.has_parking {
        bonus += 0.03;
    }
    if features.has_elevator {
        bonus += 0.01;
    }
    if features.has_cellar {
        bonus += 0.01;
    }
    bonus
}

/// Price a property from the multiplier chain. Total over its domain: the
/// normalizer guarantees every field is populated, so this never fails.
pub fn predict(features: &FeatureRecord) -> ValuationResult {
    let price_per_sqm = BASE_PRICE_PER_SQM
        * city_multiplier(&features.city)
        * property_type_multiplier(&features.property_type)
        * condition_multiplier(&features.condition)
        * rooms_multiplier(features.rooms_count)
        * floor_multiplier(features.floor, features.floors_total)
        * distance_multiplier(features.distance_to_center)
        * (1.0 + amenity_bonus(features));

    let predicted_price = price_per_sqm * features.area_usable;

    ValuationResult {
        predicted_price: predicted_price.round(),
        price_per_sqm: price_per_sqm.round(),
        confidence: RULE_BASED_CONFIDENCE,
        comparable_count: 0,
    }
}
