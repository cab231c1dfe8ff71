use serde::{Deserialize, Serialize};

/// Static defaults for every feature field. Derived from Czech market
/// medians; a fully-defaulted record describes a typical Praha apartment.
pub mod defaults {
    pub const AREA_USABLE: f64 = 60.0;
    pub const ROOMS_COUNT: f64 = 2.0;
    pub const FLOOR: i32 = 2;
    pub const FLOORS_TOTAL: i32 = 5;
    pub const DISTANCE_TO_CENTER: f64 = 5.0;

    pub const PROPERTY_TYPE: &str = "apartment";
    pub const CONDITION: &str = "good";
    pub const CONSTRUCTION_TYPE: &str = "brick";
    pub const ENERGY_RATING: &str = "C";
    pub const CITY: &str = "Praha";
}

/// Sparse input to valuation: every field optional. Deserializes from the
/// feature map a caller assembles out of a listing, tolerating absent and
/// extra keys alike.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawFeatures {
    pub area_usable: Option<f64>,
    /// May be fractional: "2+kk" layouts are commonly stored as 2.5.
    pub rooms_count: Option<f64>,
    pub floor: Option<i32>,
    pub floors_total: Option<i32>,
    pub distance_to_center: Option<f64>,

    pub property_type: Option<String>,
    pub condition: Option<String>,
    pub construction_type: Option<String>,
    pub energy_rating: Option<String>,
    pub city: Option<String>,

    pub has_balcony: Option<bool>,
    pub has_terrace: Option<bool>,
    pub has_parking: Option<bool>,
    pub has_elevator: Option<bool>,
    pub has_cellar: Option<bool>,
}

/// Canonical, fully-populated feature record. Constructed only through
/// [`normalize`], so every field is guaranteed set.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FeatureRecord {
    pub area_usable: f64,
    pub rooms_count: f64,
    pub floor: i32,
    pub floors_total: i32,
    pub distance_to_center: f64,

    pub property_type: String,
    pub condition: String,
    pub construction_type: String,
    pub energy_rating: String,
    pub city: String,

    pub has_balcony: bool,
    pub has_terrace: bool,
    pub has_parking: bool,
    pub has_elevator: bool,
    pub has_cellar: bool,
}

impl Default for FeatureRecord {
    fn default() -> Self {
        normalize(&RawFeatures::default())
    }
}

impl FeatureRecord {
    /// Numeric fields in the order the trained model expects them.
    pub fn numeric_values(&self) -> [f64; 5] {
        [
            self.area_usable,
            self.rooms_count,
            self.floor as f64,
            self.floors_total as f64,
            self.distance_to_center,
        ]
    }

    /// Categorical fields in the order the trained model expects them.
    pub fn categorical_values(&self) -> [&str; 5] {
        [
            &self.property_type,
            &self.condition,
            &self.construction_type,
            &self.energy_rating,
            &self.city,
        ]
    }

    /// Amenity flags in the order the trained model expects them.
    pub fn boolean_values(&self) -> [bool; 5] {
        [
            self.has_balcony,
            self.has_terrace,
            self.has_parking,
            self.has_elevator,
            self.has_cellar,
        ]
    }
}

/// Fill missing fields with defaults. Pure and infallible: a completely
/// empty input is a normal case and yields the all-default record.
pub fn normalize(raw: &RawFeatures) -> FeatureRecord {
    FeatureRecord {
        area_usable: raw.area_usable.unwrap_or(defaults::AREA_USABLE),
        rooms_count: raw.rooms_count.unwrap_or(defaults::ROOMS_COUNT),
        floor: raw.floor.unwrap_or(defaults::FLOOR),
        floors_total: raw.floors_total.unwrap_or(defaults::FLOORS_TOTAL),
        distance_to_center: raw.distance_to_center.unwrap_or(defaults::DISTANCE_TO_CENTER),

        property_type: non_empty_or(raw.property_type.as_deref(), defaults::PROPERTY_TYPE),
        condition: non_empty_or(raw.condition.as_deref(), defaults::CONDITION),
        construction_type: non_empty_or(
            raw.construction_type.as_deref(),
            defaults::CONSTRUCTION_TYPE,
        ),
        energy_rating: non_empty_or(raw.energy_rating.as_deref(), defaults::ENERGY_RATING),
        city: non_empty_or(raw.city.as_deref(), defaults::CITY),

        has_balcony: raw.has_balcony.unwrap_or(false),
        has_terrace: raw.has_terrace.unwrap_or(false),
        has_parking: raw.has_parking.unwrap_or(false),
        has_elevator: raw.has_elevator.unwrap_or(false),
        has_cellar: raw.has_cellar.unwrap_or(false),
    }
}

// Empty categorical strings count as absent.
fn non_empty_or(value: Option<&str>, default: &str) -> String {
    match value {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => default.to_string(),
    }
}
