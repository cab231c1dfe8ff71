//! # Feature Normalization
//!
//! Turns a sparse, partially-populated feature map into the canonical
//! [`FeatureRecord`] the valuation engine consumes. Normalization is total:
//! every missing field takes a documented default, so no downstream code
//! ever sees an unset field.

mod record;

pub use record::{defaults, normalize, FeatureRecord, RawFeatures};
