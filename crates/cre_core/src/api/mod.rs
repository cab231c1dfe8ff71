pub mod json_api;


pub use json_api::{
    batch_valuate_json, predict_json, BatchValuationRequest, BatchValuationResponse,
    PredictionResponse,
};
