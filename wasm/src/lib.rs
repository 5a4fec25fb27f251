//! WebAssembly module for the Rainfall Predictor
//!
//! Provides client-side computation for:
//! - Rule-based rainfall estimates while the form is being filled in
//! - Probability and description labels
//! - Form field validation before submission

use shared::{Coordinates, GeoError, GeoResult};
use wasm_bindgen::prelude::*;

// Re-export shared types for use in JavaScript
pub use shared::{PredictionResult, Season, WeatherDescription, WeatherObservation};

/// Base rainfall (mm) from the four weighted factors
#[wasm_bindgen]
pub fn rule_based_rainfall(humidity: f64, cloud_cover: f64, temperature: f64, pressure: f64) -> f64 {
    shared::rule_based_prediction(humidity, cloud_cover, temperature, pressure)
}

/// Probability of rain (percent) for a predicted amount
#[wasm_bindgen]
pub fn rain_probability(rainfall_mm: f64) -> u8 {
    shared::calculate_rain_probability(rainfall_mm)
}

/// Human-readable description of the expected weather
#[wasm_bindgen]
pub fn describe_weather(rainfall_mm: f64, humidity: f64, cloud_cover: f64) -> String {
    shared::weather_description(rainfall_mm, humidity, cloud_cover).to_string()
}

#[wasm_bindgen]
pub fn season_multiplier(season: &str) -> f64 {
    shared::season_multiplier(season)
}

/// Regional multiplier from location keywords alone
#[wasm_bindgen]
pub fn location_keyword_multiplier(location: &str) -> f64 {
    shared::keyword_multiplier(location)
}

/// Check a raw form value the way the server will
#[wasm_bindgen]
pub fn is_valid_numeric_field(raw: &str) -> bool {
    shared::parse_numeric_field("value", Some(raw)).is_ok()
}

/// Full prediction preview for an observation given as JSON
///
/// Coordinates are optional; without them the latitude band is neutral.
/// Returns the `PredictionResult` as JSON.
#[wasm_bindgen]
pub fn preview_prediction(
    observation_json: &str,
    latitude: Option<f64>,
    longitude: Option<f64>,
) -> Result<String, JsValue> {
    let observation: WeatherObservation = serde_json::from_str(observation_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid observation JSON: {}", e)))?;

    let breakdown = shared::forecast(&observation, &lookup(&observation.location, latitude, longitude));
    serde_json::to_string(&breakdown.result)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

fn lookup(location: &str, latitude: Option<f64>, longitude: Option<f64>) -> GeoResult {
    match (latitude, longitude) {
        (Some(lat), Some(lon)) => Ok(Coordinates::new(lat, lon)),
        _ => Err(GeoError::NotFound(location.to_string())),
    }
}
