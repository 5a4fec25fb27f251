//! Prediction orchestration
//!
//! `final = rule_based(humidity, cloud, temperature, pressure)
//!          * season_multiplier * location_multiplier`, clamped and rounded.
//! Wind speed and time of day are carried on the observation but do not take
//! part in the computation.

use serde::Serialize;

use crate::climate::{location_adjustment, LocationAdjustment};
use crate::models::{clamp_and_round, PredictionResult, Season, WeatherObservation};
use crate::rules::rule_based_prediction;
use crate::types::GeoResult;

/// Season multiplier by label, case-insensitive, 1.0 for unknown labels
pub fn season_multiplier(season: &str) -> f64 {
    season
        .parse::<Season>()
        .map(|s| s.multiplier())
        .unwrap_or(1.0)
}

/// Final prediction together with the factors that produced it
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct ForecastBreakdown {
    pub base_mm: f64,
    pub season_multiplier: f64,
    pub location: LocationAdjustment,
    pub result: PredictionResult,
}

/// Run the full rule-based pipeline for one observation
///
/// `lookup` is the geocoding outcome for `observation.location`; a failed
/// lookup only neutralises the latitude component.
pub fn forecast(observation: &WeatherObservation, lookup: &GeoResult) -> ForecastBreakdown {
    let base_mm = rule_based_prediction(
        observation.humidity,
        observation.cloud_cover,
        observation.temperature,
        observation.pressure,
    );
    let season_multiplier = observation.season_multiplier();
    let location = location_adjustment(&observation.location, lookup);

    let rainfall_mm = clamp_and_round(base_mm * season_multiplier * location.multiplier());

    ForecastBreakdown {
        base_mm,
        season_multiplier,
        location,
        result: PredictionResult::from_rainfall(
            rainfall_mm,
            observation.humidity,
            observation.cloud_cover,
        ),
    }
}

/// Final rainfall in mm, never negative, rounded to two decimals
pub fn predict_rainfall(observation: &WeatherObservation, lookup: &GeoResult) -> f64 {
    forecast(observation, lookup).result.rainfall_mm
}
