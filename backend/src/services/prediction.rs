//! Prediction service: geocodes the location and runs the rule-based pipeline

use shared::{
    forecast, location_adjustment, ForecastBreakdown, GeoError, GeoResult, LocationAdjustment,
    WeatherObservation,
};
use std::sync::Arc;

use crate::external::Geocoder;

/// Rainfall prediction orchestrator
#[derive(Clone)]
pub struct PredictionService {
    geocoder: Arc<dyn Geocoder>,
}

impl PredictionService {
    pub fn new(geocoder: Arc<dyn Geocoder>) -> Self {
        Self { geocoder }
    }

    /// Geocode a location name; failures are logged and returned, never raised
    pub async fn lookup(&self, location: &str) -> GeoResult {
        if location.trim().is_empty() {
            return Err(GeoError::NotFound(String::new()));
        }
        let result = self.geocoder.locate(location).await;
        match &result {
            Ok(coords) => tracing::debug!(
                location,
                latitude = coords.latitude,
                longitude = coords.longitude,
                "Geocoded location"
            ),
            Err(err) => tracing::debug!(location, "Geocoding failed, using neutral climate factor: {}", err),
        }
        result
    }

    /// Combined latitude-band and keyword multiplier for a location
    pub async fn climate_factor(&self, location: &str) -> LocationAdjustment {
        let lookup = self.lookup(location).await;
        location_adjustment(location, &lookup)
    }

    /// Full prediction with its contributing factors
    pub async fn forecast(&self, observation: &WeatherObservation) -> ForecastBreakdown {
        let lookup = self.lookup(&observation.location).await;
        let breakdown = forecast(observation, &lookup);

        tracing::info!(
            location = %observation.location,
            season = %observation.season,
            base_mm = breakdown.base_mm,
            multiplier = breakdown.season_multiplier * breakdown.location.multiplier(),
            rainfall_mm = breakdown.result.rainfall_mm,
            probability = breakdown.result.probability_pct,
            "Rainfall predicted"
        );

        breakdown
    }

    /// Final rainfall in mm
    pub async fn predict_rainfall(&self, observation: &WeatherObservation) -> f64 {
        self.forecast(observation).await.result.rainfall_mm
    }
}
