//! Prediction result models and the probability/description mappings

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome of a single rainfall prediction
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct PredictionResult {
    pub rainfall_mm: f64,
    pub probability_pct: u8,
    pub description: WeatherDescription,
}

impl PredictionResult {
    /// Derive probability and description from a final rainfall amount
    pub fn from_rainfall(rainfall_mm: f64, humidity: f64, cloud_cover: f64) -> Self {
        Self {
            rainfall_mm,
            probability_pct: calculate_rain_probability(rainfall_mm),
            description: weather_description(rainfall_mm, humidity, cloud_cover),
        }
    }
}

/// Human-readable summary of expected conditions
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum WeatherDescription {
    #[serde(rename = "Clear skies")]
    ClearSkies,
    #[serde(rename = "Partly cloudy")]
    PartlyCloudy,
    #[serde(rename = "Cloudy but no rain expected")]
    CloudyNoRain,
    #[serde(rename = "Light drizzle possible")]
    LightDrizzle,
    #[serde(rename = "Light rain expected")]
    LightRain,
    #[serde(rename = "Moderate rain expected")]
    ModerateRain,
    #[serde(rename = "Heavy rain expected")]
    HeavyRain,
}

impl WeatherDescription {
    pub fn as_str(&self) -> &'static str {
        match self {
            WeatherDescription::ClearSkies => "Clear skies",
            WeatherDescription::PartlyCloudy => "Partly cloudy",
            WeatherDescription::CloudyNoRain => "Cloudy but no rain expected",
            WeatherDescription::LightDrizzle => "Light drizzle possible",
            WeatherDescription::LightRain => "Light rain expected",
            WeatherDescription::ModerateRain => "Moderate rain expected",
            WeatherDescription::HeavyRain => "Heavy rain expected",
        }
    }
}

impl fmt::Display for WeatherDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Probability of rain (percent) as a step function of the predicted amount
pub fn calculate_rain_probability(rainfall_mm: f64) -> u8 {
    if rainfall_mm == 0.0 {
        0
    } else if rainfall_mm < 1.0 {
        20
    } else if rainfall_mm < 5.0 {
        40
    } else if rainfall_mm < 10.0 {
        60
    } else if rainfall_mm < 20.0 {
        80
    } else {
        95
    }
}

/// Describe the expected weather
///
/// Cloud cover only matters when no rain is predicted; humidity is accepted
/// for interface stability but does not affect the result.
pub fn weather_description(
    rainfall_mm: f64,
    _humidity: f64,
    cloud_cover: f64,
) -> WeatherDescription {
    if rainfall_mm == 0.0 {
        if cloud_cover < 30.0 {
            WeatherDescription::ClearSkies
        } else if cloud_cover < 60.0 {
            WeatherDescription::PartlyCloudy
        } else {
            WeatherDescription::CloudyNoRain
        }
    } else if rainfall_mm < 1.0 {
        WeatherDescription::LightDrizzle
    } else if rainfall_mm < 5.0 {
        WeatherDescription::LightRain
    } else if rainfall_mm < 15.0 {
        WeatherDescription::ModerateRain
    } else {
        WeatherDescription::HeavyRain
    }
}

/// Round to two decimal places, ties to even on the exact binary value
pub fn round2(value: f64) -> f64 {
    Decimal::from_f64_retain(value)
        .map(|d| d.round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven))
        .and_then(|d| d.to_f64())
        .unwrap_or_else(|| (value * 100.0).round() / 100.0)
}

/// Clamp negative (and NaN) amounts to zero, then round to two decimals
pub fn clamp_and_round(value: f64) -> f64 {
    round2(value.max(0.0))
}
