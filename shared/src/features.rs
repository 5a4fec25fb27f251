//! Feature preprocessing for the regression model
//!
//! Produces the fixed-order feature vector
//! `[temperature, humidity, pressure, wind_speed, cloud_cover, month, day,
//! location_code, season_code]`.

use chrono::Datelike;
use sha2::{Digest, Sha256};

use crate::models::{LabelEncoder, WeatherObservation};

pub const FEATURE_COUNT: usize = 9;

pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "temperature",
    "humidity",
    "pressure",
    "wind_speed",
    "cloud_cover",
    "month",
    "day",
    "location",
    "season",
];

pub const MONTH_INDEX: usize = 5;
pub const DAY_INDEX: usize = 6;
pub const LOCATION_INDEX: usize = 7;
pub const SEASON_INDEX: usize = 8;

pub type FeatureVector = [f64; FEATURE_COUNT];

/// Trained encoders for the two categorical features
#[derive(Debug, Clone, Copy)]
pub struct CategoryEncoders<'a> {
    pub location: &'a LabelEncoder,
    pub season: &'a LabelEncoder,
}

/// Build the model feature vector for an observation
///
/// With trained encoders, labels unseen during training encode as 0. Without
/// them the location falls back to a stable hash bucket and the season to a
/// fixed four-way map.
pub fn preprocess_input(
    observation: &WeatherObservation,
    encoders: Option<CategoryEncoders<'_>>,
) -> FeatureVector {
    let (location_code, season_code) = match encoders {
        Some(encoders) => (
            encoders.location.transform(&observation.location).unwrap_or(0),
            encoders.season.transform(&observation.season).unwrap_or(0),
        ),
        None => (
            fallback_location_code(&observation.location) as usize,
            fallback_season_code(&observation.season),
        ),
    };

    [
        observation.temperature,
        observation.humidity,
        observation.pressure,
        observation.wind_speed,
        observation.cloud_cover,
        observation.date.month() as f64,
        observation.date.day() as f64,
        location_code as f64,
        season_code as f64,
    ]
}

/// Hash bucket in `0..10` for a location name, stable across processes
pub fn fallback_location_code(location: &str) -> u64 {
    let digest = Sha256::digest(location.to_lowercase().as_bytes());
    let mut prefix = [0u8; 8];
    prefix.copy_from_slice(&digest[..8]);
    u64::from_be_bytes(prefix) % 10
}

pub fn fallback_season_code(season: &str) -> usize {
    match season.to_lowercase().as_str() {
        "spring" => 0,
        "summer" => 1,
        "autumn" => 2,
        "winter" => 3,
        _ => 0,
    }
}
