//! Shared fixtures for backend integration tests

#![allow(dead_code)]

use chrono::NaiveDate;
use rainfall_backend::{external::Geocoder, AppState, Config};
use shared::{Coordinates, GeoError, GeoResult, ModelBundle, WeatherObservation};
use std::sync::Arc;

/// Geocoder answering every lookup with the same outcome
pub struct StubGeocoder {
    outcome: GeoResult,
}

impl StubGeocoder {
    pub fn at(latitude: f64, longitude: f64) -> Arc<Self> {
        Arc::new(Self {
            outcome: Ok(Coordinates::new(latitude, longitude)),
        })
    }

    pub fn failing(error: GeoError) -> Arc<Self> {
        Arc::new(Self { outcome: Err(error) })
    }
}

#[axum::async_trait]
impl Geocoder for StubGeocoder {
    async fn locate(&self, _location: &str) -> GeoResult {
        self.outcome.clone()
    }
}

pub fn london() -> Arc<StubGeocoder> {
    StubGeocoder::at(51.5074, -0.1278)
}

pub fn test_state(geocoder: Arc<dyn Geocoder>) -> AppState {
    let config = Config::defaults().unwrap();
    AppState::new(config, geocoder, ModelBundle::Unavailable).unwrap()
}

pub fn observation(location: &str, season: &str) -> WeatherObservation {
    WeatherObservation {
        location: location.to_string(),
        date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
        temperature: 15.0,
        humidity: 70.0,
        pressure: 1010.0,
        wind_speed: 10.0,
        cloud_cover: 60.0,
        season: season.to_string(),
        time_of_day: "morning".to_string(),
    }
}

/// Unique scratch directory under the system temp dir
pub fn scratch_dir(prefix: &str) -> std::path::PathBuf {
    let dir = std::env::temp_dir().join(format!("{}-{}", prefix, uuid::Uuid::new_v4()));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}
