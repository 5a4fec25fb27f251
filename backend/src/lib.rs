//! Rainfall Predictor - Backend
//!
//! HTTP service estimating rainfall amount and likelihood for a named
//! location and date from a handful of weather observations.

use axum::Router;
use shared::ModelBundle;
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub mod config;
pub mod error;
pub mod external;
pub mod handlers;
pub mod routes;
pub mod services;

pub use config::Config;

use error::{AppError, AppResult};
use external::{Geocoder, WeatherClient};
use services::{HistoryStore, PredictionService};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub predictor: PredictionService,
    pub weather: WeatherClient,
    pub model: Arc<ModelBundle>,
    pub history: Arc<HistoryStore>,
}

impl AppState {
    pub fn new(config: Config, geocoder: Arc<dyn Geocoder>, model: ModelBundle) -> AppResult<Self> {
        let weather = WeatherClient::new(&config.weather)
            .map_err(|e| AppError::Configuration(format!("weather client: {}", e)))?;

        Ok(Self {
            predictor: PredictionService::new(geocoder),
            weather,
            model: Arc::new(model),
            history: Arc::new(HistoryStore::new(config.history.capacity)),
            config: Arc::new(config),
        })
    }
}

/// Create the application router with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(routes::app_routes())
        .nest("/api/v1", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
