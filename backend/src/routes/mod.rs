//! Route definitions for the Rainfall Predictor

use axum::{
    routing::{get, post},
    Router,
};

use crate::{handlers, AppState};

/// Browser-facing routes served at the root
pub fn app_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health_check))
        .route("/predict", post(handlers::predict_form))
        .route("/export-csv", get(handlers::export_csv))
}

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/predict", post(handlers::predict_json))
        .route("/history", get(handlers::get_history))
        .route("/export-csv", get(handlers::export_csv))
        // Weather lookups for the form
        .route("/weather-data", get(handlers::get_weather_data))
        .route("/current-weather/:location", get(handlers::get_current_weather))
        .route("/weather-alerts/:location", get(handlers::get_weather_alerts))
        // Regression model
        .route("/model-status", get(handlers::get_model_status))
        .route("/model-accuracy", get(handlers::get_model_accuracy))
}
