//! Regression model status handlers

use axum::{extract::State, Json};
use serde::Serialize;

use crate::services::{ModelMetrics, ModelService};
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct ModelStatusResponse {
    pub available: bool,
    pub artifact_dir: String,
    pub feature_names: [&'static str; shared::FEATURE_COUNT],
}

pub async fn get_model_status(State(state): State<AppState>) -> Json<ModelStatusResponse> {
    Json(ModelStatusResponse {
        available: state.model.is_available(),
        artifact_dir: state.config.model.dir.display().to_string(),
        feature_names: shared::FEATURE_NAMES,
    })
}

#[derive(Debug, Serialize)]
pub struct ModelAccuracyResponse {
    pub success: bool,
    pub metrics: ModelMetrics,
}

/// Stored evaluation metrics, or the published defaults when none are stored
pub async fn get_model_accuracy(State(state): State<AppState>) -> Json<ModelAccuracyResponse> {
    let path = state.config.model.metrics_path();
    let metrics = ModelService::load_metrics(&path).unwrap_or_else(|err| {
        tracing::debug!("Using default model metrics: {}", err);
        ModelMetrics::default()
    });

    Json(ModelAccuracyResponse {
        success: true,
        metrics,
    })
}
