//! Prediction history and CSV export handlers

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::header,
    response::IntoResponse,
    Json,
};
use chrono::Local;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::services::{PredictionRecord, ReportingService};
use crate::AppState;

/// Number of records returned by the history endpoint unless asked otherwise
pub const RECENT_HISTORY_LIMIT: usize = 50;

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub total: usize,
    pub predictions: Vec<PredictionRecord>,
}

/// Most recent predictions, newest last
pub async fn get_history(
    State(state): State<AppState>,
    query: Result<Query<HistoryQuery>, QueryRejection>,
) -> AppResult<Json<HistoryResponse>> {
    let Query(query) = query.map_err(|e| AppError::MalformedRequest(e.body_text()))?;
    let limit = query
        .limit
        .unwrap_or(RECENT_HISTORY_LIMIT)
        .min(RECENT_HISTORY_LIMIT);

    Ok(Json(HistoryResponse {
        total: state.history.len(),
        predictions: state.history.recent(limit),
    }))
}

/// Download the prediction history as a CSV attachment
pub async fn export_csv(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let csv = ReportingService::export_history(&state.history)?;
    let disposition = format!(
        "attachment; filename=\"{}\"",
        ReportingService::export_file_name(Local::now().naive_local())
    );

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        csv,
    ))
}
