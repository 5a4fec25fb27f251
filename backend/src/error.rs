//! Error handling for the Rainfall Predictor
//!
//! Provides consistent JSON error responses for the HTTP boundary

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use shared::FieldError;
use thiserror::Error;

pub const INVALID_NUMERIC_MESSAGE: &str =
    "Please enter valid numerical values for weather parameters";

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Validation errors
    #[error("Invalid numeric input: {source}")]
    InvalidNumericInput {
        source: FieldError,
        submitted: Option<serde_json::Value>,
    },

    #[error("Invalid date: {source}")]
    InvalidDate {
        source: FieldError,
        submitted: Option<serde_json::Value>,
    },

    #[error("Malformed request: {0}")]
    MalformedRequest(String),

    #[error("No predictions to export")]
    NoPredictionsToExport,

    // External service errors
    #[error("Weather service unavailable: {0}")]
    WeatherServiceUnavailable(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    // Internal errors
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    /// Map a boundary parsing failure, echoing the submitted request
    pub fn from_field(source: FieldError, submitted: Option<serde_json::Value>) -> Self {
        match source {
            FieldError::InvalidDate { .. } => AppError::InvalidDate { source, submitted },
            _ => AppError::InvalidNumericInput { source, submitted },
        }
    }
}

/// Error response structure
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submitted: Option<serde_json::Value>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_detail) = match &self {
            AppError::InvalidNumericInput { source, submitted } => (
                StatusCode::BAD_REQUEST,
                ErrorDetail {
                    code: "INVALID_NUMERIC_INPUT".to_string(),
                    message: INVALID_NUMERIC_MESSAGE.to_string(),
                    field: Some(source.field().to_string()),
                    submitted: submitted.clone(),
                },
            ),
            AppError::InvalidDate { source, submitted } => (
                StatusCode::BAD_REQUEST,
                ErrorDetail {
                    code: "INVALID_DATE".to_string(),
                    message: source.to_string(),
                    field: Some(source.field().to_string()),
                    submitted: submitted.clone(),
                },
            ),
            AppError::MalformedRequest(msg) => (
                StatusCode::BAD_REQUEST,
                ErrorDetail {
                    code: "MALFORMED_REQUEST".to_string(),
                    message: msg.clone(),
                    field: None,
                    submitted: None,
                },
            ),
            AppError::NoPredictionsToExport => (
                StatusCode::NOT_FOUND,
                ErrorDetail {
                    code: "NO_PREDICTIONS".to_string(),
                    message: "No predictions to export".to_string(),
                    field: None,
                    submitted: None,
                },
            ),
            AppError::WeatherServiceUnavailable(msg) => (
                StatusCode::SERVICE_UNAVAILABLE,
                ErrorDetail {
                    code: "WEATHER_SERVICE_UNAVAILABLE".to_string(),
                    message: format!("Weather service is temporarily unavailable: {}", msg),
                    field: None,
                    submitted: None,
                },
            ),
            AppError::Configuration(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorDetail {
                    code: "CONFIGURATION_ERROR".to_string(),
                    message: format!("Configuration error: {}", msg),
                    field: None,
                    submitted: None,
                },
            ),
            AppError::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorDetail {
                    code: "INTERNAL_ERROR".to_string(),
                    message: msg.clone(),
                    field: None,
                    submitted: None,
                },
            ),
        };

        if status.is_server_error() {
            tracing::error!("Error: {:?}", self);
        } else {
            tracing::warn!("Request rejected: {}", self);
        }

        (status, Json(ErrorResponse { error: error_detail })).into_response()
    }
}

/// Result type alias for handlers
pub type AppResult<T> = Result<T, AppError>;
