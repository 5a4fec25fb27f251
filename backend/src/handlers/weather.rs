//! Weather lookup handlers for form auto-fill and alerts

use axum::{
    extract::{Path, State},
    Json,
};
use chrono::{Local, Timelike};
use serde::Serialize;

use crate::external::weather::CurrentConditions;
use crate::AppState;

/// Locations offered as examples by the form
pub const SAMPLE_LOCATIONS: [&str; 4] = ["London", "New York", "Tokyo", "Sydney"];

#[derive(Debug, Serialize)]
pub struct WeatherDataResponse {
    pub locations: Vec<String>,
    pub latest_date: String,
}

/// Example locations and today's date
pub async fn get_weather_data() -> Json<WeatherDataResponse> {
    Json(WeatherDataResponse {
        locations: SAMPLE_LOCATIONS.iter().map(|s| s.to_string()).collect(),
        latest_date: Local::now().date_naive().format(shared::DATE_FORMAT).to_string(),
    })
}

#[derive(Debug, Serialize)]
pub struct CurrentWeatherResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<CurrentConditions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl CurrentWeatherResponse {
    fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            message: Some(message.into()),
        }
    }
}

/// Current conditions for a location, shaped like the prediction form
pub async fn get_current_weather(
    State(state): State<AppState>,
    Path(location): Path<String>,
) -> Json<CurrentWeatherResponse> {
    let coordinates = match state.predictor.lookup(&location).await {
        Ok(coordinates) => coordinates,
        Err(_) => return Json(CurrentWeatherResponse::failure("Location not found")),
    };

    let now = Local::now();
    match state
        .weather
        .get_current_conditions(coordinates, &location, now.date_naive(), now.hour() as usize)
        .await
    {
        Ok(data) => Json(CurrentWeatherResponse {
            success: true,
            data: Some(data),
            message: None,
        }),
        Err(err) => {
            tracing::warn!(%location, "Current weather lookup failed: {}", err);
            Json(CurrentWeatherResponse::failure("Weather data unavailable"))
        }
    }
}

#[derive(Debug, Serialize)]
pub struct WeatherAlertsResponse {
    pub location: String,
    pub alerts: Vec<String>,
}

/// Same-day rain alerts; any lookup failure yields an empty list
pub async fn get_weather_alerts(
    State(state): State<AppState>,
    Path(location): Path<String>,
) -> Json<WeatherAlertsResponse> {
    let alerts = match state.predictor.lookup(&location).await {
        Ok(coordinates) => state
            .weather
            .get_rain_alerts(coordinates)
            .await
            .unwrap_or_else(|err| {
                tracing::warn!(%location, "Weather alert lookup failed: {}", err);
                Vec::new()
            }),
        Err(_) => Vec::new(),
    };

    Json(WeatherAlertsResponse { location, alerts })
}
