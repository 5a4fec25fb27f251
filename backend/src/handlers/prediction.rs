//! HTTP handlers for rainfall prediction

use axum::{
    extract::{
        rejection::{FormRejection, JsonRejection},
        State,
    },
    Form, Json,
};
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use shared::{
    ensure_finite, parse_numeric_field, parse_observation_date, FieldError, ForecastBreakdown,
    WeatherDescription, WeatherObservation,
};

use crate::error::{AppError, AppResult};
use crate::services::PredictionRecord;
use crate::AppState;

/// Prediction form as submitted by the browser; numbers arrive as text
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PredictionForm {
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub date: String,
    pub temperature: Option<String>,
    pub humidity: Option<String>,
    pub pressure: Option<String>,
    pub wind_speed: Option<String>,
    pub cloud_cover: Option<String>,
    #[serde(default)]
    pub season: String,
    #[serde(default)]
    pub time_of_day: String,
}

impl PredictionForm {
    pub fn to_observation(&self, today: NaiveDate) -> Result<WeatherObservation, FieldError> {
        Ok(WeatherObservation {
            location: self.location.clone(),
            date: parse_observation_date(&self.date, today)?,
            temperature: parse_numeric_field("temperature", self.temperature.as_deref())?,
            humidity: parse_numeric_field("humidity", self.humidity.as_deref())?,
            pressure: parse_numeric_field("pressure", self.pressure.as_deref())?,
            wind_speed: parse_numeric_field("wind_speed", self.wind_speed.as_deref())?,
            cloud_cover: parse_numeric_field("cloud_cover", self.cloud_cover.as_deref())?,
            season: self.season.clone(),
            time_of_day: self.time_of_day.clone(),
        })
    }
}

/// JSON prediction request; numeric fields accept numbers or numeric strings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PredictionRequest {
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub date: String,
    pub temperature: Option<Value>,
    pub humidity: Option<Value>,
    pub pressure: Option<Value>,
    pub wind_speed: Option<Value>,
    pub cloud_cover: Option<Value>,
    #[serde(default)]
    pub season: String,
    #[serde(default)]
    pub time_of_day: String,
}

fn json_number(field: &str, value: Option<&Value>) -> Result<f64, FieldError> {
    match value {
        None | Some(Value::Null) => Ok(0.0),
        Some(Value::Number(n)) => match n.as_f64() {
            Some(value) => ensure_finite(field, value),
            None => Err(FieldError::NotNumeric {
                field: field.to_string(),
            }),
        },
        Some(Value::String(s)) => parse_numeric_field(field, Some(s)),
        Some(_) => Err(FieldError::NotNumeric {
            field: field.to_string(),
        }),
    }
}

impl PredictionRequest {
    pub fn to_observation(&self, today: NaiveDate) -> Result<WeatherObservation, FieldError> {
        Ok(WeatherObservation {
            location: self.location.clone(),
            date: parse_observation_date(&self.date, today)?,
            temperature: json_number("temperature", self.temperature.as_ref())?,
            humidity: json_number("humidity", self.humidity.as_ref())?,
            pressure: json_number("pressure", self.pressure.as_ref())?,
            wind_speed: json_number("wind_speed", self.wind_speed.as_ref())?,
            cloud_cover: json_number("cloud_cover", self.cloud_cover.as_ref())?,
            season: self.season.clone(),
            time_of_day: self.time_of_day.clone(),
        })
    }
}

/// Factors that produced the final amount
#[derive(Debug, Serialize)]
pub struct PredictionFactors {
    pub base_mm: f64,
    pub season_multiplier: f64,
    pub latitude: Option<f64>,
    pub climate_multiplier: f64,
    pub keyword_category: Option<&'static str>,
    pub keyword_multiplier: f64,
}

impl From<&ForecastBreakdown> for PredictionFactors {
    fn from(b: &ForecastBreakdown) -> Self {
        Self {
            base_mm: b.base_mm,
            season_multiplier: b.season_multiplier,
            latitude: b.location.climate.latitude,
            climate_multiplier: b.location.climate.climate_multiplier,
            keyword_category: b.location.keyword_category,
            keyword_multiplier: b.location.keyword_multiplier,
        }
    }
}

/// Prediction response
#[derive(Debug, Serialize)]
pub struct PredictionResponse {
    #[serde(flatten)]
    pub observation: WeatherObservation,
    pub rainfall_mm: f64,
    pub probability_pct: u8,
    pub description: WeatherDescription,
    pub factors: PredictionFactors,
    /// Advisory regression estimate; absent when no model is loaded
    pub model_estimate_mm: Option<f64>,
}

async fn run_prediction(state: &AppState, observation: WeatherObservation) -> PredictionResponse {
    let breakdown = state.predictor.forecast(&observation).await;
    let model_estimate_mm = state.model.estimate(&observation);

    state.history.append(PredictionRecord::new(
        &observation,
        &breakdown.result,
        Local::now().naive_local(),
    ));

    PredictionResponse {
        rainfall_mm: breakdown.result.rainfall_mm,
        probability_pct: breakdown.result.probability_pct,
        description: breakdown.result.description,
        factors: PredictionFactors::from(&breakdown),
        model_estimate_mm,
        observation,
    }
}

/// Handle the browser prediction form
pub async fn predict_form(
    State(state): State<AppState>,
    payload: Result<Form<PredictionForm>, FormRejection>,
) -> AppResult<Json<PredictionResponse>> {
    let Form(form) = payload.map_err(|e| AppError::MalformedRequest(e.body_text()))?;
    let today = Local::now().date_naive();
    let observation = form
        .to_observation(today)
        .map_err(|e| AppError::from_field(e, serde_json::to_value(&form).ok()))?;

    Ok(Json(run_prediction(&state, observation).await))
}

/// Handle a JSON prediction request
pub async fn predict_json(
    State(state): State<AppState>,
    payload: Result<Json<PredictionRequest>, JsonRejection>,
) -> AppResult<Json<PredictionResponse>> {
    let Json(request) = payload.map_err(|e| AppError::MalformedRequest(e.body_text()))?;
    let today = Local::now().date_naive();
    let observation = request
        .to_observation(today)
        .map_err(|e| AppError::from_field(e, serde_json::to_value(&request).ok()))?;

    Ok(Json(run_prediction(&state, observation).await))
}
