//! Weather API client for fetching current conditions and daily outlooks
//!
//! Integrates with the Open-Meteo forecast API. Used to pre-fill the
//! prediction form and to raise simple same-day rain alerts.

use chrono::NaiveDate;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use shared::{Coordinates, DATE_FORMAT};
use std::time::Duration;

use crate::config::WeatherConfig;
use crate::error::{AppError, AppResult};

const DEFAULT_TEMPERATURE: f64 = 20.0;
const DEFAULT_HUMIDITY: f64 = 70.0;
const DEFAULT_PRESSURE: f64 = 1013.0;
const DEFAULT_WIND_SPEED: f64 = 10.0;
const DEFAULT_CLOUD_COVER: f64 = 50.0;

const HEAVY_RAIN_MM: f64 = 50.0;
const HIGH_PROBABILITY_PCT: f64 = 80.0;

/// Weather API client
#[derive(Clone)]
pub struct WeatherClient {
    client: Client,
    base_url: String,
}

/// Current conditions in the shape of the prediction form
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CurrentConditions {
    pub temperature: f64,
    pub humidity: f64,
    pub pressure: f64,
    pub wind_speed: f64,
    pub cloud_cover: f64,
    pub location: String,
    pub date: String,
}

/// Open-Meteo forecast response (current weather + hourly series)
#[derive(Debug, Deserialize)]
pub(crate) struct OMForecastResponse {
    current_weather: Option<OMCurrentWeather>,
    hourly: Option<OMHourly>,
}

#[derive(Debug, Deserialize)]
struct OMCurrentWeather {
    temperature: Option<f64>,
    windspeed: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct OMHourly {
    #[serde(default)]
    relative_humidity_2m: Vec<Option<f64>>,
    #[serde(default)]
    surface_pressure: Vec<Option<f64>>,
    #[serde(default)]
    cloud_cover: Vec<Option<f64>>,
}

/// Open-Meteo daily outlook response
#[derive(Debug, Deserialize)]
pub(crate) struct OMDailyResponse {
    daily: Option<OMDaily>,
}

#[derive(Debug, Deserialize)]
struct OMDaily {
    #[serde(default)]
    precipitation_sum: Vec<Option<f64>>,
    #[serde(default)]
    precipitation_probability_max: Vec<Option<f64>>,
}

impl WeatherClient {
    /// Create a new WeatherClient
    pub fn new(config: &WeatherConfig) -> Result<Self, reqwest::Error> {
        Self::with_base_url(config.api_endpoint.clone(), config.timeout())
    }

    /// Create a new WeatherClient against a custom base URL
    pub fn with_base_url(base_url: String, timeout: Duration) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            base_url,
        })
    }

    async fn get_forecast<T: for<'de> Deserialize<'de>>(
        &self,
        coordinates: Coordinates,
        extra: &[(&str, &str)],
    ) -> AppResult<T> {
        let url = format!("{}/forecast", self.base_url.trim_end_matches('/'));
        let latitude = coordinates.latitude.to_string();
        let longitude = coordinates.longitude.to_string();

        let mut query = vec![
            ("latitude", latitude.as_str()),
            ("longitude", longitude.as_str()),
            ("timezone", "auto"),
        ];
        query.extend_from_slice(extra);

        let response = self
            .client
            .get(&url)
            .query(&query)
            .send()
            .await
            .map_err(|e| AppError::WeatherServiceUnavailable(format!("request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::WeatherServiceUnavailable(format!(
                "Weather API error: {} - {}",
                status, body
            )));
        }

        response.json::<T>().await.map_err(|e| {
            AppError::WeatherServiceUnavailable(format!("Failed to parse weather response: {}", e))
        })
    }

    /// Fetch current conditions for form auto-fill
    ///
    /// `hour` selects the entry of the hourly series; `date` is echoed back.
    pub async fn get_current_conditions(
        &self,
        coordinates: Coordinates,
        location: &str,
        date: NaiveDate,
        hour: usize,
    ) -> AppResult<CurrentConditions> {
        let data: OMForecastResponse = self
            .get_forecast(
                coordinates,
                &[
                    ("current_weather", "true"),
                    (
                        "hourly",
                        "temperature_2m,relative_humidity_2m,surface_pressure,wind_speed_10m,cloud_cover",
                    ),
                ],
            )
            .await?;

        conditions_from_response(data, hour, location, date).ok_or_else(|| {
            AppError::WeatherServiceUnavailable("response lacks current or hourly data".into())
        })
    }

    /// Same-day rain alerts for a location
    pub async fn get_rain_alerts(&self, coordinates: Coordinates) -> AppResult<Vec<String>> {
        let data: OMDailyResponse = self
            .get_forecast(
                coordinates,
                &[("daily", "precipitation_sum,precipitation_probability_max")],
            )
            .await?;

        Ok(rain_alerts(&data))
    }
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn hourly_value(series: &[Option<f64>], hour: usize, default: f64) -> f64 {
    series.get(hour).copied().flatten().unwrap_or(default)
}

/// Convert an Open-Meteo response into form values, `None` when either the
/// current or hourly block is missing
pub(crate) fn conditions_from_response(
    data: OMForecastResponse,
    hour: usize,
    location: &str,
    date: NaiveDate,
) -> Option<CurrentConditions> {
    let current = data.current_weather?;
    let hourly = data.hourly?;

    Some(CurrentConditions {
        temperature: round1(current.temperature.unwrap_or(DEFAULT_TEMPERATURE)),
        humidity: round1(hourly_value(
            &hourly.relative_humidity_2m,
            hour,
            DEFAULT_HUMIDITY,
        )),
        pressure: round1(hourly_value(&hourly.surface_pressure, hour, DEFAULT_PRESSURE)),
        wind_speed: round1(current.windspeed.unwrap_or(DEFAULT_WIND_SPEED)),
        cloud_cover: round1(hourly_value(&hourly.cloud_cover, hour, DEFAULT_CLOUD_COVER)),
        location: location.to_string(),
        date: date.format(DATE_FORMAT).to_string(),
    })
}

/// Alerts for today's entry of the daily outlook
pub(crate) fn rain_alerts(data: &OMDailyResponse) -> Vec<String> {
    let Some(daily) = &data.daily else {
        return Vec::new();
    };
    let precipitation = daily.precipitation_sum.first().copied().flatten().unwrap_or(0.0);
    let probability = daily
        .precipitation_probability_max
        .first()
        .copied()
        .flatten()
        .unwrap_or(0.0);

    let mut alerts = Vec::new();
    if precipitation > HEAVY_RAIN_MM {
        alerts.push("Heavy rainfall expected today".to_string());
    } else if probability > HIGH_PROBABILITY_PCT {
        alerts.push("High probability of rain today".to_string());
    }
    alerts
}
