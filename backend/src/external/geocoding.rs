//! Geocoding client for resolving location names to coordinates
//!
//! Integrates with the OpenStreetMap Nominatim search API

use reqwest::Client;
use serde::Deserialize;
use shared::{Coordinates, GeoError, GeoResult};
use std::time::Duration;

use crate::config::GeocodingConfig;

/// Resolves a free-text location name to coordinates
#[axum::async_trait]
pub trait Geocoder: Send + Sync {
    async fn locate(&self, location: &str) -> GeoResult;
}

/// Nominatim geocoding client
#[derive(Clone)]
pub struct NominatimClient {
    client: Client,
    base_url: String,
}

/// A single Nominatim search hit; coordinates arrive as strings
#[derive(Debug, Deserialize)]
struct NominatimPlace {
    lat: String,
    lon: String,
}

impl NominatimClient {
    /// Create a new NominatimClient
    pub fn new(config: &GeocodingConfig) -> Result<Self, reqwest::Error> {
        Self::with_base_url(
            config.base_url.clone(),
            &config.user_agent,
            config.timeout(),
        )
    }

    /// Create a client against a custom base URL (for testing)
    pub fn with_base_url(
        base_url: String,
        user_agent: &str,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()?;

        Ok(Self { client, base_url })
    }

    async fn search(&self, location: &str) -> Result<Vec<NominatimPlace>, GeoError> {
        let url = format!("{}/search", self.base_url.trim_end_matches('/'));

        let response = self
            .client
            .get(&url)
            .query(&[("q", location), ("format", "json"), ("limit", "1")])
            .send()
            .await
            .map_err(map_request_error)?;

        if !response.status().is_success() {
            return Err(GeoError::Network(format!(
                "geocoding API returned {}",
                response.status()
            )));
        }

        response
            .json::<Vec<NominatimPlace>>()
            .await
            .map_err(|e| GeoError::Malformed(e.to_string()))
    }
}

#[axum::async_trait]
impl Geocoder for NominatimClient {
    async fn locate(&self, location: &str) -> GeoResult {
        let places = self.search(location).await?;
        let place = places
            .first()
            .ok_or_else(|| GeoError::NotFound(location.to_string()))?;
        parse_place(place)
    }
}

fn map_request_error(err: reqwest::Error) -> GeoError {
    if err.is_timeout() {
        GeoError::Timeout
    } else {
        GeoError::Network(err.to_string())
    }
}

fn parse_place(place: &NominatimPlace) -> GeoResult {
    let parse = |raw: &str, name: &str| {
        raw.trim()
            .parse::<f64>()
            .map_err(|_| GeoError::Malformed(format!("{} '{}' is not a number", name, raw)))
    };
    Ok(Coordinates::new(
        parse(&place.lat, "lat")?,
        parse(&place.lon, "lon")?,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_nominatim_response() {
        let body = r#"[{"place_id": 1, "lat": "51.5073219", "lon": "-0.1276474",
                        "display_name": "London, Greater London, England"}]"#;
        let places: Vec<NominatimPlace> = serde_json::from_str(body).unwrap();
        let coords = parse_place(&places[0]).unwrap();
        assert_eq!(coords, Coordinates::new(51.5073219, -0.1276474));
    }

    #[test]
    fn test_parse_malformed_coordinates() {
        let place = NominatimPlace {
            lat: "north".to_string(),
            lon: "0".to_string(),
        };
        assert!(matches!(parse_place(&place), Err(GeoError::Malformed(_))));
    }
}
