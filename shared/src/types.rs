//! Common types used across the predictor

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Geographic coordinates in decimal degrees
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Reasons a geocoding lookup produced no coordinates
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeoError {
    #[error("geocoding request failed: {0}")]
    Network(String),

    #[error("geocoding request timed out")]
    Timeout,

    #[error("location not found: {0}")]
    NotFound(String),

    #[error("malformed geocoding response: {0}")]
    Malformed(String),
}

/// Result of a geocoding lookup
pub type GeoResult = Result<Coordinates, GeoError>;
