//! External API integrations

pub mod geocoding;
pub mod weather;

pub use geocoding::{Geocoder, NominatimClient};
pub use weather::WeatherClient;
