//! Weather observation models

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Seasons recognised by the seasonal multiplier table
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum Season {
    Winter,
    Spring,
    Summer,
    Autumn,
    Monsoon,
    PreMonsoon,
    PostMonsoon,
}

impl Season {
    pub const ALL: [Season; 7] = [
        Season::Winter,
        Season::Spring,
        Season::Summer,
        Season::Autumn,
        Season::Monsoon,
        Season::PreMonsoon,
        Season::PostMonsoon,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Season::Winter => "winter",
            Season::Spring => "spring",
            Season::Summer => "summer",
            Season::Autumn => "autumn",
            Season::Monsoon => "monsoon",
            Season::PreMonsoon => "pre-monsoon",
            Season::PostMonsoon => "post-monsoon",
        }
    }

    /// Rainfall intensity multiplier for the season
    pub fn multiplier(&self) -> f64 {
        match self {
            Season::Winter => 0.7,
            Season::Spring => 1.1,
            Season::Summer => 0.8,
            Season::Autumn => 1.2,
            Season::Monsoon => 1.8,
            Season::PreMonsoon => 1.3,
            Season::PostMonsoon => 1.1,
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown season: {0}")]
pub struct UnknownSeason(pub String);

impl FromStr for Season {
    type Err = UnknownSeason;

    /// Case-insensitive; surrounding whitespace is significant
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_lowercase();
        Season::ALL
            .into_iter()
            .find(|season| season.as_str() == lower)
            .ok_or_else(|| UnknownSeason(s.to_string()))
    }
}

/// A single prediction request's weather readings
///
/// `season` keeps the label exactly as submitted so that history and CSV
/// export show what the user entered; use [`WeatherObservation::season`]
/// for the parsed value.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WeatherObservation {
    pub location: String,
    pub date: NaiveDate,
    pub temperature: f64,
    pub humidity: f64,
    pub pressure: f64,
    pub wind_speed: f64,
    pub cloud_cover: f64,
    pub season: String,
    pub time_of_day: String,
}

impl WeatherObservation {
    pub fn season(&self) -> Option<Season> {
        self.season.parse().ok()
    }

    /// Seasonal multiplier, 1.0 when the label is not a known season
    pub fn season_multiplier(&self) -> f64 {
        self.season().map(|s| s.multiplier()).unwrap_or(1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_season_parse_is_case_insensitive() {
        assert_eq!("MONSOON".parse::<Season>(), Ok(Season::Monsoon));
        assert_eq!("Pre-Monsoon".parse::<Season>(), Ok(Season::PreMonsoon));
        assert_eq!("post-monsoon".parse::<Season>(), Ok(Season::PostMonsoon));
    }

    #[test]
    fn test_season_parse_unknown() {
        assert!("rainy".parse::<Season>().is_err());
        assert!(" winter".parse::<Season>().is_err());
        assert!("".parse::<Season>().is_err());
    }

    #[test]
    fn test_season_multipliers() {
        assert_eq!(Season::Winter.multiplier(), 0.7);
        assert_eq!(Season::Spring.multiplier(), 1.1);
        assert_eq!(Season::Summer.multiplier(), 0.8);
        assert_eq!(Season::Autumn.multiplier(), 1.2);
        assert_eq!(Season::Monsoon.multiplier(), 1.8);
        assert_eq!(Season::PreMonsoon.multiplier(), 1.3);
        assert_eq!(Season::PostMonsoon.multiplier(), 1.1);
    }

    #[test]
    fn test_unknown_season_multiplier_defaults_to_one() {
        let obs = WeatherObservation {
            location: "London".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            temperature: 15.0,
            humidity: 70.0,
            pressure: 1010.0,
            wind_speed: 10.0,
            cloud_cover: 60.0,
            season: "dry".to_string(),
            time_of_day: "morning".to_string(),
        };
        assert_eq!(obs.season(), None);
        assert_eq!(obs.season_multiplier(), 1.0);
    }

    #[test]
    fn test_season_serde_uses_kebab_case() {
        let json = serde_json::to_string(&Season::PreMonsoon).unwrap();
        assert_eq!(json, "\"pre-monsoon\"");
    }
}
