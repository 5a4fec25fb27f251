//! Geographic adjustment of rainfall estimates
//!
//! Two independent signals are combined multiplicatively: a macro-climate
//! factor from the latitude band of the geocoded location, and a regional
//! factor from keywords in the location name.

use serde::Serialize;

use crate::types::{Coordinates, GeoResult};

/// Multiplier for a latitude, by absolute distance from the equator
pub fn latitude_band_factor(latitude: f64) -> f64 {
    let lat = latitude.abs();
    if lat < 10.0 {
        // tropical
        1.4
    } else if lat < 23.5 {
        // subtropical
        1.2
    } else if lat < 35.0 {
        // temperate
        1.0
    } else if lat < 50.0 {
        // cool temperate
        0.9
    } else {
        // polar / subpolar
        0.6
    }
}

/// Latitude-derived climate multiplier for one request
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct GeoClimateFactor {
    pub latitude: Option<f64>,
    pub climate_multiplier: f64,
}

impl GeoClimateFactor {
    pub fn unresolved() -> Self {
        Self {
            latitude: None,
            climate_multiplier: 1.0,
        }
    }

    pub fn from_coordinates(coordinates: Coordinates) -> Self {
        // A zero coordinate is indistinguishable from a missing one upstream.
        if coordinates.latitude == 0.0 || coordinates.longitude == 0.0 {
            return Self::unresolved();
        }
        Self {
            latitude: Some(coordinates.latitude),
            climate_multiplier: latitude_band_factor(coordinates.latitude),
        }
    }

    /// Any lookup failure falls back to the neutral multiplier
    pub fn from_lookup(lookup: &GeoResult) -> Self {
        match lookup {
            Ok(coordinates) => Self::from_coordinates(*coordinates),
            Err(_) => Self::unresolved(),
        }
    }
}

/// A named group of location keywords sharing one rainfall multiplier
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeywordCategory {
    pub name: &'static str,
    pub keywords: &'static [&'static str],
    pub multiplier: f64,
}

impl KeywordCategory {
    fn matches(&self, location_lower: &str) -> bool {
        self.keywords.iter().any(|k| location_lower.contains(k))
    }
}

/// Most specific geography first; the first matching category wins
pub const KEYWORD_CATEGORIES: [KeywordCategory; 10] = [
    KeywordCategory {
        name: "coastal_karnataka",
        keywords: &[
            "mangalore", "udupi", "karwar", "byndoor", "kundapur", "honnavar", "kumta",
            "ankola", "bhatkal",
        ],
        multiplier: 1.6,
    },
    KeywordCategory {
        name: "western_ghats",
        keywords: &["puttur", "sullia", "sirsi"],
        multiplier: 1.5,
    },
    KeywordCategory {
        name: "hill_station",
        keywords: &["chikmagalur", "hassan", "shimoga"],
        multiplier: 1.4,
    },
    KeywordCategory {
        name: "south_karnataka",
        keywords: &["bangalore", "mysore", "mandya", "tumkur"],
        multiplier: 1.2,
    },
    KeywordCategory {
        name: "north_karnataka",
        keywords: &["hubli", "dharwad", "belgaum", "bagalkot"],
        multiplier: 1.0,
    },
    KeywordCategory {
        name: "north_karnataka_plains",
        keywords: &["bijapur", "gulbarga", "bidar", "raichur", "bellary"],
        multiplier: 0.8,
    },
    KeywordCategory {
        name: "karnataka",
        keywords: &["karnataka"],
        multiplier: 1.2,
    },
    KeywordCategory {
        name: "coastal",
        keywords: &["coast", "beach", "port", "bay", "island", "sea"],
        multiplier: 1.2,
    },
    KeywordCategory {
        name: "hill",
        keywords: &["mountain", "hill", "peak", "valley"],
        multiplier: 1.3,
    },
    KeywordCategory {
        name: "arid",
        keywords: &["desert", "arid"],
        multiplier: 0.3,
    },
];

/// Case-insensitive substring match against the category table
pub fn match_keyword_category(location: &str) -> Option<&'static KeywordCategory> {
    let lower = location.to_lowercase();
    KEYWORD_CATEGORIES.iter().find(|c| c.matches(&lower))
}

pub fn keyword_multiplier(location: &str) -> f64 {
    match_keyword_category(location)
        .map(|c| c.multiplier)
        .unwrap_or(1.0)
}

/// Combined location multiplier with the signals that produced it
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct LocationAdjustment {
    pub climate: GeoClimateFactor,
    pub keyword_category: Option<&'static str>,
    pub keyword_multiplier: f64,
}

impl LocationAdjustment {
    pub fn multiplier(&self) -> f64 {
        self.climate.climate_multiplier * self.keyword_multiplier
    }
}

/// The keyword component is computed whether or not geocoding succeeded
pub fn location_adjustment(location: &str, lookup: &GeoResult) -> LocationAdjustment {
    let category = match_keyword_category(location);
    LocationAdjustment {
        climate: GeoClimateFactor::from_lookup(lookup),
        keyword_category: category.map(|c| c.name),
        keyword_multiplier: category.map(|c| c.multiplier).unwrap_or(1.0),
    }
}
