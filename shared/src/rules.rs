//! Rule-based rainfall predictor
//!
//! A deterministic threshold/curve formula: a base amount from humidity and
//! cloud cover, scaled by temperature and pressure factors, plus a small
//! deterministic variability term.

use crate::models::clamp_and_round;

/// One rung of the humidity/cloud-cover ladder
#[derive(Debug, Clone, Copy)]
pub struct HumidityCloudTier {
    pub humidity_above: f64,
    pub cloud_above: f64,
    pub base_mm: f64,
    pub humidity_coefficient: f64,
    pub cloud_coefficient: f64,
}

impl HumidityCloudTier {
    fn applies(&self, humidity: f64, cloud_cover: f64) -> bool {
        humidity > self.humidity_above && cloud_cover > self.cloud_above
    }

    fn amount(&self, humidity: f64, cloud_cover: f64) -> f64 {
        self.base_mm
            + (humidity - self.humidity_above) * self.humidity_coefficient
            + (cloud_cover - self.cloud_above) * self.cloud_coefficient
    }
}

/// Checked highest first; the first tier that applies wins
pub const HUMIDITY_CLOUD_TIERS: [HumidityCloudTier; 4] = [
    HumidityCloudTier {
        humidity_above: 85.0,
        cloud_above: 80.0,
        base_mm: 12.0,
        humidity_coefficient: 0.4,
        cloud_coefficient: 0.3,
    },
    HumidityCloudTier {
        humidity_above: 75.0,
        cloud_above: 70.0,
        base_mm: 6.0,
        humidity_coefficient: 0.3,
        cloud_coefficient: 0.2,
    },
    HumidityCloudTier {
        humidity_above: 65.0,
        cloud_above: 60.0,
        base_mm: 2.0,
        humidity_coefficient: 0.2,
        cloud_coefficient: 0.15,
    },
    HumidityCloudTier {
        humidity_above: 50.0,
        cloud_above: 40.0,
        base_mm: 0.5,
        humidity_coefficient: 0.1,
        cloud_coefficient: 0.05,
    },
];

pub fn base_amount(humidity: f64, cloud_cover: f64) -> f64 {
    HUMIDITY_CLOUD_TIERS
        .iter()
        .find(|tier| tier.applies(humidity, cloud_cover))
        .map(|tier| tier.amount(humidity, cloud_cover))
        .unwrap_or(0.0)
}

/// 1.0 inside 10-25 °C, reduced for cold, tapering above 25 °C
pub fn temperature_factor(temperature: f64) -> f64 {
    if (10.0..=25.0).contains(&temperature) {
        1.0
    } else if temperature < 10.0 {
        0.8 + temperature / 50.0
    } else if temperature > 25.0 {
        1.2 - (temperature - 25.0) * 0.02
    } else {
        // NaN
        0.6
    }
}

/// Low pressure means more rain
pub fn pressure_factor(pressure: f64) -> f64 {
    if pressure < 990.0 {
        1.4
    } else if pressure < 1005.0 {
        1.2
    } else if pressure < 1015.0 {
        1.0
    } else if pressure < 1025.0 {
        0.8
    } else {
        0.6
    }
}

/// Deterministic perturbation in `[0, 1)` derived from the inputs
///
/// The modulo is floored (result takes the divisor's sign), so negative sums
/// still land in `[0, 10)` before scaling.
pub fn variability(humidity: f64, cloud_cover: f64, temperature: f64, pressure: f64) -> f64 {
    let combined =
        humidity + cloud_cover + (temperature - 20.0).abs() + (pressure - 1013.0).abs();
    combined.rem_euclid(10.0) * 0.1
}

/// Base rainfall estimate in mm, never negative, rounded to two decimals
pub fn rule_based_prediction(
    humidity: f64,
    cloud_cover: f64,
    temperature: f64,
    pressure: f64,
) -> f64 {
    let mut prediction = base_amount(humidity, cloud_cover);
    prediction *= temperature_factor(temperature);
    prediction *= pressure_factor(pressure);
    prediction += variability(humidity, cloud_cover, temperature, pressure);
    clamp_and_round(prediction)
}
