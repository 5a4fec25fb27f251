//! Property tests for the rule-based predictor and its derivations
//!
//! - Rule-based output is never negative
//! - Raising humidity within one tier band never lowers the prediction
//! - Probability is a non-decreasing step function of rainfall
//! - Final predictions are rounded to two decimals

use chrono::NaiveDate;
use proptest::prelude::*;
use shared::{
    base_amount, calculate_rain_probability, forecast, preprocess_input, pressure_factor,
    rule_based_prediction, temperature_factor, Coordinates, GeoError, GeoResult,
    WeatherObservation, FEATURE_COUNT, HUMIDITY_CLOUD_TIERS,
};

fn humidity_strategy() -> impl Strategy<Value = f64> {
    -50.0f64..150.0
}

fn cloud_strategy() -> impl Strategy<Value = f64> {
    -50.0f64..150.0
}

fn temperature_strategy() -> impl Strategy<Value = f64> {
    -60.0f64..60.0
}

fn pressure_strategy() -> impl Strategy<Value = f64> {
    900.0f64..1100.0
}

fn lookup_strategy() -> impl Strategy<Value = GeoResult> {
    prop_oneof![
        (-90.0f64..90.0, -180.0f64..180.0)
            .prop_map(|(lat, lon)| GeoResult::Ok(Coordinates::new(lat, lon))),
        Just(GeoResult::Err(GeoError::Timeout)),
        Just(GeoResult::Err(GeoError::NotFound("nowhere".to_string()))),
    ]
}

fn season_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("winter".to_string()),
        Just("Spring".to_string()),
        Just("SUMMER".to_string()),
        Just("autumn".to_string()),
        Just("monsoon".to_string()),
        Just("pre-monsoon".to_string()),
        Just("post-monsoon".to_string()),
        "[a-z]{0,8}",
    ]
}

fn location_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("London".to_string()),
        Just("Mangalore".to_string()),
        Just("Atacama Desert".to_string()),
        Just("Bellary".to_string()),
        "[A-Za-z ]{0,20}",
    ]
}

fn is_two_decimal(value: f64) -> bool {
    ((value * 100.0).round() - value * 100.0).abs() < 1e-6
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_rule_based_never_negative(
        humidity in humidity_strategy(),
        cloud in cloud_strategy(),
        temperature in temperature_strategy(),
        pressure in pressure_strategy()
    ) {
        let result = rule_based_prediction(humidity, cloud, temperature, pressure);
        prop_assert!(result >= 0.0);
        prop_assert!(is_two_decimal(result));
    }

    /// Cloud cover is kept inside the tier's band so no higher tier can
    /// apply; humidity then only moves the linear term.
    #[test]
    fn prop_humidity_monotonic_within_tier(
        tier_index in 0usize..4,
        cloud_fraction in 0.01f64..1.0,
        humidity_a in 0.01f64..50.0,
        humidity_b in 0.01f64..50.0,
        temperature in temperature_strategy(),
        pressure in pressure_strategy()
    ) {
        let tier = HUMIDITY_CLOUD_TIERS[tier_index];
        let cloud_ceiling = if tier_index == 0 {
            100.0
        } else {
            HUMIDITY_CLOUD_TIERS[tier_index - 1].cloud_above
        };
        let cloud = tier.cloud_above + cloud_fraction * (cloud_ceiling - tier.cloud_above);
        let (lo, hi) = if humidity_a <= humidity_b {
            (humidity_a, humidity_b)
        } else {
            (humidity_b, humidity_a)
        };
        let low = tier.humidity_above + lo;
        let high = tier.humidity_above + hi;

        let base_low = base_amount(low, cloud);
        let base_high = base_amount(high, cloud);
        prop_assert!(base_low > 0.0);
        prop_assert!(base_high >= base_low);

        let factors = temperature_factor(temperature) * pressure_factor(pressure);
        if factors >= 0.0 {
            prop_assert!(base_high * factors >= base_low * factors);
        }
    }

    #[test]
    fn prop_probability_non_decreasing(a in 0.0f64..100.0, b in 0.0f64..100.0) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(calculate_rain_probability(lo) <= calculate_rain_probability(hi));
    }

    #[test]
    fn prop_forecast_non_negative_and_rounded(
        location in location_strategy(),
        season in season_strategy(),
        humidity in humidity_strategy(),
        cloud in cloud_strategy(),
        temperature in temperature_strategy(),
        pressure in pressure_strategy(),
        lookup in lookup_strategy()
    ) {
        let observation = WeatherObservation {
            location,
            date: NaiveDate::from_ymd_opt(2024, 7, 1).unwrap(),
            temperature,
            humidity,
            pressure,
            wind_speed: 5.0,
            cloud_cover: cloud,
            season,
            time_of_day: "evening".to_string(),
        };
        let breakdown = forecast(&observation, &lookup);
        prop_assert!(breakdown.result.rainfall_mm >= 0.0);
        prop_assert!(is_two_decimal(breakdown.result.rainfall_mm));
        prop_assert_eq!(
            breakdown.result.probability_pct,
            calculate_rain_probability(breakdown.result.rainfall_mm)
        );

        let features = preprocess_input(&observation, None);
        prop_assert_eq!(features.len(), FEATURE_COUNT);
        prop_assert_eq!(features[5], 7.0);
        prop_assert_eq!(features[6], 1.0);
    }
}

#[test]
fn test_probability_ladder() {
    let points = [0.0, 0.5, 3.0, 7.0, 15.0, 25.0];
    let expected = [0, 20, 40, 60, 80, 95];
    for (mm, pct) in points.iter().zip(expected) {
        assert_eq!(calculate_rain_probability(*mm), pct);
    }
}
