//! Request boundary parsing for prediction inputs
//!
//! Only well-formedness is checked here: numbers must parse and be finite,
//! dates must be `YYYY-MM-DD`. Ranges are deliberately not enforced.

use chrono::NaiveDate;
use thiserror::Error;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    #[error("{field} must be a number")]
    NotNumeric { field: String },

    #[error("{field} must be a finite number")]
    NotFinite { field: String },

    #[error("invalid date '{value}', expected YYYY-MM-DD")]
    InvalidDate { value: String },
}

impl FieldError {
    /// Name of the offending form field
    pub fn field(&self) -> &str {
        match self {
            FieldError::NotNumeric { field } | FieldError::NotFinite { field } => field,
            FieldError::InvalidDate { .. } => "date",
        }
    }
}

/// Parse a numeric form value
///
/// An absent field reads as 0; a present but blank or non-numeric one is an
/// error. Surrounding whitespace is ignored.
pub fn parse_numeric_field(field: &str, raw: Option<&str>) -> Result<f64, FieldError> {
    let Some(raw) = raw else {
        return Ok(0.0);
    };
    let value: f64 = raw.trim().parse().map_err(|_| FieldError::NotNumeric {
        field: field.to_string(),
    })?;
    if !value.is_finite() {
        return Err(FieldError::NotFinite {
            field: field.to_string(),
        });
    }
    Ok(value)
}

/// Check an already-numeric value (JSON bodies)
pub fn ensure_finite(field: &str, value: f64) -> Result<f64, FieldError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(FieldError::NotFinite {
            field: field.to_string(),
        })
    }
}

/// Parse the observation date; blank means `today`
pub fn parse_observation_date(raw: &str, today: NaiveDate) -> Result<NaiveDate, FieldError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(today);
    }
    NaiveDate::parse_from_str(raw, DATE_FORMAT).map_err(|_| FieldError::InvalidDate {
        value: raw.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_numeric_field_valid() {
        assert_eq!(parse_numeric_field("humidity", Some("70")), Ok(70.0));
        assert_eq!(parse_numeric_field("temperature", Some(" -3.5 ")), Ok(-3.5));
        assert_eq!(parse_numeric_field("pressure", Some("1e3")), Ok(1000.0));
    }

    #[test]
    fn test_parse_numeric_field_missing_is_zero() {
        assert_eq!(parse_numeric_field("wind_speed", None), Ok(0.0));
    }

    #[test]
    fn test_parse_numeric_field_invalid() {
        let err = parse_numeric_field("temperature", Some("invalid")).unwrap_err();
        assert_eq!(err.field(), "temperature");
        assert!(parse_numeric_field("humidity", Some("")).is_err());
        assert!(matches!(
            parse_numeric_field("humidity", Some("NaN")),
            Err(FieldError::NotFinite { .. })
        ));
        assert!(matches!(
            parse_numeric_field("humidity", Some("inf")),
            Err(FieldError::NotFinite { .. })
        ));
    }

    #[test]
    fn test_ensure_finite() {
        assert_eq!(ensure_finite("cloud_cover", 55.0), Ok(55.0));
        assert!(ensure_finite("cloud_cover", f64::INFINITY).is_err());
    }

    #[test]
    fn test_parse_observation_date() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        assert_eq!(
            parse_observation_date("2024-06-15", today),
            Ok(NaiveDate::from_ymd_opt(2024, 6, 15).unwrap())
        );
        assert_eq!(parse_observation_date("  ", today), Ok(today));
        let err = parse_observation_date("15/06/2024", today).unwrap_err();
        assert_eq!(err.field(), "date");
        assert!(parse_observation_date("2024-02-30", today).is_err());
    }
}
