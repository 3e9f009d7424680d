//! Validation utilities for field measurements
//!
//! The `check_*` functions are `validator` custom hooks used by
//! [`crate::models::RecordReadingInput`]; the `validate_*` functions are plain
//! checks for callers that do not go through a derive.

use std::borrow::Cow;

use validator::ValidationError;

/// Plausible air temperature range at ground level (°C)
pub const TEMPERATURE_RANGE: (f64, f64) = (-60.0, 70.0);

/// Raw NDVI range
pub const NDVI_RANGE: (f64, f64) = (-1.0, 1.0);

fn within(value: f64, (min, max): (f64, f64)) -> bool {
    value.is_finite() && value >= min && value <= max
}

fn out_of_range(code: &'static str, message: &'static str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(Cow::Borrowed(message));
    error
}

// ============================================================================
// Custom validator hooks
// ============================================================================

pub fn check_temperature(value: f64) -> Result<(), ValidationError> {
    if within(value, TEMPERATURE_RANGE) {
        Ok(())
    } else {
        Err(out_of_range(
            "temperature_range",
            "Temperature must be between -60 and 70 °C",
        ))
    }
}

pub fn check_ndvi(value: f64) -> Result<(), ValidationError> {
    if within(value, NDVI_RANGE) {
        Ok(())
    } else {
        Err(out_of_range("ndvi_range", "NDVI must be between -1 and 1"))
    }
}

pub fn check_latitude(value: f64) -> Result<(), ValidationError> {
    validate_latitude(value).map_err(|message| out_of_range("latitude_range", message))
}

pub fn check_longitude(value: f64) -> Result<(), ValidationError> {
    validate_longitude(value).map_err(|message| out_of_range("longitude_range", message))
}

// ============================================================================
// General Validations
// ============================================================================

pub fn validate_latitude(latitude: f64) -> Result<(), &'static str> {
    if within(latitude, (-90.0, 90.0)) {
        Ok(())
    } else {
        Err("Latitude must be between -90 and 90")
    }
}

pub fn validate_longitude(longitude: f64) -> Result<(), &'static str> {
    if within(longitude, (-180.0, 180.0)) {
        Ok(())
    } else {
        Err("Longitude must be between -180 and 180")
    }
}

/// Validate a coordinate pair supplied as query parameters
pub fn validate_coordinates(latitude: f64, longitude: f64) -> Result<(), &'static str> {
    validate_latitude(latitude)?;
    validate_longitude(longitude)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_temperature_bounds() {
        assert!(check_temperature(-60.0).is_ok());
        assert!(check_temperature(70.0).is_ok());
        assert!(check_temperature(70.5).is_err());
        assert!(check_temperature(f64::NAN).is_err());
    }

    #[test]
    fn test_ndvi_bounds() {
        assert!(check_ndvi(-1.0).is_ok());
        assert!(check_ndvi(0.42).is_ok());
        assert!(check_ndvi(1.01).is_err());
    }

    #[test]
    fn test_coordinates() {
        assert!(validate_coordinates(17.4065, 78.4772).is_ok());
        assert!(validate_coordinates(-90.0, 180.0).is_ok());
        assert_eq!(
            validate_coordinates(91.0, 0.0),
            Err("Latitude must be between -90 and 90")
        );
        assert!(validate_coordinates(0.0, f64::INFINITY).is_err());
    }

    #[test]
    fn test_custom_hook_carries_message() {
        let error = check_latitude(120.0).unwrap_err();
        assert_eq!(error.code, "latitude_range");
        assert!(error.message.is_some());
    }
}
