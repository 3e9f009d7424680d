//! IoT sensor reading models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::types::GpsCoordinates;

/// A persisted IoT sensor reading
///
/// Every measurement is independently optional; a missing sensor is `None`,
/// never zero.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SensorReading {
    pub id: Option<Uuid>,
    /// Nitrogen (mg/kg)
    pub n_value: Option<f64>,
    /// Phosphorus (mg/kg)
    pub p_value: Option<f64>,
    /// Potassium (mg/kg)
    pub k_value: Option<f64>,
    pub soil_ph: Option<f64>,
    /// Soil moisture (%)
    pub soil_moisture: Option<f64>,
    /// Air temperature (°C)
    pub temperature: Option<f64>,
    /// Relative humidity (%)
    pub humidity: Option<f64>,
    pub ndvi: Option<f64>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub created_at: Option<DateTime<Utc>>,
}

impl SensorReading {
    /// Whether the row carries real sensor data.
    ///
    /// At least one of nitrogen, phosphorus or temperature must be present
    /// and strictly positive. Placeholder rows (all zero or null) fail this.
    pub fn is_meaningful(&self) -> bool {
        [self.n_value, self.p_value, self.temperature]
            .iter()
            .any(|v| matches!(v, Some(v) if *v > 0.0))
    }

    /// Coordinates of the reading when both are present and finite
    pub fn coordinates(&self) -> Option<GpsCoordinates> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) if lat.is_finite() && lon.is_finite() => {
                Some(GpsCoordinates::new(lat, lon))
            }
            _ => None,
        }
    }
}

/// Input for uploading a sensor reading from a field device
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct RecordReadingInput {
    #[validate(range(min = 0.0))]
    pub n_value: Option<f64>,
    #[validate(range(min = 0.0))]
    pub p_value: Option<f64>,
    #[validate(range(min = 0.0))]
    pub k_value: Option<f64>,
    #[validate(range(min = 0.0, max = 14.0))]
    pub soil_ph: Option<f64>,
    #[validate(range(min = 0.0, max = 100.0))]
    pub soil_moisture: Option<f64>,
    #[validate(custom = "crate::validation::check_temperature")]
    pub temperature: Option<f64>,
    #[validate(range(min = 0.0, max = 100.0))]
    pub humidity: Option<f64>,
    #[validate(custom = "crate::validation::check_ndvi")]
    pub ndvi: Option<f64>,
    #[validate(custom = "crate::validation::check_latitude")]
    pub latitude: Option<f64>,
    #[validate(custom = "crate::validation::check_longitude")]
    pub longitude: Option<f64>,
}

impl RecordReadingInput {
    /// True when the upload carries no measurement at all
    pub fn is_empty(&self) -> bool {
        [
            self.n_value,
            self.p_value,
            self.k_value,
            self.soil_ph,
            self.soil_moisture,
            self.temperature,
            self.humidity,
            self.ndvi,
            self.latitude,
            self.longitude,
        ]
        .iter()
        .all(Option::is_none)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_meaningful_reading() {
        let reading = SensorReading {
            n_value: Some(0.0),
            p_value: None,
            temperature: Some(21.5),
            ..Default::default()
        };
        assert!(reading.is_meaningful());
    }

    #[test]
    fn test_placeholder_reading_is_not_meaningful() {
        let reading = SensorReading {
            n_value: Some(0.0),
            p_value: Some(0.0),
            k_value: Some(180.0),
            soil_moisture: Some(40.0),
            temperature: Some(-3.0),
            ..Default::default()
        };
        assert!(!reading.is_meaningful());
        assert!(!SensorReading::default().is_meaningful());
    }

    #[test]
    fn test_coordinates_require_both_axes() {
        let reading = SensorReading {
            latitude: Some(17.1),
            ..Default::default()
        };
        assert_eq!(reading.coordinates(), None);

        let reading = SensorReading {
            latitude: Some(17.1),
            longitude: Some(78.2),
            ..Default::default()
        };
        assert_eq!(reading.coordinates(), Some(GpsCoordinates::new(17.1, 78.2)));
    }

    #[test]
    fn test_record_input_validation() {
        let input = RecordReadingInput {
            soil_ph: Some(15.0),
            ..Default::default()
        };
        assert!(input.validate().is_err());

        let input = RecordReadingInput {
            n_value: Some(45.0),
            soil_ph: Some(6.5),
            latitude: Some(17.4),
            longitude: Some(78.4),
            ..Default::default()
        };
        assert!(input.validate().is_ok());
        assert!(!input.is_empty());
        assert!(RecordReadingInput::default().is_empty());
    }

    #[test]
    fn test_record_input_custom_range_hooks() {
        let input = RecordReadingInput {
            temperature: Some(85.0),
            ndvi: Some(1.5),
            latitude: Some(-95.0),
            longitude: Some(181.0),
            ..Default::default()
        };
        let errors = input.validate().unwrap_err();
        let fields = errors.field_errors();
        for field in ["temperature", "ndvi", "latitude", "longitude"] {
            assert!(fields.contains_key(field), "{} not flagged", field);
        }

        let input = RecordReadingInput {
            temperature: Some(-10.0),
            ndvi: Some(-0.2),
            latitude: Some(-33.9),
            longitude: Some(151.2),
            ..Default::default()
        };
        assert!(input.validate().is_ok());
    }
}
