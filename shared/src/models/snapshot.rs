//! Farm snapshot models
//!
//! A snapshot is the merged view of one location: stored sensor values,
//! live-fetched substitutes and the resolved location, each tagged with
//! where it came from.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::GpsCoordinates;

/// Where a snapshot value came from
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Provenance {
    /// Persisted IoT reading
    Stored,
    /// Live provider call (weather, vegetation index)
    Fetched,
    /// Fixed reference value
    Default,
}

/// A single measurement with its provenance
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct FieldValue<T> {
    pub value: T,
    pub source: Provenance,
}

impl<T> FieldValue<T> {
    pub fn stored(value: T) -> Self {
        Self {
            value,
            source: Provenance::Stored,
        }
    }

    pub fn fetched(value: T) -> Self {
        Self {
            value,
            source: Provenance::Fetched,
        }
    }

    pub fn defaulted(value: T) -> Self {
        Self {
            value,
            source: Provenance::Default,
        }
    }
}

/// Merged farm state for one location and time
///
/// Absent fields are unknown. Zero is a real measurement.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FarmSnapshot {
    /// Nitrogen (mg/kg)
    pub nitrogen: Option<FieldValue<f64>>,
    /// Phosphorus (mg/kg)
    pub phosphorus: Option<FieldValue<f64>>,
    /// Potassium (mg/kg)
    pub potassium: Option<FieldValue<f64>>,
    pub ph: Option<FieldValue<f64>>,
    /// Soil moisture (%)
    pub moisture: Option<FieldValue<f64>>,
    /// Air temperature (°C)
    pub temperature: Option<FieldValue<f64>>,
    /// Relative humidity (%)
    pub humidity: Option<FieldValue<f64>>,
    /// Vegetation index, normalized 0..1 on the satellite path
    pub ndvi: Option<FieldValue<f64>>,
    pub location: FieldValue<GpsCoordinates>,
    pub observed_at: Option<FieldValue<DateTime<Utc>>>,
}

impl FarmSnapshot {
    /// Snapshot with every measurement unknown
    pub fn unknown_at(location: FieldValue<GpsCoordinates>) -> Self {
        Self {
            nitrogen: None,
            phosphorus: None,
            potassium: None,
            ph: None,
            moisture: None,
            temperature: None,
            humidity: None,
            ndvi: None,
            location,
            observed_at: None,
        }
    }

    /// Builder-style helper that overwrites all numeric fields from plain values.
    ///
    /// Every provided value is tagged [`Provenance::Stored`].
    pub fn from_values(values: SnapshotValues, location: GpsCoordinates) -> Self {
        let stored = |v: Option<f64>| v.map(FieldValue::stored);
        Self {
            nitrogen: stored(values.nitrogen),
            phosphorus: stored(values.phosphorus),
            potassium: stored(values.potassium),
            ph: stored(values.ph),
            moisture: stored(values.moisture),
            temperature: stored(values.temperature),
            humidity: stored(values.humidity),
            ndvi: stored(values.ndvi),
            location: FieldValue::stored(location),
            observed_at: None,
        }
    }

    /// Plain numeric view of the snapshot, provenance dropped
    pub fn values(&self) -> SnapshotValues {
        let value = |f: Option<FieldValue<f64>>| f.map(|f| f.value);
        SnapshotValues {
            nitrogen: value(self.nitrogen),
            phosphorus: value(self.phosphorus),
            potassium: value(self.potassium),
            ph: value(self.ph),
            moisture: value(self.moisture),
            temperature: value(self.temperature),
            humidity: value(self.humidity),
            ndvi: value(self.ndvi),
        }
    }

    /// Fill every unknown value with the documented advisory defaults
    pub fn with_defaults(&self) -> AdvisoryInputs {
        self.values().with_defaults(&AdvisoryInputs::default())
    }

    /// Names of the measurements that are still unknown
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let v = self.values();
        [
            ("nitrogen", v.nitrogen),
            ("phosphorus", v.phosphorus),
            ("potassium", v.potassium),
            ("ph", v.ph),
            ("moisture", v.moisture),
            ("temperature", v.temperature),
            ("humidity", v.humidity),
            ("ndvi", v.ndvi),
        ]
        .into_iter()
        .filter_map(|(name, value)| value.is_none().then_some(name))
        .collect()
    }
}

/// Optional numeric measurements without provenance
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct SnapshotValues {
    pub nitrogen: Option<f64>,
    pub phosphorus: Option<f64>,
    pub potassium: Option<f64>,
    pub ph: Option<f64>,
    pub moisture: Option<f64>,
    pub temperature: Option<f64>,
    pub humidity: Option<f64>,
    pub ndvi: Option<f64>,
}

impl SnapshotValues {
    /// Substitute `defaults` for every absent (or non-finite) value
    pub fn with_defaults(&self, defaults: &AdvisoryInputs) -> AdvisoryInputs {
        let pick = |v: Option<f64>, d: f64| v.filter(|v| v.is_finite()).unwrap_or(d);
        AdvisoryInputs {
            nitrogen: pick(self.nitrogen, defaults.nitrogen),
            phosphorus: pick(self.phosphorus, defaults.phosphorus),
            potassium: pick(self.potassium, defaults.potassium),
            ph: pick(self.ph, defaults.ph),
            moisture: pick(self.moisture, defaults.moisture),
            temperature: pick(self.temperature, defaults.temperature),
            humidity: pick(self.humidity, defaults.humidity),
            ndvi: pick(self.ndvi, defaults.ndvi),
        }
    }
}

/// Fully populated numeric bundle consumed by the advisory composer
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct AdvisoryInputs {
    pub nitrogen: f64,
    pub phosphorus: f64,
    pub potassium: f64,
    pub ph: f64,
    pub moisture: f64,
    pub temperature: f64,
    pub humidity: f64,
    pub ndvi: f64,
}

impl Default for AdvisoryInputs {
    /// Documented substitutes for unknown measurements
    fn default() -> Self {
        Self {
            nitrogen: 40.0,
            phosphorus: 25.0,
            potassium: 150.0,
            ph: 6.8,
            moisture: 50.0,
            temperature: 28.0,
            // Humidity feeds no rule; the midpoint keeps the bundle total.
            humidity: 60.0,
            ndvi: 0.5,
        }
    }
}
