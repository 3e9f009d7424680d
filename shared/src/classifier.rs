//! Threshold classification of farm measurements
//!
//! Pure, total functions: an absent or non-finite input is reported as
//! `Unknown` before any threshold is compared. Thresholds are carried in an
//! explicit [`Thresholds`] value so callers and tests can override them.

use serde::{Deserialize, Serialize};

use crate::models::{
    AdvisoryInputs, CropHealth, FarmSnapshot, MoistureStatus, NutrientStatus, PestRisk, PhStatus,
    SnapshotValues, StatusReport,
};

/// Position of a value relative to a closed band `[low, high]`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BandPosition {
    Below,
    Within,
    Above,
}

/// Closed acceptance band; both bounds belong to the middle category
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Band {
    pub low: f64,
    pub high: f64,
}

impl Band {
    pub const fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }

    pub fn position(&self, value: f64) -> BandPosition {
        if value < self.low {
            BandPosition::Below
        } else if value > self.high {
            BandPosition::Above
        } else {
            BandPosition::Within
        }
    }
}

/// Pest pressure trigger: both limits must be strictly exceeded
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct PestTrigger {
    pub temperature_above: f64,
    pub moisture_above: f64,
}

impl PestTrigger {
    fn fires(&self, temperature: f64, moisture: f64) -> bool {
        temperature > self.temperature_above && moisture > self.moisture_above
    }
}

/// Category thresholds for every classified quantity
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Thresholds {
    /// Nitrogen (mg/kg)
    pub nitrogen: Band,
    /// Phosphorus (mg/kg)
    pub phosphorus: Band,
    /// Potassium (mg/kg)
    pub potassium: Band,
    pub ph: Band,
    /// Soil moisture (%)
    pub moisture: Band,
    pub pest_high: PestTrigger,
    pub pest_medium: PestTrigger,
    /// NDVI strictly above this is healthy
    pub ndvi_healthy: f64,
    /// NDVI strictly above this (and not healthy) is improving
    pub ndvi_improving: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            nitrogen: Band::new(40.0, 60.0),
            phosphorus: Band::new(20.0, 40.0),
            potassium: Band::new(150.0, 250.0),
            ph: Band::new(6.0, 7.5),
            moisture: Band::new(35.0, 65.0),
            pest_high: PestTrigger {
                temperature_above: 30.0,
                moisture_above: 60.0,
            },
            pest_medium: PestTrigger {
                temperature_above: 25.0,
                moisture_above: 50.0,
            },
            ndvi_healthy: 0.6,
            ndvi_improving: 0.4,
        }
    }
}

fn known(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}

/// Classify a nutrient concentration against its band
pub fn classify_nutrient(value: Option<f64>, band: &Band) -> NutrientStatus {
    match known(value).map(|v| band.position(v)) {
        None => NutrientStatus::Unknown,
        Some(BandPosition::Below) => NutrientStatus::Low,
        Some(BandPosition::Within) => NutrientStatus::Good,
        Some(BandPosition::Above) => NutrientStatus::High,
    }
}

pub fn classify_ph(value: Option<f64>, thresholds: &Thresholds) -> PhStatus {
    match known(value).map(|v| thresholds.ph.position(v)) {
        None => PhStatus::Unknown,
        Some(BandPosition::Below) => PhStatus::Acidic,
        Some(BandPosition::Within) => PhStatus::Neutral,
        Some(BandPosition::Above) => PhStatus::Alkaline,
    }
}

pub fn classify_moisture(value: Option<f64>, thresholds: &Thresholds) -> MoistureStatus {
    match known(value).map(|v| thresholds.moisture.position(v)) {
        None => MoistureStatus::Unknown,
        Some(BandPosition::Below) => MoistureStatus::Dry,
        Some(BandPosition::Within) => MoistureStatus::Normal,
        Some(BandPosition::Above) => MoistureStatus::Wet,
    }
}

/// Pest risk needs both temperature and soil moisture
pub fn classify_pest_risk(
    temperature: Option<f64>,
    moisture: Option<f64>,
    thresholds: &Thresholds,
) -> PestRisk {
    let (Some(temperature), Some(moisture)) = (known(temperature), known(moisture)) else {
        return PestRisk::Unknown;
    };

    if thresholds.pest_high.fires(temperature, moisture) {
        PestRisk::High
    } else if thresholds.pest_medium.fires(temperature, moisture) {
        PestRisk::Medium
    } else {
        PestRisk::Low
    }
}

pub fn classify_crop_health(ndvi: Option<f64>, thresholds: &Thresholds) -> CropHealth {
    match known(ndvi) {
        None => CropHealth::Unknown,
        Some(v) if v > thresholds.ndvi_healthy => CropHealth::Healthy,
        Some(v) if v > thresholds.ndvi_improving => CropHealth::Improving,
        Some(_) => CropHealth::Stress,
    }
}

/// Classify plain optional values
pub fn classify_values(values: &SnapshotValues, thresholds: &Thresholds) -> StatusReport {
    StatusReport {
        nitrogen: classify_nutrient(values.nitrogen, &thresholds.nitrogen),
        phosphorus: classify_nutrient(values.phosphorus, &thresholds.phosphorus),
        potassium: classify_nutrient(values.potassium, &thresholds.potassium),
        ph: classify_ph(values.ph, thresholds),
        moisture: classify_moisture(values.moisture, thresholds),
        pest_risk: classify_pest_risk(values.temperature, values.moisture, thresholds),
        crop_health: classify_crop_health(values.ndvi, thresholds),
    }
}

/// Raw status display for a snapshot; unknown fields stay `Unknown`
pub fn classify(snapshot: &FarmSnapshot, thresholds: &Thresholds) -> StatusReport {
    classify_values(&snapshot.values(), thresholds)
}

/// Classification of a defaulted bundle; never yields `Unknown` for finite inputs
pub fn classify_inputs(inputs: &AdvisoryInputs, thresholds: &Thresholds) -> StatusReport {
    classify_values(
        &SnapshotValues {
            nitrogen: Some(inputs.nitrogen),
            phosphorus: Some(inputs.phosphorus),
            potassium: Some(inputs.potassium),
            ph: Some(inputs.ph),
            moisture: Some(inputs.moisture),
            temperature: Some(inputs.temperature),
            humidity: Some(inputs.humidity),
            ndvi: Some(inputs.ndvi),
        },
        thresholds,
    )
}
