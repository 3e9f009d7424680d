//! Snapshot merger: stored reading plus live provider fill-in
//!
//! The stored reading is trusted as a whole or not at all. Gaps in
//! temperature/humidity and NDVI are then filled by one concurrent call per
//! provider, each under its own timeout. Provider failures never escape the
//! merge; the affected fields simply stay unknown.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use shared::{FarmSnapshot, FieldValue, GpsCoordinates, SensorReading};
use tokio::time::timeout;

use crate::external::{CurrentConditions, ProviderError, VegetationIndexProvider, WeatherProvider};

/// Reference location and per-provider call budgets
#[derive(Debug, Clone, Copy)]
pub struct MergeSettings {
    pub default_location: GpsCoordinates,
    pub weather_timeout: Duration,
    pub vegetation_timeout: Duration,
}

/// Snapshot seeded from the stored reading, before any provider call.
///
/// A reading whose nitrogen, phosphorus and temperature are all absent or
/// non-positive is ignored entirely, location included.
pub fn seed_snapshot(reading: Option<&SensorReading>, default_location: GpsCoordinates) -> FarmSnapshot {
    let fallback = FieldValue::defaulted(default_location);

    let Some(reading) = reading.filter(|r| r.is_meaningful()) else {
        return FarmSnapshot::unknown_at(fallback);
    };

    let stored = |v: Option<f64>| v.filter(|v| v.is_finite()).map(FieldValue::stored);

    FarmSnapshot {
        nitrogen: stored(reading.n_value),
        phosphorus: stored(reading.p_value),
        potassium: stored(reading.k_value),
        ph: stored(reading.soil_ph),
        moisture: stored(reading.soil_moisture),
        temperature: stored(reading.temperature),
        humidity: stored(reading.humidity),
        ndvi: stored(reading.ndvi),
        location: reading
            .coordinates()
            .map(FieldValue::stored)
            .unwrap_or(fallback),
        observed_at: reading.created_at.map(FieldValue::stored),
    }
}

/// Fill still-absent weather fields; stored values are never replaced
fn apply_weather(snapshot: &mut FarmSnapshot, conditions: &CurrentConditions) {
    if snapshot.temperature.is_none() && conditions.temperature.is_finite() {
        snapshot.temperature = Some(FieldValue::fetched(conditions.temperature));
    }
    if snapshot.humidity.is_none() && conditions.humidity.is_finite() {
        snapshot.humidity = Some(FieldValue::fetched(conditions.humidity));
    }
}

fn apply_ndvi(snapshot: &mut FarmSnapshot, ndvi: f64) {
    if snapshot.ndvi.is_none() && ndvi.is_finite() {
        snapshot.ndvi = Some(FieldValue::fetched(ndvi));
    }
}

/// Run a provider call under its own budget; elapsing counts as a failure
async fn bounded<T>(
    budget: Duration,
    call: impl Future<Output = Result<T, ProviderError>>,
) -> Result<T, ProviderError> {
    timeout(budget, call)
        .await
        .unwrap_or(Err(ProviderError::Timeout(budget)))
}

/// Merges the stored reading with live weather and vegetation data
#[derive(Clone)]
pub struct SnapshotMerger {
    weather: Arc<dyn WeatherProvider>,
    vegetation: Arc<dyn VegetationIndexProvider>,
    settings: MergeSettings,
}

impl SnapshotMerger {
    pub fn new(
        weather: Arc<dyn WeatherProvider>,
        vegetation: Arc<dyn VegetationIndexProvider>,
        settings: MergeSettings,
    ) -> Self {
        Self {
            weather,
            vegetation,
            settings,
        }
    }

    async fn fetch_weather(&self, location: GpsCoordinates) -> Option<CurrentConditions> {
        let budget = self.settings.weather_timeout;
        match bounded(budget, self.weather.current_conditions(location)).await {
            Ok(conditions) => Some(conditions),
            Err(e) => {
                tracing::warn!(provider = "weather", error = %e, "Weather fetch failed; temperature/humidity remain unknown");
                None
            }
        }
    }

    async fn fetch_ndvi(&self, location: GpsCoordinates) -> Option<f64> {
        let budget = self.settings.vegetation_timeout;
        match bounded(budget, self.vegetation.ndvi(location)).await {
            Ok(ndvi) => Some(ndvi),
            Err(e) => {
                tracing::warn!(provider = "vegetation", error = %e, "NDVI fetch failed; ndvi remains unknown");
                None
            }
        }
    }

    /// Build the farm snapshot for one request
    pub async fn merge(&self, reading: Option<SensorReading>) -> FarmSnapshot {
        let mut snapshot = seed_snapshot(reading.as_ref(), self.settings.default_location);
        let location = snapshot.location.value;

        let needs_weather = snapshot.temperature.is_none() || snapshot.humidity.is_none();
        let needs_ndvi = snapshot.ndvi.is_none();

        let weather = async {
            if needs_weather {
                self.fetch_weather(location).await
            } else {
                None
            }
        };
        let ndvi = async {
            if needs_ndvi {
                self.fetch_ndvi(location).await
            } else {
                None
            }
        };

        let (weather, ndvi) = tokio::join!(weather, ndvi);

        if let Some(conditions) = weather {
            apply_weather(&mut snapshot, &conditions);
        }
        if let Some(ndvi) = ndvi {
            apply_ndvi(&mut snapshot, ndvi);
        }

        let missing = snapshot.missing_fields();
        if !missing.is_empty() {
            tracing::debug!(?missing, "Snapshot merged with unknown fields");
        }

        snapshot
    }
}
