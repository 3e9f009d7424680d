//! IoT sensor reading store

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use shared::{RecordReadingInput, SensorReading};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;
use validator::Validate;

use crate::error::{AppError, AppResult};

/// Source of the most recent stored reading
#[async_trait]
pub trait ReadingStore: Send + Sync {
    async fn latest_reading(&self) -> AppResult<Option<SensorReading>>;
}

/// Reading service backed by the `iot_readings` table
#[derive(Clone)]
pub struct ReadingService {
    db: PgPool,
}

#[derive(Debug, FromRow)]
struct IotReadingRow {
    id: Uuid,
    n_value: Option<f64>,
    p_value: Option<f64>,
    k_value: Option<f64>,
    soil_ph: Option<f64>,
    soil_moisture: Option<f64>,
    temperature: Option<f64>,
    humidity: Option<f64>,
    ndvi: Option<f64>,
    latitude: Option<f64>,
    longitude: Option<f64>,
    created_at: DateTime<Utc>,
}

impl From<IotReadingRow> for SensorReading {
    fn from(row: IotReadingRow) -> Self {
        SensorReading {
            id: Some(row.id),
            n_value: row.n_value,
            p_value: row.p_value,
            k_value: row.k_value,
            soil_ph: row.soil_ph,
            soil_moisture: row.soil_moisture,
            temperature: row.temperature,
            humidity: row.humidity,
            ndvi: row.ndvi,
            latitude: row.latitude,
            longitude: row.longitude,
            created_at: Some(row.created_at),
        }
    }
}

const READING_COLUMNS: &str = "id, n_value, p_value, k_value, soil_ph, soil_moisture, \
     temperature, humidity, ndvi, latitude, longitude, created_at";

impl ReadingService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Most recent reading by `created_at`
    pub async fn get_latest(&self) -> AppResult<Option<SensorReading>> {
        let row = sqlx::query_as::<_, IotReadingRow>(&format!(
            "SELECT {} FROM iot_readings ORDER BY created_at DESC LIMIT 1",
            READING_COLUMNS
        ))
        .fetch_optional(&self.db)
        .await?;

        Ok(row.map(SensorReading::from))
    }

    /// Store an uploaded reading; absent fields are stored as NULL
    pub async fn record_reading(&self, input: RecordReadingInput) -> AppResult<SensorReading> {
        check_upload(&input)?;

        let row = sqlx::query_as::<_, IotReadingRow>(&format!(
            r#"
            INSERT INTO iot_readings
                (n_value, p_value, k_value, soil_ph, soil_moisture,
                 temperature, humidity, ndvi, latitude, longitude)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING {}
            "#,
            READING_COLUMNS
        ))
        .bind(input.n_value)
        .bind(input.p_value)
        .bind(input.k_value)
        .bind(input.soil_ph)
        .bind(input.soil_moisture)
        .bind(input.temperature)
        .bind(input.humidity)
        .bind(input.ndvi)
        .bind(input.latitude)
        .bind(input.longitude)
        .fetch_one(&self.db)
        .await?;

        tracing::info!(reading_id = %row.id, "Stored IoT reading");
        Ok(row.into())
    }
}

/// Reject empty uploads and out-of-range values before touching the database
fn check_upload(input: &RecordReadingInput) -> AppResult<()> {
    if input.is_empty() {
        return Err(AppError::Validation {
            field: "reading".to_string(),
            message: "At least one measurement is required".to_string(),
            message_te: "కనీసం ఒక కొలత అవసరం".to_string(),
        });
    }
    input.validate()?;
    Ok(())
}

#[async_trait]
impl ReadingStore for ReadingService {
    async fn latest_reading(&self) -> AppResult<Option<SensorReading>> {
        self.get_latest().await
    }
}
