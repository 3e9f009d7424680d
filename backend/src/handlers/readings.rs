//! HTTP handlers for IoT reading endpoints

use axum::{extract::State, http::StatusCode, Json};
use shared::{RecordReadingInput, SensorReading};

use crate::error::{AppError, AppResult};
use crate::services::ReadingService;
use crate::AppState;

/// Store a reading uploaded by a field device
pub async fn record_reading(
    State(state): State<AppState>,
    Json(input): Json<RecordReadingInput>,
) -> AppResult<(StatusCode, Json<SensorReading>)> {
    let service = ReadingService::new(state.db);
    let reading = service.record_reading(input).await?;
    Ok((StatusCode::CREATED, Json(reading)))
}

/// Most recent stored reading
pub async fn get_latest_reading(State(state): State<AppState>) -> AppResult<Json<SensorReading>> {
    let service = ReadingService::new(state.db);
    let reading = service
        .get_latest()
        .await?
        .ok_or_else(|| AppError::NotFound("IoT reading".to_string()))?;
    Ok(Json(reading))
}
