//! HTTP handlers for farm snapshot, status and advisory endpoints

use std::str::FromStr;

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use shared::{FarmSnapshot, Language};

use crate::error::{AppError, AppResult};
use crate::services::{AdvisoryMode, AdvisoryReport, FarmStatus};
use crate::AppState;

/// Query parameters for the advisory endpoint
#[derive(Debug, Deserialize)]
pub struct AdvisoryQuery {
    pub lang: Option<String>,
    #[serde(default)]
    pub mode: AdvisoryMode,
}

fn parse_language(lang: Option<&str>) -> AppResult<Language> {
    match lang {
        None => Ok(Language::default()),
        Some(code) => Language::from_str(code).map_err(|message| AppError::Validation {
            field: "lang".to_string(),
            message,
            message_te: "భాష మద్దతు లేదు (en లేదా te ఉపయోగించండి)".to_string(),
        }),
    }
}

/// Merged farm snapshot with per-field provenance
pub async fn get_farm_snapshot(State(state): State<AppState>) -> Json<FarmSnapshot> {
    Json(state.advisory.snapshot().await)
}

/// Snapshot plus raw classification; unknown fields stay unknown
pub async fn get_farm_status(State(state): State<AppState>) -> Json<FarmStatus> {
    Json(state.advisory.status().await)
}

/// Localized advisory for the current farm state
pub async fn get_farm_advisory(
    State(state): State<AppState>,
    Query(query): Query<AdvisoryQuery>,
) -> AppResult<Json<AdvisoryReport>> {
    let language = parse_language(query.lang.as_deref())?;
    let report = state.advisory.advisory(language, query.mode).await;
    Ok(Json(report))
}
