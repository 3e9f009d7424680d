//! HTTP handler for crop/soil profile recommendations

use axum::{extract::State, Json};
use shared::{RecommendationOutcome, RecommendationRequest};

use crate::error::AppResult;
use crate::AppState;

/// Structured recommendation, or the raw reply when it is not valid JSON
pub async fn create_recommendation(
    State(state): State<AppState>,
    Json(request): Json<RecommendationRequest>,
) -> AppResult<Json<RecommendationOutcome>> {
    let outcome = state.recommendations.recommend(&request).await?;
    Ok(Json(outcome))
}
