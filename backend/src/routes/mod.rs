//! Route definitions for the Smart Agri Advisory platform

use axum::{
    routing::{get, post},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/farm", farm_routes())
        .nest("/readings", reading_routes())
        .route("/recommendations", post(handlers::create_recommendation))
        // Direct provider lookups
        .route("/weather", get(handlers::get_weather))
        .route("/ndvi", get(handlers::get_ndvi))
}

/// Merged snapshot, classification and advisory
fn farm_routes() -> Router<AppState> {
    Router::new()
        .route("/snapshot", get(handlers::get_farm_snapshot))
        .route("/status", get(handlers::get_farm_status))
        .route("/advisory", get(handlers::get_farm_advisory))
}

/// IoT reading upload and lookup
fn reading_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(handlers::record_reading))
        .route("/latest", get(handlers::get_latest_reading))
}
