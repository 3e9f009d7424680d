//! Smart Agri Advisory Platform - Backend Server
//!
//! Fuses stored IoT soil readings with live weather and satellite vegetation
//! data, classifies the farm state and serves English/Telugu advisories and
//! crop/soil recommendations.

use axum::{routing::get, Router};
use sqlx::postgres::PgPoolOptions;
use std::{net::SocketAddr, sync::Arc, time::Duration};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod error;
mod external;
mod handlers;
mod routes;
mod services;

pub use config::Config;

use external::{
    CompletionClient, CompletionProvider, SentinelHubClient, VegetationIndexProvider,
    WeatherClient, WeatherProvider,
};
use services::{AdvisoryService, MergeSettings, ReadingService, RecommendationService, SnapshotMerger};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub db: sqlx::PgPool,
    pub config: Arc<Config>,
    pub advisory: Arc<AdvisoryService>,
    pub recommendations: Arc<RecommendationService>,
    pub weather: Arc<dyn WeatherProvider>,
    pub vegetation: Arc<dyn VegetationIndexProvider>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "agri_server=debug,tower_http=debug,sqlx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = config::Config::load()?;

    tracing::info!("Starting Smart Agri Advisory Server");
    tracing::info!("Environment: {}", config.environment);

    // Create database connection pool
    tracing::info!("Connecting to database...");
    let db_pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .min_connections(config.database.min_connections)
        .acquire_timeout(Duration::from_secs(30))
        .connect(&config.database.url)
        .await?;

    tracing::info!("Database connection established");

    // Run migrations in development
    if config.environment == "development" {
        tracing::info!("Running database migrations...");
        sqlx::migrate!("./migrations").run(&db_pool).await?;
        tracing::info!("Migrations completed");
    }

    let state = build_state(db_pool, config.clone());

    // Build application
    let app = create_app(state);

    // Start server
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Wire provider clients and services from configuration
fn build_state(db: sqlx::PgPool, config: Config) -> AppState {
    let weather: Arc<dyn WeatherProvider> = Arc::new(WeatherClient::new(&config.weather));
    let vegetation: Arc<dyn VegetationIndexProvider> =
        Arc::new(SentinelHubClient::new(&config.satellite));

    let completion: Option<Arc<dyn CompletionProvider>> =
        match CompletionClient::from_config(&config.completion) {
            Some(client) => Some(Arc::new(client)),
            None => {
                tracing::warn!("Completion provider not configured; AI features will be unavailable");
                None
            }
        };

    let merger = SnapshotMerger::new(
        weather.clone(),
        vegetation.clone(),
        MergeSettings {
            default_location: config.farm.default_location(),
            weather_timeout: config.weather.timeout(),
            vegetation_timeout: config.satellite.timeout(),
        },
    );

    let advisory = AdvisoryService::new(
        Arc::new(ReadingService::new(db.clone())),
        merger,
        completion.clone(),
    );

    AppState {
        db,
        config: Arc::new(config),
        advisory: Arc::new(advisory),
        recommendations: Arc::new(RecommendationService::new(completion)),
        weather,
        vegetation,
    }
}

/// Create the application router with all routes and middleware
fn create_app(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .nest("/api/v1", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Root endpoint
async fn root() -> &'static str {
    "Smart Agri Advisory Platform API v1.0"
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
