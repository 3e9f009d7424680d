//! External API integrations
//!
//! Each provider sits behind an `async_trait` seam so the snapshot merger and
//! services can be exercised without a network.

pub mod completion;
pub mod satellite;
pub mod weather;

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use shared::GpsCoordinates;
use thiserror::Error;

pub use completion::CompletionClient;
pub use satellite::SentinelHubClient;
pub use weather::WeatherClient;

/// Failure of a single outbound provider call
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ProviderError {
    #[error("request failed: {0}")]
    Transport(String),

    #[error("provider returned {status}: {body}")]
    Http { status: u16, body: String },

    #[error("unexpected response: {0}")]
    Malformed(String),

    #[error("timed out after {0:?}")]
    Timeout(Duration),

    #[error("not configured: {0}")]
    NotConfigured(String),
}

impl ProviderError {
    /// Read status and body from a non-2xx response
    pub(crate) async fn from_response(response: reqwest::Response) -> Self {
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        ProviderError::Http { status, body }
    }
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        ProviderError::Transport(err.to_string())
    }
}

/// Current weather at a point
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CurrentConditions {
    /// Air temperature (°C)
    pub temperature: f64,
    /// Relative humidity (%)
    pub humidity: f64,
    /// Wind speed (m/s)
    pub wind_speed: Option<f64>,
    pub condition: Option<String>,
}

#[async_trait]
pub trait WeatherProvider: Send + Sync {
    async fn current_conditions(
        &self,
        location: GpsCoordinates,
    ) -> Result<CurrentConditions, ProviderError>;
}

#[async_trait]
pub trait VegetationIndexProvider: Send + Sync {
    /// Normalized NDVI in 0..=1
    async fn ndvi(&self, location: GpsCoordinates) -> Result<f64, ProviderError>;
}

#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Free-form reply text for a single user prompt
    async fn complete(&self, prompt: &str) -> Result<String, ProviderError>;
}
