//! Configuration management for the Smart Agri Advisory server
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (development.toml, production.toml)
//! 3. Environment variable overrides with AGRI_ prefix

use std::time::Duration;

use config::{ConfigError, Environment, File};
use serde::Deserialize;
use shared::GpsCoordinates;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Server configuration
    pub server: ServerConfig,

    /// Database configuration
    pub database: DatabaseConfig,

    /// Weather API configuration
    pub weather: WeatherConfig,

    /// Satellite vegetation index configuration
    pub satellite: SatelliteConfig,

    /// Chat completion provider configuration
    pub completion: CompletionConfig,

    /// Farm reference settings
    pub farm: FarmConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server port
    pub port: u16,

    /// Server host
    pub host: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    /// PostgreSQL connection URL
    pub url: String,

    /// Maximum number of connections in the pool
    pub max_connections: u32,

    /// Minimum number of connections in the pool
    pub min_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct WeatherConfig {
    /// Weather API endpoint
    pub api_endpoint: String,

    /// Weather API key
    pub api_key: String,

    /// Request timeout, also the per-call budget inside the snapshot merge
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SatelliteConfig {
    /// OAuth2 token endpoint
    pub token_url: String,

    /// Process API endpoint
    pub process_url: String,

    pub client_id: String,

    pub client_secret: String,

    /// Per-call budget inside the snapshot merge
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CompletionConfig {
    /// Base URL of an OpenAI-compatible API, without `/chat/completions`
    pub base_url: String,

    pub api_key: String,

    pub model: String,

    pub temperature: f32,

    pub max_tokens: u32,

    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct FarmConfig {
    /// Reference latitude used when no reading carries a location
    pub default_latitude: f64,

    /// Reference longitude used when no reading carries a location
    pub default_longitude: f64,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment =
            std::env::var("AGRI_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("server.port", 3000)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("database.max_connections", 10)?
            .set_default("database.min_connections", 2)?
            .set_default("weather.api_endpoint", "https://api.openweathermap.org/data/2.5")?
            .set_default("weather.api_key", "")?
            .set_default("weather.timeout_secs", 10)?
            .set_default(
                "satellite.token_url",
                "https://services.sentinel-hub.com/oauth/token",
            )?
            .set_default(
                "satellite.process_url",
                "https://services.sentinel-hub.com/api/v1/process",
            )?
            .set_default("satellite.client_id", "")?
            .set_default("satellite.client_secret", "")?
            .set_default("satellite.timeout_secs", 10)?
            .set_default("completion.base_url", "")?
            .set_default("completion.api_key", "")?
            .set_default("completion.model", "google/gemini-2.5-flash")?
            .set_default("completion.temperature", 0.7)?
            .set_default("completion.max_tokens", 2000)?
            .set_default("completion.timeout_secs", 60)?
            .set_default("farm.default_latitude", 17.4065)?
            .set_default("farm.default_longitude", 78.4772)?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (AGRI_ prefix)
            .add_source(
                Environment::with_prefix("AGRI")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

impl WeatherConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl SatelliteConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl CompletionConfig {
    /// Both the endpoint and the key are required to call the provider
    pub fn is_configured(&self) -> bool {
        !self.base_url.trim().is_empty() && !self.api_key.trim().is_empty()
    }
}

impl FarmConfig {
    pub fn default_location(&self) -> GpsCoordinates {
        GpsCoordinates::new(self.default_latitude, self.default_longitude)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            host: "0.0.0.0".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_completion_requires_both_credentials() {
        let mut completion = CompletionConfig {
            base_url: "https://api.example.com/v1".to_string(),
            api_key: String::new(),
            model: "google/gemini-2.5-flash".to_string(),
            temperature: 0.7,
            max_tokens: 2000,
            timeout_secs: 60,
        };
        assert!(!completion.is_configured());
        completion.api_key = "key".to_string();
        assert!(completion.is_configured());
    }

    #[test]
    fn test_reference_location() {
        let farm = FarmConfig {
            default_latitude: 17.4065,
            default_longitude: 78.4772,
        };
        assert_eq!(farm.default_location(), GpsCoordinates::new(17.4065, 78.4772));
    }
}
