//! Weather API client for fetching current conditions
//!
//! Integrates with the OpenWeatherMap current weather endpoint

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use shared::GpsCoordinates;

use super::{CurrentConditions, ProviderError, WeatherProvider};
use crate::config::WeatherConfig;

/// Weather API client
#[derive(Clone)]
pub struct WeatherClient {
    client: Client,
    api_key: String,
    base_url: String,
}

/// OpenWeatherMap API response for current weather
#[derive(Debug, Deserialize)]
struct OWMCurrentResponse {
    main: OWMMain,
    #[serde(default)]
    weather: Vec<OWMWeather>,
    wind: Option<OWMWind>,
}

#[derive(Debug, Deserialize)]
struct OWMMain {
    temp: f64,
    humidity: f64,
}

#[derive(Debug, Deserialize)]
struct OWMWeather {
    description: String,
}

#[derive(Debug, Deserialize)]
struct OWMWind {
    speed: f64,
}

impl WeatherClient {
    pub fn new(config: &WeatherConfig) -> Self {
        Self::with_base_url(
            config.api_key.clone(),
            config.api_endpoint.clone(),
            config.timeout(),
        )
    }

    /// Create a WeatherClient against `base_url` (configured endpoint or a test server)
    pub fn with_base_url(api_key: String, base_url: String, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Fetch current weather conditions by GPS coordinates
    pub async fn get_current_weather(
        &self,
        location: GpsCoordinates,
    ) -> Result<CurrentConditions, ProviderError> {
        if self.api_key.trim().is_empty() {
            return Err(ProviderError::NotConfigured(
                "weather api_key".to_string(),
            ));
        }

        let url = format!("{}/weather", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[
                ("lat", location.latitude.to_string()),
                ("lon", location.longitude.to_string()),
                ("appid", self.api_key.clone()),
                ("units", "metric".to_string()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ProviderError::from_response(response).await);
        }

        let data: OWMCurrentResponse = response.json().await.map_err(|e| {
            ProviderError::Malformed(format!("Failed to parse weather response: {}", e))
        })?;

        Ok(Self::convert_current_response(data))
    }

    /// Convert OpenWeatherMap current response to our format
    fn convert_current_response(data: OWMCurrentResponse) -> CurrentConditions {
        CurrentConditions {
            temperature: data.main.temp,
            humidity: data.main.humidity,
            wind_speed: data.wind.map(|w| w.speed),
            condition: data.weather.into_iter().next().map(|w| w.description),
        }
    }
}

#[async_trait]
impl WeatherProvider for WeatherClient {
    async fn current_conditions(
        &self,
        location: GpsCoordinates,
    ) -> Result<CurrentConditions, ProviderError> {
        self.get_current_weather(location).await
    }
}
