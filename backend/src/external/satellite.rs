//! Sentinel Hub client for satellite vegetation index (NDVI)
//!
//! Token via OAuth2 client credentials, then one Process API request over a
//! small bounding box around the farm using recent Sentinel-2 L2A scenes.

use async_trait::async_trait;
use chrono::{Duration as ChronoDuration, Utc};
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};
use shared::GpsCoordinates;

use super::{ProviderError, VegetationIndexProvider};
use crate::config::SatelliteConfig;

/// Half-width of the bounding box in degrees (~500 m)
const BBOX_OFFSET: f64 = 0.005;

/// Days of imagery searched back from today
const LOOKBACK_DAYS: i64 = 10;

const MAX_CLOUD_COVERAGE: u8 = 30;

/// Raw NDVI mean used when no valid pixel is returned
const FALLBACK_RAW_NDVI: f64 = 0.5;

const NDVI_EVALSCRIPT: &str = r#"//VERSION=3
function setup() {
  return {
    input: ["B04", "B08", "dataMask"],
    output: { id: "default", bands: 1 }
  };
}

function evaluatePixel(sample) {
  let ndvi = (sample.B08 - sample.B04) / (sample.B08 + sample.B04);
  return [ndvi];
}
"#;

/// Sentinel Hub NDVI client
#[derive(Clone)]
pub struct SentinelHubClient {
    client: Client,
    token_url: String,
    process_url: String,
    client_id: String,
    client_secret: String,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

impl SentinelHubClient {
    pub fn new(config: &SatelliteConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            token_url: config.token_url.clone(),
            process_url: config.process_url.clone(),
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
        }
    }

    async fn access_token(&self) -> Result<String, ProviderError> {
        if self.client_id.trim().is_empty() || self.client_secret.trim().is_empty() {
            return Err(ProviderError::NotConfigured(
                "satellite client credentials".to_string(),
            ));
        }

        let response = self
            .client
            .post(&self.token_url)
            .form(&[
                ("grant_type", "client_credentials"),
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.as_str()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ProviderError::from_response(response).await);
        }

        let token: TokenResponse = response.json().await.map_err(|e| {
            ProviderError::Malformed(format!("Failed to parse token response: {}", e))
        })?;
        Ok(token.access_token)
    }

    /// Process API body for an NDVI request around `location`
    fn process_request(location: GpsCoordinates) -> Value {
        let to = Utc::now();
        let from = to - ChronoDuration::days(LOOKBACK_DAYS);

        json!({
            "input": {
                "bounds": {
                    "bbox": location.bounding_box(BBOX_OFFSET),
                    "properties": { "crs": "http://www.opengis.net/def/crs/EPSG/0/4326" }
                },
                "data": [{
                    "type": "sentinel-2-l2a",
                    "dataFilter": {
                        "timeRange": {
                            "from": from.format("%Y-%m-%dT00:00:00Z").to_string(),
                            "to": to.format("%Y-%m-%dT23:59:59Z").to_string()
                        },
                        "maxCloudCoverage": MAX_CLOUD_COVERAGE
                    }
                }]
            },
            "output": {
                "width": 100,
                "height": 100,
                "responses": [{ "identifier": "default", "format": { "type": "application/json" } }]
            },
            "evalscript": NDVI_EVALSCRIPT
        })
    }

    /// Fetch the normalized NDVI for a point
    pub async fn fetch_ndvi(&self, location: GpsCoordinates) -> Result<f64, ProviderError> {
        let token = self.access_token().await?;

        let response = self
            .client
            .post(&self.process_url)
            .bearer_auth(token)
            .header("Accept", "application/json")
            .json(&Self::process_request(location))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ProviderError::from_response(response).await);
        }

        let body: Value = response.json().await.map_err(|e| {
            ProviderError::Malformed(format!("Failed to parse NDVI response: {}", e))
        })?;

        Ok(summarize_ndvi(&body))
    }
}

/// Mean NDVI of `data[0].default`, normalized from -1..1 to 0..1.
///
/// Values outside -1..1 are ignored. With no valid value the raw mean is 0.5.
/// The result is clamped and rounded to three decimals.
pub fn summarize_ndvi(body: &Value) -> f64 {
    let values: Vec<f64> = body
        .get("data")
        .and_then(|d| d.get(0))
        .and_then(|first| first.get("default"))
        .and_then(Value::as_array)
        .map(|raw| {
            raw.iter()
                .filter_map(Value::as_f64)
                .filter(|v| v.is_finite() && (-1.0..=1.0).contains(v))
                .collect()
        })
        .unwrap_or_default();

    let mean = if values.is_empty() {
        FALLBACK_RAW_NDVI
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    };

    let normalized = ((mean + 1.0) / 2.0).clamp(0.0, 1.0);
    (normalized * 1000.0).round() / 1000.0
}

#[async_trait]
impl VegetationIndexProvider for SentinelHubClient {
    async fn ndvi(&self, location: GpsCoordinates) -> Result<f64, ProviderError> {
        self.fetch_ndvi(location).await
    }
}
