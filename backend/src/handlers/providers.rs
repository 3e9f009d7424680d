//! HTTP handlers for direct weather and NDVI lookups
//!
//! Provider failures are reported in the body as `success: false`, never as
//! an HTTP error.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use shared::{validate_coordinates, GpsCoordinates};

use crate::error::{AppError, AppResult};
use crate::AppState;

/// Query parameters for point lookups
#[derive(Debug, Deserialize)]
pub struct LocationQuery {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl LocationQuery {
    fn coordinates(&self) -> AppResult<GpsCoordinates> {
        let (Some(latitude), Some(longitude)) = (self.latitude, self.longitude) else {
            return Err(AppError::Validation {
                field: "latitude,longitude".to_string(),
                message: "Latitude and longitude are required".to_string(),
                message_te: "అక్షాంశం మరియు రేఖాంశం తప్పనిసరి".to_string(),
            });
        };

        validate_coordinates(latitude, longitude).map_err(|message| AppError::Validation {
            field: "latitude,longitude".to_string(),
            message: message.to_string(),
            message_te: "చెల్లని GPS స్థానం".to_string(),
        })?;

        Ok(GpsCoordinates::new(latitude, longitude))
    }
}

#[derive(Debug, Serialize)]
pub struct WeatherResponse {
    pub success: bool,
    pub temperature: Option<f64>,
    pub humidity: Option<f64>,
    pub wind: Option<f64>,
    pub condition: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct NdviResponse {
    pub success: bool,
    pub ndvi: Option<f64>,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Current weather at a point
pub async fn get_weather(
    State(state): State<AppState>,
    Query(query): Query<LocationQuery>,
) -> AppResult<Json<WeatherResponse>> {
    let location = query.coordinates()?;

    let response = match state.weather.current_conditions(location).await {
        Ok(conditions) => WeatherResponse {
            success: true,
            temperature: Some(conditions.temperature),
            humidity: Some(conditions.humidity),
            wind: conditions.wind_speed,
            condition: conditions.condition,
            error: None,
        },
        Err(e) => {
            tracing::warn!(error = %e, "Weather lookup failed");
            WeatherResponse {
                success: false,
                temperature: None,
                humidity: None,
                wind: None,
                condition: None,
                error: Some(e.to_string()),
            }
        }
    };

    Ok(Json(response))
}

/// Normalized NDVI around a point
pub async fn get_ndvi(
    State(state): State<AppState>,
    Query(query): Query<LocationQuery>,
) -> AppResult<Json<NdviResponse>> {
    let location = query.coordinates()?;

    let (ndvi, error) = match state.vegetation.ndvi(location).await {
        Ok(ndvi) => (Some(ndvi), None),
        Err(e) => {
            tracing::warn!(error = %e, "NDVI lookup failed");
            (None, Some(e.to_string()))
        }
    };

    Ok(Json(NdviResponse {
        success: ndvi.is_some(),
        ndvi,
        latitude: location.latitude,
        longitude: location.longitude,
        error,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_coordinates_rejected() {
        let query = LocationQuery {
            latitude: Some(17.0),
            longitude: None,
        };
        assert!(matches!(
            query.coordinates(),
            Err(AppError::Validation { .. })
        ));
    }

    #[test]
    fn test_out_of_range_coordinates_rejected() {
        let query = LocationQuery {
            latitude: Some(95.0),
            longitude: Some(78.0),
        };
        assert!(query.coordinates().is_err());
    }

    #[test]
    fn test_valid_coordinates_accepted() {
        let query = LocationQuery {
            latitude: Some(17.4065),
            longitude: Some(78.4772),
        };
        assert_eq!(query.coordinates().unwrap(), GpsCoordinates::new(17.4065, 78.4772));
    }

    #[test]
    fn test_failed_lookup_serializes_error() {
        let body = serde_json::to_value(NdviResponse {
            success: false,
            ndvi: None,
            latitude: 1.0,
            longitude: 2.0,
            error: Some("timed out".to_string()),
        })
        .unwrap();
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "timed out");
    }
}
