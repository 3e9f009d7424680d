//! Error handling for the Smart Agri Advisory server
//!
//! Provides consistent error responses in English and Telugu

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use shared::ProfileRequestError;
use thiserror::Error;

use crate::external::ProviderError;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Validation errors
    #[error("Validation error: {message}")]
    Validation {
        field: String,
        message: String,
        message_te: String,
    },

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    // External service errors
    #[error("Completion provider error ({status:?}): {body}")]
    CompletionProvider { status: Option<u16>, body: String },

    #[error("Configuration error: {0}")]
    Configuration(String),

    // Database errors
    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    // Internal errors
    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Internal server error")]
    InternalError(#[from] anyhow::Error),
}

/// Error response structure
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message_en: String,
    pub message_te: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider_status: Option<u16>,
}

impl From<ProfileRequestError> for AppError {
    fn from(err: ProfileRequestError) -> Self {
        let message_te = match err {
            ProfileRequestError::MissingCropType => "పంట రకం తప్పనిసరి",
            ProfileRequestError::MissingSoilType => "నేల రకం తప్పనిసరి",
        };
        AppError::Validation {
            field: err.field().to_string(),
            message: err.to_string(),
            message_te: message_te.to_string(),
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::ValidationError(errors.to_string())
    }
}

impl AppError {
    /// Map a completion client failure onto the profile-path error
    pub fn completion(err: ProviderError) -> Self {
        match err {
            ProviderError::NotConfigured(what) => AppError::Configuration(what),
            ProviderError::Http { status, body } => AppError::CompletionProvider {
                status: Some(status),
                body,
            },
            other => AppError::CompletionProvider {
                status: None,
                body: other.to_string(),
            },
        }
    }

    fn status_and_detail(&self) -> (StatusCode, ErrorDetail) {
        let detail = |code: &str, en: String, te: String, field: Option<String>| ErrorDetail {
            code: code.to_string(),
            message_en: en,
            message_te: te,
            field,
            provider_status: None,
        };

        match self {
            AppError::Validation {
                field,
                message,
                message_te,
            } => (
                StatusCode::BAD_REQUEST,
                detail(
                    "VALIDATION_ERROR",
                    message.clone(),
                    message_te.clone(),
                    Some(field.clone()),
                ),
            ),
            AppError::ValidationError(msg) => (
                StatusCode::BAD_REQUEST,
                detail(
                    "VALIDATION_ERROR",
                    msg.clone(),
                    format!("చెల్లని సమాచారం: {}", msg),
                    None,
                ),
            ),
            AppError::NotFound(resource) => (
                StatusCode::NOT_FOUND,
                detail(
                    "NOT_FOUND",
                    format!("{} not found", resource),
                    format!("{} కనుగొనబడలేదు", resource),
                    None,
                ),
            ),
            AppError::CompletionProvider { status, body } => {
                let mut d = detail(
                    "COMPLETION_PROVIDER_ERROR",
                    format!("AI provider error: {}", body),
                    format!("AI సేవలో లోపం: {}", body),
                    None,
                );
                d.provider_status = *status;
                (StatusCode::BAD_GATEWAY, d)
            }
            AppError::Configuration(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                detail(
                    "CONFIGURATION_ERROR",
                    format!("Configuration error: {}", msg),
                    format!("కాన్ఫిగరేషన్ లోపం: {}", msg),
                    None,
                ),
            ),
            AppError::DatabaseError(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                detail(
                    "DATABASE_ERROR",
                    "A database error occurred".to_string(),
                    "డేటాబేస్ లోపం సంభవించింది".to_string(),
                    None,
                ),
            ),
            AppError::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                detail(
                    "INTERNAL_ERROR",
                    msg.clone(),
                    "సర్వర్ అంతర్గత లోపం".to_string(),
                    None,
                ),
            ),
            AppError::InternalError(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                detail(
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                    "సర్వర్ అంతర్గత లోపం".to_string(),
                    None,
                ),
            ),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_detail) = self.status_and_detail();

        // Log the error for debugging
        tracing::error!("Error: {:?}", self);

        (status, Json(ErrorResponse { error: error_detail })).into_response()
    }
}

/// Result type alias for handlers
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_crop_type_is_bilingual_validation() {
        let err: AppError = ProfileRequestError::MissingCropType.into();
        let (status, detail) = err.status_and_detail();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(detail.field.as_deref(), Some("cropType"));
        assert_eq!(detail.message_en, "Crop type is required");
        assert_eq!(detail.message_te, "పంట రకం తప్పనిసరి");
    }

    #[test]
    fn test_completion_http_failure_keeps_status_and_body() {
        let err = AppError::completion(ProviderError::Http {
            status: 429,
            body: "rate limited".to_string(),
        });
        let (status, detail) = err.status_and_detail();
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(detail.provider_status, Some(429));
        assert!(detail.message_en.contains("rate limited"));
    }

    #[test]
    fn test_missing_credentials_is_configuration_error() {
        let err = AppError::completion(ProviderError::NotConfigured(
            "completion api_key".to_string(),
        ));
        assert!(matches!(err, AppError::Configuration(_)));
        let (status, _) = err.status_and_detail();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }
}
