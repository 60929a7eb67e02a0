use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::{
    ml::ModelError, predictor::InputError, report::ReportError, weather::WeatherError,
};

/// API error types that can be returned from handlers
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Model not found. Please provide a trained model artifact before predicting.")]
    ModelUnavailable,

    #[error("Error fetching weather data: {0}")]
    WeatherUnavailable(String),

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("Internal server error: {0}")]
    InternalError(String),
}

/// Error response that gets serialized to JSON
#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
}

impl ApiError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) | ApiError::ValidationError(_) => StatusCode::BAD_REQUEST,
            ApiError::ModelUnavailable | ApiError::ServiceUnavailable(_) => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            ApiError::WeatherUnavailable(_) => StatusCode::BAD_GATEWAY,
            ApiError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error type string
    fn error_type(&self) -> &'static str {
        match self {
            ApiError::BadRequest(_) => "BadRequest",
            ApiError::ValidationError(_) => "ValidationError",
            ApiError::ModelUnavailable => "ModelUnavailable",
            ApiError::WeatherUnavailable(_) => "WeatherUnavailable",
            ApiError::ServiceUnavailable(_) => "ServiceUnavailable",
            ApiError::InternalError(_) => "InternalServerError",
        }
    }

    /// Message safe to show to the user.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::InternalError(_) => "An internal error occurred".to_string(),
            _ => self.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        match &self {
            ApiError::InternalError(_) => tracing::error!(error = %self, "API error occurred"),
            ApiError::ModelUnavailable
            | ApiError::WeatherUnavailable(_)
            | ApiError::ServiceUnavailable(_) => {
                tracing::warn!(error = %self, "Dependency unavailable")
            }
            _ => tracing::debug!(error = %self, "Client error"),
        }

        let error_response = ErrorResponse {
            error: self.error_type().to_string(),
            message: self.user_message(),
        };

        (status, Json(error_response)).into_response()
    }
}

impl From<WeatherError> for ApiError {
    fn from(error: WeatherError) -> Self {
        match error {
            WeatherError::EmptyLocation => ApiError::BadRequest(error.to_string()),
            WeatherError::MissingApiKey => ApiError::ServiceUnavailable(error.to_string()),
            _ => ApiError::WeatherUnavailable(error.to_string()),
        }
    }
}

impl From<InputError> for ApiError {
    fn from(error: InputError) -> Self {
        ApiError::ValidationError(error.to_string())
    }
}

impl From<ModelError> for ApiError {
    fn from(error: ModelError) -> Self {
        ApiError::InternalError(error.to_string())
    }
}

impl From<ReportError> for ApiError {
    fn from(error: ReportError) -> Self {
        ApiError::InternalError(error.to_string())
    }
}
