//! HTTP mapping for [`ComplianceError`].

use crate::utils::error::ComplianceError;
use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

impl ComplianceError {
    /// HTTP status and machine-readable error code.
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            Self::ValidationError { .. } => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            Self::NotFoundError { .. } => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            Self::ModelUnavailableError { .. } => (StatusCode::SERVICE_UNAVAILABLE, "MODEL_UNAVAILABLE"),
            Self::ModelResponseError { .. } | Self::ApiError(_) => (StatusCode::BAD_GATEWAY, "MODEL_ERROR"),
            Self::ConfigError { .. }
            | Self::MissingConfigError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::ConfigValidationError { .. } => (StatusCode::INTERNAL_SERVER_ERROR, "CONFIG_ERROR"),
            Self::IoError(_) => (StatusCode::INTERNAL_SERVER_ERROR, "IO_ERROR"),
            Self::SerializationError(_) => (StatusCode::INTERNAL_SERVER_ERROR, "SERIALIZATION_ERROR"),
            Self::ProcessingError { .. } => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        }
    }

    /// Server-side details stay in the logs; client errors pass through.
    fn response_message(&self) -> String {
        match self {
            Self::ValidationError { message }
            | Self::NotFoundError { message }
            | Self::ModelUnavailableError { message } => message.clone(),
            Self::ModelResponseError { .. } | Self::ApiError(_) => {
                "Generative model request failed".to_string()
            }
            Self::ConfigError { .. }
            | Self::MissingConfigError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::ConfigValidationError { .. } => "Server configuration error".to_string(),
            Self::IoError(_) => "IO operation failed".to_string(),
            Self::SerializationError(_) => "Could not encode response".to_string(),
            Self::ProcessingError { .. } => "Internal server error".to_string(),
        }
    }
}

impl IntoResponse for ComplianceError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();
        let message = self.response_message();

        if status.is_server_error() {
            tracing::error!(error = %self, code = code, "Request error");
        } else {
            tracing::warn!(error = %self, code = code, "Request rejected");
        }

        (status, Json(json!({ "code": code, "message": message }))).into_response()
    }
}

impl From<JsonRejection> for ComplianceError {
    fn from(rejection: JsonRejection) -> Self {
        Self::ValidationError {
            message: rejection.body_text(),
        }
    }
}

impl From<QueryRejection> for ComplianceError {
    fn from(rejection: QueryRejection) -> Self {
        Self::ValidationError {
            message: rejection.body_text(),
        }
    }
}
