use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    /// A route-level failure with a caller-facing message and the underlying cause.
    #[error("{message}: {detail}")]
    Failed {
        message: String,
        detail: anyhow::Error,
    },

    #[error("Internal server error: {0}")]
    InternalError(#[from] anyhow::Error),

    #[error("Database error: {0}")]
    DatabaseError(anyhow::Error),

    #[error("Database not connected")]
    DatabaseUnavailable,

    #[error("Configuration error: {0}")]
    ConfigError(anyhow::Error),
}

impl AppError {
    /// Wrap an error with the message shown to the HTTP caller.
    pub fn failed(message: impl Into<String>, err: impl Into<anyhow::Error>) -> Self {
        AppError::Failed {
            message: message.into(),
            detail: err.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::DatabaseUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Failed { .. }
            | AppError::InternalError(_)
            | AppError::DatabaseError(_)
            | AppError::ConfigError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::ConfigError(anyhow::Error::new(err))
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::InternalError(anyhow::Error::new(err))
    }
}

impl From<mongodb::error::Error> for AppError {
    fn from(err: mongodb::error::Error) -> Self {
        AppError::DatabaseError(anyhow::Error::new(err))
    }
}

/// JSON body shared by every error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>, error: Option<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            error,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        let (message, error) = match self {
            AppError::ValidationError(err) => {
                ("Validation error".to_string(), Some(err.to_string()))
            }
            AppError::BadRequest(msg) => (msg, None),
            AppError::NotFound(msg) => (msg, None),
            AppError::Failed { message, detail } => (message, Some(detail.to_string())),
            AppError::InternalError(err) => {
                ("Internal server error".to_string(), Some(err.to_string()))
            }
            AppError::DatabaseError(err) => ("Database error".to_string(), Some(err.to_string())),
            AppError::DatabaseUnavailable => ("Database not connected".to_string(), None),
            AppError::ConfigError(err) => {
                ("Configuration error".to_string(), Some(err.to_string()))
            }
        };

        if status.is_server_error() {
            tracing::error!(status = %status, message = %message, error = ?error, "Request failed");
        }

        (status, Json(ErrorResponse::new(message, error))).into_response()
    }
}
