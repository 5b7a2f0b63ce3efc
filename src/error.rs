//! Typed errors and HTTP mapping.

use crate::model::ValidationError;
use crate::response::ErrorEnvelope;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

/// Message returned for every 500; the cause is only logged.
pub const UNEXPECTED_FAILURE: &str = "An error occurred while processing the request";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid value for {key}: '{value}'")]
    Invalid { key: &'static str, value: String },
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("{0}")]
    NotFound(String),
    #[error("missing fields: {}", .0.join(", "))]
    MissingFields(Vec<String>),
    /// Invariant violation on create; rendered as `{"errors": [..]}`.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// Invariant violation on PATCH; rendered as `{"error": ..}`.
    #[error("{0}")]
    InvalidUpdate(String),
    #[error("Invalid 'hero_id' or 'power_id'")]
    InvalidReference,
    /// Unreadable request body; keeps the rejection's status (400, 413, 415).
    #[error("{message}")]
    Body { status: StatusCode, message: String },
    /// [`AppError::Body`] on PATCH; rendered as `{"error": ..}`.
    #[error("{message}")]
    UpdateBody { status: StatusCode, message: String },
    #[error("database: {0}")]
    Db(#[from] sqlx::Error),
    #[error("internal: {0}")]
    Internal(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::MissingFields(_)
            | AppError::Validation(_)
            | AppError::InvalidUpdate(_)
            | AppError::InvalidReference => StatusCode::BAD_REQUEST,
            AppError::Body { status, .. } | AppError::UpdateBody { status, .. } => *status,
            AppError::Config(_) | AppError::Db(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn envelope(&self) -> ErrorEnvelope {
        match self {
            AppError::NotFound(msg) | AppError::InvalidUpdate(msg) => ErrorEnvelope::single(msg.clone()),
            AppError::UpdateBody { message, .. } => ErrorEnvelope::single(message.clone()),
            AppError::MissingFields(fields) => ErrorEnvelope::many(fields.clone()),
            AppError::Validation(_) | AppError::InvalidReference | AppError::Body { .. } => {
                ErrorEnvelope::many(vec![self.to_string()])
            }
            AppError::Config(_) | AppError::Db(_) | AppError::Internal(_) => {
                ErrorEnvelope::many(vec![UNEXPECTED_FAILURE.to_string()])
            }
        }
    }

    /// Re-shape a body or validation failure for PATCH, which answers with the singular envelope.
    pub fn into_update_error(self) -> Self {
        match self {
            AppError::Body { status, message } => AppError::UpdateBody { status, message },
            AppError::Validation(e) => AppError::InvalidUpdate(e.to_string()),
            other => other,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        (status, Json(self.envelope())).into_response()
    }
}
