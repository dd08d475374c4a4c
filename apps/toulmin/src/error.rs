//! # Application Errors
//!
//! One error type for the gateway and the CLI. Core errors pass through
//! unchanged; the HTTP mapping lives in [`AppError::status`].

use axum::{
    Json,
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use toulmin_core::ToulminError;

/// Errors raised outside the core.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Core(#[from] ToulminError),

    /// A request body lacks a field the endpoint needs.
    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("Argument not found: {0}")]
    ArgumentNotFound(String),

    /// The body could not be read as JSON of the expected shape.
    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    #[error("Invalid query string: {0}")]
    InvalidQuery(String),

    /// Verification found defects (CLI exit status).
    #[error("Argument graph is invalid: {0}")]
    InvalidStructure(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("Server error: {0}")]
    Server(String),
}

// =============================================================================
// HTTP MAPPING
// =============================================================================

/// `error_type` values, as seen by API clients.
pub const VALIDATION_ERROR: &str = "validation_error";
pub const GRAPH_ERROR: &str = "graph_error";
pub const INTERNAL_ERROR: &str = "internal_error";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub error_type: String,
    pub message: String,
}

/// Error body: `{"detail": {"error_type": ..., "message": ...}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub detail: ErrorDetail,
}

impl ErrorResponse {
    #[must_use]
    pub fn new(error_type: &str, message: impl Into<String>) -> Self {
        Self {
            detail: ErrorDetail {
                error_type: error_type.to_string(),
                message: message.into(),
            },
        }
    }
}

impl AppError {
    /// Status code and `error_type` for this error.
    #[must_use]
    pub fn status(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::Core(
                ToulminError::MalformedSubmission { .. }
                | ToulminError::TextTooLong { .. }
                | ToulminError::BatchTooLarge { .. }
                | ToulminError::InvalidWeight { .. }
                | ToulminError::EmptyText(_)
                | ToulminError::UnknownKind(_)
                | ToulminError::UnknownRelationType(_),
            )
            | AppError::MissingField(_)
            | AppError::ArgumentNotFound(_)
            | AppError::InvalidBody(_)
            | AppError::InvalidQuery(_)
            | AppError::InvalidStructure(_) => (StatusCode::UNPROCESSABLE_ENTITY, VALIDATION_ERROR),
            AppError::Core(
                ToulminError::DuplicateId(_)
                | ToulminError::UnknownEndpoint(_)
                | ToulminError::SelfLoop(_),
            ) => (StatusCode::BAD_REQUEST, GRAPH_ERROR),
            AppError::Core(ToulminError::SerializationError(_))
            | AppError::Io(_)
            | AppError::Json(_)
            | AppError::Config(_)
            | AppError::Server(_) => (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::InvalidBody(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::InvalidQuery(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_type) = self.status();
        if status.is_server_error() {
            tracing::error!("{}", self);
        } else {
            tracing::warn!("Request rejected: {}", self);
        }
        (status, Json(ErrorResponse::new(error_type, self.to_string()))).into_response()
    }
}
