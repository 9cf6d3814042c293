//! Error types and error handling for the application
//!
//! This module defines custom error types that can be converted to HTTP responses.
//! All errors implement `IntoResponse` to provide consistent error formatting.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Application-level error types
///
/// Each variant implements automatic conversion to HTTP responses via `IntoResponse`.
#[derive(Error, Debug)]
pub enum AppError {
    /// Agent with the given ID was not found
    #[error("Agent not found: {0}")]
    AgentNotFound(String),

    /// Agent payload is invalid
    #[error("Invalid agent configuration: {0}")]
    InvalidAgentConfig(String),

    /// Listing parameters are invalid
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    /// The operation is not allowed for this agent
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Error occurred during state persistence
    #[error("Persistence error: {0}")]
    Persistence(#[from] crate::state::PersistenceError),

    /// Internal server error (catch-all for unexpected errors)
    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// HTTP status code the error maps to
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::AgentNotFound(_) => StatusCode::NOT_FOUND,
            AppError::InvalidAgentConfig(_) => StatusCode::BAD_REQUEST,
            AppError::InvalidQuery(_) => StatusCode::BAD_REQUEST,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::Persistence(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        }

        let body = Json(json!({
            "error": self.to_string(),
            "status": status.as_u16(),
        }));

        (status, body).into_response()
    }
}
