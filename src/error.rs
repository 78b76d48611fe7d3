// File: src/error.rs
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Startup failures. Any of these stops the process before it serves traffic.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read dictionary: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed dictionary csv: {0}")]
    Csv(#[from] csv::Error),

    #[error("dictionary is missing required column '{0}'")]
    MissingColumn(String),

    #[error("failed to fetch dictionary from {url}: {reason}")]
    Fetch { url: String, reason: String },

    #[error("invalid dictionary snapshot: {0}")]
    Snapshot(String),
}

/// Request-scoped failures surfaced by the HTTP handlers.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Internal(String),
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        (status, Json(ErrorBody { error: self.to_string() })).into_response()
    }
}
