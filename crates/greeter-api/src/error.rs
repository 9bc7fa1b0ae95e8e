//! # API Error Types
//!
//! Request-tier errors implementing `axum::response::IntoResponse`.
//! Bodies are fixed plain-text strings; the underlying store error is logged
//! for operators and never returned to the client.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use greeter_store::StoreError;
use thiserror::Error;

/// Body returned when the greeting cannot be read.
pub const INTERNAL_ERROR_BODY: &str = "Internal Server Error\n";
/// Body returned when the health probe fails.
pub const UNAVAILABLE_BODY: &str = "Database connection failed\n";

/// Application-level error type for route handlers.
#[derive(Error, Debug)]
pub enum AppError {
    /// Reading the current greeting failed (500).
    #[error("greeting lookup failed: {0}")]
    Greeting(#[source] StoreError),

    /// The store did not answer the liveness probe (503).
    #[error("store unreachable: {0}")]
    StoreUnavailable(#[source] StoreError),
}

impl AppError {
    /// HTTP status code and fixed body for this error.
    fn status_and_body(&self) -> (StatusCode, &'static str) {
        match self {
            Self::Greeting(_) => (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_BODY),
            Self::StoreUnavailable(_) => (StatusCode::SERVICE_UNAVAILABLE, UNAVAILABLE_BODY),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = self.status_and_body();

        match &self {
            Self::Greeting(_) => tracing::error!(error = %self, "failed to read current greeting"),
            Self::StoreUnavailable(_) => tracing::warn!(error = %self, "database health check failed"),
        }

        (status, body).into_response()
    }
}
