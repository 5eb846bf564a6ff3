pub mod health;
pub mod hits;
pub mod remote;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::metrics::MetricsError;
use crate::remote_write::DecodeError;

// ─── Unified error type ──────────────────────────────────────────

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Decode(#[from] DecodeError),
    #[error(transparent)]
    Metrics(#[from] MetricsError),
}

/// Errors are returned as plain text: the callers are a remote-write
/// sender and a scraper, neither of which reads JSON.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::Decode(_) => StatusCode::BAD_REQUEST,
            Self::Metrics(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::warn!(error = %self, "rejected request");
        }

        (status, self.to_string()).into_response()
    }
}
