use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
};
use std::sync::Arc;

use crate::handlers::AppError;
use crate::AppState;

// ─── GET /metrics ────────────────────────────────────────────────
/// Prometheus scrape target. Reads the registry without mutating it.

pub async fn get_metrics(
    State(state): State<Arc<AppState>>,
) -> Result<Response, AppError> {
    let body = state.metrics.render()?;
    Ok((
        [(header::CONTENT_TYPE, state.metrics.content_type())],
        body,
    )
        .into_response())
}
