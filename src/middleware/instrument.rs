use axum::{
    extract::{MatchedPath, Request, State},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;
use std::time::Instant;

use crate::AppState;

/// Records request count, response status and latency for every matched
/// route, labelled by the route template rather than the concrete URI.
///
/// Also adds a `Server-Timing` header with the handler wall time. Requests
/// that did not match a declared route (static-asset fallback) pass through
/// unrecorded, which keeps label cardinality bounded by the route table.
pub async fn track_metrics(
    State(state): State<Arc<AppState>>,
    req: Request,
    next: Next,
) -> Response {
    let Some(route) = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_owned())
    else {
        return next.run(req).await;
    };
    let method = req.method().clone();

    let start = Instant::now();
    let mut response = next.run(req).await;
    let elapsed = start.elapsed();

    let status = response.status();
    state.metrics.inc_status(status.as_str());
    state.metrics.inc_request(&route);
    state.metrics.observe_duration(&route, elapsed.as_secs_f64());

    let server_timing =
        format!("total;dur={:.3}", elapsed.as_secs_f64() * 1000.0);
    if let Ok(val) = server_timing.parse() {
        response.headers_mut().insert("Server-Timing", val);
    }

    tracing::debug!(
        %method,
        route = %route,
        status = status.as_u16(),
        elapsed_secs = elapsed.as_secs_f64(),
        "request served"
    );

    response
}
