use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
    Json,
};
use std::sync::Arc;

use crate::AppState;

// ─── GET /hits, GET /api/hits ────────────────────────────────────
/// Current landing-page visit count as a bare JSON number.

pub async fn get_hits(State(state): State<Arc<AppState>>) -> Json<u64> {
    Json(state.hits.get())
}

// ─── Route layer for GET / ───────────────────────────────────────
/// Counts a visit before handing the request to the static file service.

pub async fn count_hit(
    State(state): State<Arc<AppState>>,
    req: Request,
    next: Next,
) -> Response {
    state.hits.increment();
    next.run(req).await
}
