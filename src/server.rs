use axum::{
    extract::DefaultBodyLimit,
    middleware as axum_mw,
    routing::{get, get_service, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;

use crate::config::Config;
use crate::handlers;
use crate::metrics::exposition;
use crate::middleware::instrument;
use crate::AppState;

/// Builds the full Axum `Router` with all routes, middleware, and static serving.
pub fn create_router(state: Arc<AppState>, config: &Config) -> Router {
    let static_files = ServeDir::new(&config.static_dir);

    // ── Instrumented routes ─────────────────────────────────────
    let site = Router::new()
        .route(
            "/",
            get_service(static_files.clone()).route_layer(
                axum_mw::from_fn_with_state(state.clone(), handlers::hits::count_hit),
            ),
        )
        .route("/hits", get(handlers::hits::get_hits))
        .route("/api/hits", get(handlers::hits::get_hits))
        .route("/api/healthz", get(handlers::health::healthz))
        .route("/metrics", get(exposition::get_metrics))
        .route_layer(axum_mw::from_fn_with_state(
            state.clone(),
            instrument::track_metrics,
        ));

    // ── Diagnostics (bypass instrumentation) ────────────────────
    let diagnostics = Router::new().route(
        "/api/remote",
        post(handlers::remote::receive)
            .layer(DefaultBodyLimit::max(config.remote_write_body_limit)),
    );

    site.merge(diagnostics)
        .with_state(state)
        // ── Remaining frontend assets ───────────────────────────
        .fallback_service(static_files)
        .layer(CorsLayer::permissive())
}
