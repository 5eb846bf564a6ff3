use axum::Json;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct Health {
    pub alive: bool,
}

// ─── GET /api/healthz ────────────────────────────────────────────
/// Liveness / readiness probe target.

pub async fn healthz() -> Json<Health> {
    Json(Health { alive: true })
}
