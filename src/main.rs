use clap::Parser;
use std::sync::Arc;

mod config;
mod handlers;
mod metrics;
mod middleware;
mod remote_write;
mod server;

use config::Config;
use metrics::{HitCounter, Metrics, MetricsError};

/// Shared application state available to every handler via `State<Arc<AppState>>`.
pub struct AppState {
    /// Prometheus registry fed by the instrumentation middleware.
    pub metrics: Metrics,

    /// Landing-page visit count served by `/hits`.
    pub hits: HitCounter,
}

impl AppState {
    pub fn new() -> Result<Self, MetricsError> {
        Ok(Self {
            metrics: Metrics::new()?,
            hits: HitCounter::new(),
        })
    }
}

#[tokio::main]
async fn main() {
    let config = Config::parse();
    config::init_logging(config.log_format);

    // ── 1. Build shared state ────────────────────────────────────
    let state = AppState::new().unwrap_or_else(|e| {
        tracing::error!(error = %e, "failed to register metrics");
        std::process::exit(1);
    });

    // ── 2. Build Axum router ─────────────────────────────────────
    let app = server::create_router(Arc::new(state), &config);

    // ── 3. Bind & serve ──────────────────────────────────────────
    let listener = tokio::net::TcpListener::bind(config.listen)
        .await
        .unwrap_or_else(|e| {
            tracing::error!(addr = %config.listen, error = %e, "failed to bind");
            std::process::exit(1);
        });

    tracing::info!(
        addr = %config.listen,
        static_dir = %config.static_dir.display(),
        "listening; routes: / /hits /api/hits /api/healthz /metrics /api/remote"
    );

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        tracing::error!(error = %e, "server exited with error");
        std::process::exit(1);
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("signal received, starting graceful shutdown");
}
