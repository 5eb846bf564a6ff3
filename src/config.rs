use clap::{Parser, ValueEnum};
use std::net::SocketAddr;
use std::path::PathBuf;

/// Runtime settings. Every flag can also come from the environment, which is
/// how the Deployment manifest sets them.
#[derive(Debug, Clone, Parser)]
#[command(name = "blog-metrics-server")]
#[command(about = "Demo blog server with Prometheus metrics and a remote-write debug sink")]
pub struct Config {
    /// Address to bind the HTTP server to
    #[arg(long, env = "LISTEN_ADDR", default_value = "0.0.0.0:2112")]
    pub listen: SocketAddr,

    /// Directory holding the frontend (index.html and assets)
    #[arg(long, env = "STATIC_DIR", default_value = "static")]
    pub static_dir: PathBuf,

    /// Largest accepted remote-write request body, in bytes
    #[arg(long, env = "REMOTE_WRITE_BODY_LIMIT", default_value_t = 8 * 1024 * 1024)]
    pub remote_write_body_limit: usize,

    /// Log output format
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}

/// Install the global `tracing` subscriber. `RUST_LOG` overrides the
/// default `info` filter.
pub fn init_logging(format: LogFormat) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    match format {
        LogFormat::Text => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .init(),
        LogFormat::Json => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .with_thread_ids(true)
            .json()
            .init(),
    }
}
