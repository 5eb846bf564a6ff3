use axum::http::{HeaderMap, StatusCode};
use bytes::Bytes;
use std::io::{self, Write};

use crate::remote_write;

use super::AppError;

const VERSION_HEADER: &str = "X-Prometheus-Remote-Write-Version";

// ─── POST /api/remote ────────────────────────────────────────────
/// Debug sink for Prometheus remote-write. Decodes the pushed batch and
/// dumps every series, sample, exemplar and metadata entry to stdout.
/// Nothing is kept after the response is sent.

pub async fn receive(
    headers: HeaderMap,
    body: Bytes,
) -> Result<StatusCode, AppError> {
    let request = remote_write::decode(&body)?;
    let dump = remote_write::render(&request);

    // Stdout may be a slow pipe; keep the write off the async workers
    let written = tokio::task::spawn_blocking(move || {
        write_dump(&mut io::stdout().lock(), &dump)
    })
    .await;
    match written {
        Ok(Ok(())) => {}
        Ok(Err(e)) => tracing::warn!(error = %e, "failed to write remote-write dump"),
        Err(e) => tracing::warn!(error = %e, "remote-write dump task failed"),
    }

    let version = headers
        .get(VERSION_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unspecified");
    tracing::info!(
        version,
        bytes = body.len(),
        series = request.timeseries.len(),
        samples = request.sample_count(),
        exemplars = request.exemplar_count(),
        metadata = request.metadata.len(),
        "decoded remote-write payload"
    );

    Ok(StatusCode::OK)
}

/// One write per payload, under a single lock, so concurrent pushes don't
/// interleave.
fn write_dump<W: Write>(out: &mut W, dump: &str) -> io::Result<()> {
    out.write_all(dump.as_bytes())?;
    out.flush()
}
