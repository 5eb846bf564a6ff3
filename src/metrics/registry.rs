use std::string::FromUtf8Error;

use prometheus::{
    Encoder, HistogramOpts, HistogramVec, IntCounterVec, Opts, Registry, TextEncoder,
};
use thiserror::Error;

// ─── Series definitions ──────────────────────────────────────────

const REQUESTS_TOTAL: &str = "http_requests_total";
const RESPONSE_STATUS: &str = "response_status";
const RESPONSE_TIME: &str = "http_response_time_seconds";

/// Constant label attached to every application series so dashboards can
/// tell them apart from the `process_*` defaults.
const CONST_LABEL: (&str, &str) = ("metrics", "custom");

#[derive(Debug, Error)]
pub enum MetricsError {
    #[error("prometheus: {0}")]
    Prometheus(#[from] prometheus::Error),
    #[error("exposition text is not valid UTF-8: {0}")]
    Utf8(#[from] FromUtf8Error),
}

// ─── Public types ────────────────────────────────────────────────

/// Owned Prometheus registry holding the HTTP series.
///
/// Built once in `main` and shared by the instrumentation middleware and the
/// `/metrics` handler. All recording methods take `&self`; the underlying
/// vectors are internally synchronised.
pub struct Metrics {
    registry: Registry,
    requests_total: IntCounterVec,
    response_status: IntCounterVec,
    response_time: HistogramVec,
}

// ─── Metrics impl ────────────────────────────────────────────────

impl Metrics {
    /// Registers all series, plus process metrics on Linux.
    ///
    /// Fails only if a name is registered twice.
    pub fn new() -> Result<Self, MetricsError> {
        let registry = Registry::new();

        let requests_total = IntCounterVec::new(
            Opts::new(REQUESTS_TOTAL, "Number of get requests.")
                .const_label(CONST_LABEL.0, CONST_LABEL.1),
            &["path"],
        )?;
        let response_status = IntCounterVec::new(
            Opts::new(RESPONSE_STATUS, "Status of HTTP response")
                .const_label(CONST_LABEL.0, CONST_LABEL.1),
            &["status"],
        )?;
        let response_time = HistogramVec::new(
            HistogramOpts::new(RESPONSE_TIME, "Duration of HTTP requests.")
                .const_label(CONST_LABEL.0, CONST_LABEL.1)
                .buckets(prometheus::DEFAULT_BUCKETS.to_vec()),
            &["path"],
        )?;

        registry.register(Box::new(requests_total.clone()))?;
        registry.register(Box::new(response_status.clone()))?;
        registry.register(Box::new(response_time.clone()))?;

        #[cfg(target_os = "linux")]
        registry.register(Box::new(
            prometheus::process_collector::ProcessCollector::for_self(),
        ))?;

        Ok(Self {
            registry,
            requests_total,
            response_status,
            response_time,
        })
    }

    /// Count one completed request against a route template.
    pub fn inc_request(&self, path: &str) {
        self.requests_total.with_label_values(&[path]).inc();
    }

    /// Count one response carrying `status` (e.g. `"200"`).
    pub fn inc_status(&self, status: &str) {
        self.response_status.with_label_values(&[status]).inc();
    }

    /// Record one request duration in seconds.
    pub fn observe_duration(&self, path: &str, seconds: f64) {
        self.response_time.with_label_values(&[path]).observe(seconds);
    }

    /// Encode every registered family in the text exposition format.
    pub fn render(&self) -> Result<String, MetricsError> {
        let encoder = TextEncoder::new();
        let mut buffer = Vec::new();
        encoder.encode(&self.registry.gather(), &mut buffer)?;
        Ok(String::from_utf8(buffer)?)
    }

    /// `Content-Type` matching [`Metrics::render`] output.
    pub fn content_type(&self) -> &'static str {
        prometheus::TEXT_FORMAT
    }

    #[cfg(test)]
    pub fn request_count(&self, path: &str) -> u64 {
        self.requests_total.with_label_values(&[path]).get()
    }

    #[cfg(test)]
    pub fn status_count(&self, status: &str) -> u64 {
        self.response_status.with_label_values(&[status]).get()
    }

    #[cfg(test)]
    pub fn duration_count(&self, path: &str) -> u64 {
        self.response_time
            .with_label_values(&[path])
            .get_sample_count()
    }
}
