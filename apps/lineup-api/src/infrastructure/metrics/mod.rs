//! Prometheus Metrics Module
//!
//! # Metrics
//!
//! - `lineup_http_requests_total`: requests served, by route and status class
//! - `lineup_upstream_calls_total`: range store calls, by operation and outcome
//! - `lineup_upstream_call_seconds`: range store call latency, by operation
//!
//! Rendered at `GET /metrics` on the service port.

use std::sync::OnceLock;
use std::time::Duration;

use metrics::{counter, describe_counter, describe_histogram, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};

// =============================================================================
// Global Metrics Handle
// =============================================================================

static PROMETHEUS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// Install the Prometheus recorder and describe every metric.
///
/// Calling this again after a successful install returns the existing handle.
///
/// # Errors
///
/// Returns `BuildError` if a global recorder is already installed by
/// someone else.
pub fn init_metrics() -> Result<PrometheusHandle, BuildError> {
    if let Some(handle) = PROMETHEUS_HANDLE.get() {
        return Ok(handle.clone());
    }

    let handle = PrometheusBuilder::new().install_recorder()?;
    register_metrics();
    Ok(PROMETHEUS_HANDLE.get_or_init(|| handle).clone())
}

/// Get the Prometheus handle for rendering metrics.
///
/// Returns `None` if metrics have not been initialized.
#[must_use]
pub fn get_metrics_handle() -> Option<PrometheusHandle> {
    PROMETHEUS_HANDLE.get().cloned()
}

// =============================================================================
// Metric Registration
// =============================================================================

fn register_metrics() {
    describe_counter!(
        "lineup_http_requests_total",
        "Total HTTP requests served by route and status class"
    );
    describe_counter!(
        "lineup_upstream_calls_total",
        "Total range store calls by operation and outcome"
    );
    describe_histogram!(
        "lineup_upstream_call_seconds",
        "Range store call latency by operation"
    );
}

// =============================================================================
// Metric Recording Functions
// =============================================================================

/// Range store operations, as metric labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpstreamOp {
    /// Values read.
    Get,
    /// Values overwrite.
    Update,
    /// Values append.
    Append,
    /// Values clear.
    Clear,
    /// Spreadsheet metadata lookup.
    SheetId,
    /// Structural row deletion.
    DeleteRows,
}

impl UpstreamOp {
    /// Label value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "get",
            Self::Update => "update",
            Self::Append => "append",
            Self::Clear => "clear",
            Self::SheetId => "sheet_id",
            Self::DeleteRows => "delete_rows",
        }
    }
}

/// Collapse a status code to its class label (`2xx`, `4xx`, ...).
#[must_use]
pub fn status_class(status: u16) -> &'static str {
    match status {
        100..=199 => "1xx",
        200..=299 => "2xx",
        300..=399 => "3xx",
        400..=499 => "4xx",
        _ => "5xx",
    }
}

/// Record one served HTTP request.
pub fn record_request(route: &str, status: u16) {
    counter!(
        "lineup_http_requests_total",
        "route" => route.to_string(),
        "status" => status_class(status)
    )
    .increment(1);
}

/// Record one range store call and its latency.
pub fn record_upstream_call(op: UpstreamOp, elapsed: Duration, ok: bool) {
    counter!(
        "lineup_upstream_calls_total",
        "operation" => op.as_str(),
        "outcome" => if ok { "ok" } else { "error" }
    )
    .increment(1);
    histogram!(
        "lineup_upstream_call_seconds",
        "operation" => op.as_str()
    )
    .record(elapsed.as_secs_f64());
}

// =============================================================================
// Tests
// =============================================================================
