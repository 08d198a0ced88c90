//! Infrastructure Layer
//!
//! Adapters for the spreadsheet API, the HTTP surface, and ambient service
//! concerns (configuration, logging, metrics).

/// Service configuration from environment variables.
pub mod config;

/// Axum router, handlers and middleware.
pub mod http;

/// Prometheus metrics.
pub mod metrics;

/// Sheet-backed repositories and the in-memory range store.
pub mod persistence;

/// Google Sheets v4 adapter for `RangeStore`.
pub mod sheets;

/// Tracing subscriber and optional OTLP export.
pub mod telemetry;
