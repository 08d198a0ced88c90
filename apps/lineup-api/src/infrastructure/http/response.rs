//! HTTP response types.

use serde::Serialize;

/// Plain status acknowledgement: `success`, `deleted` or `not_found`.
#[derive(Debug, Clone, Serialize)]
pub struct StatusResponse {
    /// Status word.
    pub status: &'static str,
}

impl StatusResponse {
    /// `{status: "success"}`
    #[must_use]
    pub const fn success() -> Self {
        Self { status: "success" }
    }

    /// `{status: "deleted"}`
    #[must_use]
    pub const fn deleted() -> Self {
        Self { status: "deleted" }
    }

    /// `{status: "not_found"}`
    #[must_use]
    pub const fn not_found() -> Self {
        Self {
            status: "not_found",
        }
    }
}

/// Failure body, used both for errors and for in-band mismatches.
#[derive(Debug, Clone, Serialize)]
pub struct FailResponse {
    /// Always `fail`.
    pub status: &'static str,
    /// Error message.
    pub error: String,
}

impl FailResponse {
    /// Create a failure body.
    #[must_use]
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            status: "fail",
            error: error.into(),
        }
    }
}

/// Order existence check.
#[derive(Debug, Clone, Serialize)]
pub struct ExistsResponse {
    /// Whether the name is stored.
    pub exists: bool,
}

/// Health check response.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Status.
    pub status: String,
    /// Version.
    pub version: String,
}
