//! Sheets adapter configuration.

use std::fmt;
use std::time::Duration;

/// Public Google Sheets API endpoint.
pub const DEFAULT_API_BASE_URL: &str = "https://sheets.googleapis.com";

/// Configuration for the Sheets range store.
#[derive(Clone)]
pub struct SheetsConfig {
    /// Spreadsheet holding every table.
    pub spreadsheet_id: String,
    /// OAuth bearer token.
    pub access_token: String,
    /// API base URL, without the `/v4` prefix.
    pub api_base_url: String,
    /// HTTP request timeout.
    pub timeout: Duration,
}

impl SheetsConfig {
    /// Create a configuration against the public API.
    #[must_use]
    pub fn new(spreadsheet_id: String, access_token: String) -> Self {
        Self {
            spreadsheet_id,
            access_token,
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            timeout: Duration::from_secs(30),
        }
    }

    /// Point the adapter at another base URL (e.g. a local mock server).
    #[must_use]
    pub fn with_base_url(mut self, api_base_url: impl Into<String>) -> Self {
        self.api_base_url = api_base_url.into();
        self
    }

    /// Set the HTTP timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl fmt::Debug for SheetsConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SheetsConfig")
            .field("spreadsheet_id", &self.spreadsheet_id)
            .field("access_token", &"[REDACTED]")
            .field("api_base_url", &self.api_base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}
