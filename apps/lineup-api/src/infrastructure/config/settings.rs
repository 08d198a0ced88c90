//! Service Configuration Settings
//!
//! Configuration types for the lineup service, loaded from environment variables.

use std::time::Duration;

use crate::infrastructure::persistence::SheetLayout;
use crate::infrastructure::sheets::{DEFAULT_API_BASE_URL, SheetsConfig};

/// Spreadsheet API credentials.
#[derive(Clone)]
pub struct Credentials {
    access_token: String,
}

impl Credentials {
    /// Create new credentials.
    #[must_use]
    pub const fn new(access_token: String) -> Self {
        Self { access_token }
    }

    /// Get the OAuth bearer token.
    #[must_use]
    pub fn access_token(&self) -> &str {
        &self.access_token
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("access_token", &"[REDACTED]")
            .finish()
    }
}

/// Server port settings.
#[derive(Debug, Clone)]
pub struct ServerSettings {
    /// HTTP listen port (API, health and metrics).
    pub http_port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self { http_port: 8080 }
    }
}

/// Complete service configuration.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Spreadsheet holding every table.
    pub spreadsheet_id: String,
    /// API credentials.
    pub credentials: Credentials,
    /// Sheets API base URL.
    pub api_base_url: String,
    /// Upstream request timeout.
    pub upstream_timeout: Duration,
    /// Sheet titles.
    pub layout: SheetLayout,
    /// Server port settings.
    pub server: ServerSettings,
}

impl ServiceConfig {
    /// Create configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if required environment variables are missing.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create configuration from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns an error if required keys are missing or empty.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let spreadsheet_id = required(&lookup, "SHEETS_SPREADSHEET_ID")?;
        let access_token = required(&lookup, "SHEETS_ACCESS_TOKEN")?;

        let api_base_url = lookup("SHEETS_API_BASE_URL")
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());

        let upstream_timeout = lookup("SHEETS_TIMEOUT_SECS")
            .and_then(|v| v.parse::<u64>().ok())
            .map_or(Duration::from_secs(30), Duration::from_secs);

        let defaults = SheetLayout::default();
        let sheet = |key: &str, default: String| {
            lookup(key).filter(|v| !v.is_empty()).unwrap_or(default)
        };
        let layout = SheetLayout {
            roster: sheet("LINEUP_ROSTER_SHEET", defaults.roster),
            settings: sheet("LINEUP_SETTINGS_SHEET", defaults.settings),
            orders: sheet("LINEUP_ORDERS_SHEET", defaults.orders),
        };

        let server = ServerSettings {
            http_port: lookup("HTTP_PORT")
                .and_then(|v| v.parse().ok())
                .unwrap_or(ServerSettings::default().http_port),
        };

        Ok(Self {
            spreadsheet_id,
            credentials: Credentials::new(access_token),
            api_base_url,
            upstream_timeout,
            layout,
            server,
        })
    }

    /// Settings for the Sheets range store.
    #[must_use]
    pub fn sheets_config(&self) -> SheetsConfig {
        SheetsConfig::new(
            self.spreadsheet_id.clone(),
            self.credentials.access_token().to_string(),
        )
        .with_base_url(self.api_base_url.clone())
        .with_timeout(self.upstream_timeout)
    }
}

fn required<F>(lookup: &F, key: &str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let value = lookup(key).ok_or_else(|| ConfigError::MissingEnvVar(key.to_string()))?;
    if value.is_empty() {
        return Err(ConfigError::EmptyValue(key.to_string()));
    }
    Ok(value)
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Required environment variable is missing.
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),
    /// Environment variable has empty value.
    #[error("environment variable {0} cannot be empty")]
    EmptyValue(String),
}
