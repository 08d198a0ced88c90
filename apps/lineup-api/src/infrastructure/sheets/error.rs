//! Sheets-specific error types.

use thiserror::Error;

use crate::application::ports::RangeStoreError;

/// Errors from the Sheets adapter.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SheetsError {
    /// The HTTP client could not be built or the base URL is unusable.
    #[error("Invalid Sheets client configuration: {0}")]
    Config(String),

    /// The request never produced a response.
    #[error("Network error: {0}")]
    Network(String),

    /// The API answered with a non-2xx status. `message` is Google's own text.
    #[error("{message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Error message from the API.
        message: String,
    },

    /// A 2xx response body did not decode.
    #[error("JSON parsing error: {0}")]
    JsonParse(String),

    /// No sheet in the spreadsheet carries the title.
    #[error("Sheet not found: {title}")]
    SheetNotFound {
        /// The missing sheet title.
        title: String,
    },
}

impl From<SheetsError> for RangeStoreError {
    fn from(err: SheetsError) -> Self {
        match err {
            SheetsError::SheetNotFound { title } => Self::SheetNotFound { title },
            other => Self::Upstream {
                message: other.to_string(),
            },
        }
    }
}
