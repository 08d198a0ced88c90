//! Repository errors shared by every sheet-backed table.

use std::fmt;

/// Errors returned by repository operations.
///
/// Absent records are not errors: lookups return `Option` and deletes return
/// [`DeleteOutcome`](crate::domain::order_book::DeleteOutcome).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    /// A required input was missing or malformed.
    Validation {
        /// Field that failed validation.
        field: String,
        /// Human-readable message.
        message: String,
    },

    /// A stored record could not be decoded.
    CorruptRecord {
        /// Key of the record that failed to decode.
        key: String,
        /// Decoder failure description.
        reason: String,
    },

    /// The backing store failed.
    Upstream {
        /// Underlying error message, passed through to the caller.
        message: String,
    },
}

impl RepositoryError {
    /// Create an upstream error from any displayable source.
    pub fn upstream(source: impl fmt::Display) -> Self {
        Self::Upstream {
            message: source.to_string(),
        }
    }

    /// Whether this error was caused by caller input.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }
}

impl fmt::Display for RepositoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Validation { message, .. } => write!(f, "{message}"),
            Self::CorruptRecord { key, reason } => {
                write!(f, "Stored record '{key}' is corrupt: {reason}")
            }
            Self::Upstream { message } => write!(f, "{message}"),
        }
    }
}

impl std::error::Error for RepositoryError {}
