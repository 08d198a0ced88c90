//! Shared Domain Types
//!
//! Errors and helpers shared across bounded contexts.

pub mod errors;

pub use errors::RepositoryError;

/// Require a non-empty text input, naming the field in the error.
///
/// # Errors
///
/// Returns `RepositoryError::Validation` if `value` is empty.
pub fn require_non_empty<'a>(field: &str, value: &'a str) -> Result<&'a str, RepositoryError> {
    if value.is_empty() {
        return Err(RepositoryError::Validation {
            field: field.to_string(),
            message: format!("{field} required"),
        });
    }
    Ok(value)
}
