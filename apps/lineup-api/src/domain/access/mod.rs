//! Access Bounded Context
//!
//! A single shared secret, stored in one cell, that the lineup editor asks
//! for before allowing edits.

use async_trait::async_trait;

use crate::domain::shared::RepositoryError;

/// Outcome of comparing a candidate against the stored secret.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecretCheck {
    /// Candidate equals the stored secret.
    Match,
    /// Candidate differs from the stored secret.
    Mismatch,
}

/// Outcome of a secret rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecretUpdate {
    /// The stored secret was replaced.
    Updated,
    /// The supplied current secret was wrong; nothing was written.
    Mismatch,
}

/// Storage for the shared secret cell.
#[async_trait]
pub trait SecretRepository: Send + Sync {
    /// Read the stored secret. An unset cell reads as `""`.
    ///
    /// # Errors
    ///
    /// Returns `Upstream` if the store fails.
    async fn load(&self) -> Result<String, RepositoryError>;

    /// Overwrite the stored secret.
    ///
    /// # Errors
    ///
    /// Returns `Upstream` if the store fails.
    async fn store(&self, secret: &str) -> Result<(), RepositoryError>;
}
