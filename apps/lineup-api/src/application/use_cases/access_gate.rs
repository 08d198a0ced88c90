//! Access Gate Use Case
//!
//! Compares and rotates the shared edit secret.

use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::access::{SecretCheck, SecretRepository, SecretUpdate};
use crate::domain::shared::{RepositoryError, require_non_empty};

/// Gate in front of edit operations, backed by a single stored secret.
pub struct AccessGate<S: SecretRepository> {
    secrets: Arc<S>,
}

impl<S: SecretRepository> Clone for AccessGate<S> {
    fn clone(&self) -> Self {
        Self {
            secrets: Arc::clone(&self.secrets),
        }
    }
}

impl<S: SecretRepository> AccessGate<S> {
    /// Create a gate over the given secret store.
    pub const fn new(secrets: Arc<S>) -> Self {
        Self { secrets }
    }

    /// Compare `candidate` against the stored secret.
    ///
    /// An empty candidate is rejected outright, so an unset secret cell can
    /// never be matched.
    ///
    /// # Errors
    ///
    /// Returns `Validation` for an empty candidate, `Upstream` if the store fails.
    pub async fn check(&self, candidate: &str) -> Result<SecretCheck, RepositoryError> {
        require_non_empty("password", candidate)?;

        let stored = self.secrets.load().await?;
        if stored == candidate {
            debug!("Secret check passed");
            Ok(SecretCheck::Match)
        } else {
            debug!("Secret check failed");
            Ok(SecretCheck::Mismatch)
        }
    }

    /// Replace the stored secret with `new`, provided `current` matches it.
    ///
    /// # Errors
    ///
    /// Returns `Validation` if either value is empty, `Upstream` if the store fails.
    pub async fn update(&self, current: &str, new: &str) -> Result<SecretUpdate, RepositoryError> {
        require_non_empty("oldPassword", current)?;
        require_non_empty("newPassword", new)?;

        let stored = self.secrets.load().await?;
        if stored != current {
            debug!("Secret rotation rejected: current secret mismatch");
            return Ok(SecretUpdate::Mismatch);
        }

        self.secrets.store(new).await?;
        info!("Shared secret rotated");
        Ok(SecretUpdate::Updated)
    }
}
