//! Order Repository Trait
//!
//! Defines the persistence abstraction for saved orders.
//! Implemented by adapters in the infrastructure layer.

use async_trait::async_trait;
use serde_json::Value;

use super::record::{DeleteOutcome, OrderSummary, SavedOrder};
use crate::domain::shared::RepositoryError;

/// Repository trait for saved orders.
///
/// Every operation is an independent round trip to the backing store: no
/// row positions are cached between calls.
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Check whether any stored order has exactly this name.
    ///
    /// # Errors
    ///
    /// Returns `Validation` for an empty name, `Upstream` if the store fails.
    async fn exists(&self, name: &str) -> Result<bool, RepositoryError>;

    /// List names and save times in store order.
    ///
    /// # Errors
    ///
    /// Returns `Upstream` if the store fails.
    async fn list(&self) -> Result<Vec<OrderSummary>, RepositoryError>;

    /// Load the first stored order with this name.
    ///
    /// # Errors
    ///
    /// Returns `Validation` for an empty name, `CorruptRecord` if the stored
    /// payload does not decode, `Upstream` if the store fails.
    async fn get(&self, name: &str) -> Result<Option<SavedOrder>, RepositoryError>;

    /// Insert or overwrite the order with this name.
    ///
    /// # Errors
    ///
    /// Returns `Validation` for an empty name or a missing payload, `Upstream`
    /// if the store fails.
    async fn save(&self, name: &str, payload: &Value) -> Result<(), RepositoryError>;

    /// Remove the stored order with this name.
    ///
    /// # Errors
    ///
    /// Returns `Validation` for an empty name, `Upstream` if the store fails.
    async fn delete(&self, name: &str) -> Result<DeleteOutcome, RepositoryError>;
}
