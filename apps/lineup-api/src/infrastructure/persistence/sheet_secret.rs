//! Sheet-backed secret repository. The secret lives in cell `B1` and is
//! written `RAW` so a value like `0012` is not turned into a number.

use std::sync::Arc;

use async_trait::async_trait;

use crate::application::ports::{RangeStore, SheetRange, ValueInput};
use crate::domain::access::SecretRepository;
use crate::domain::shared::RepositoryError;

/// Sheet-backed implementation of `SecretRepository`.
pub struct SheetSecretRepository<S: RangeStore> {
    store: Arc<S>,
    cell: SheetRange,
}

impl<S: RangeStore> SheetSecretRepository<S> {
    /// Create a repository over cell `B1` of the named sheet.
    pub fn new(store: Arc<S>, sheet: impl Into<String>) -> Self {
        Self {
            store,
            cell: SheetRange::cell(sheet, 1, 1),
        }
    }
}

#[async_trait]
impl<S: RangeStore> SecretRepository for SheetSecretRepository<S> {
    async fn load(&self) -> Result<String, RepositoryError> {
        let rows = self.store.get(&self.cell).await?;
        Ok(rows
            .into_iter()
            .next()
            .and_then(|row| row.into_iter().next())
            .unwrap_or_default())
    }

    async fn store(&self, secret: &str) -> Result<(), RepositoryError> {
        self.store
            .update(&self.cell, vec![vec![secret.to_string()]], ValueInput::Raw)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::persistence::InMemoryRangeStore;

    #[tokio::test]
    async fn unset_cell_reads_empty() {
        let store = Arc::new(InMemoryRangeStore::with_sheets(["Settings"]));
        let repo = SheetSecretRepository::new(store, "Settings");
        assert_eq!(repo.load().await.unwrap(), "");
    }

    #[tokio::test]
    async fn store_writes_b1_only() {
        let store = Arc::new(InMemoryRangeStore::default());
        store.set_rows("Settings", vec![vec!["password".to_string(), "old".to_string()]]);
        let repo = SheetSecretRepository::new(Arc::clone(&store), "Settings");

        assert_eq!(repo.load().await.unwrap(), "old");
        repo.store("new").await.unwrap();

        assert_eq!(store.rows("Settings"), vec![vec!["password".to_string(), "new".to_string()]]);
        assert_eq!(repo.load().await.unwrap(), "new");
    }

    #[tokio::test]
    async fn missing_sheet_is_upstream_error() {
        let repo = SheetSecretRepository::new(Arc::new(InMemoryRangeStore::default()), "Settings");
        assert!(matches!(
            repo.load().await,
            Err(RepositoryError::Upstream { .. })
        ));
    }
}
