//! Roster Repository Trait

use async_trait::async_trait;

use super::player::Player;
use crate::domain::shared::RepositoryError;

/// Repository trait for the player table.
#[async_trait]
pub trait RosterRepository: Send + Sync {
    /// Read every player in store order.
    ///
    /// # Errors
    ///
    /// Returns `Upstream` if the store fails.
    async fn list(&self) -> Result<Vec<Player>, RepositoryError>;

    /// Replace the whole table with `players`.
    ///
    /// # Errors
    ///
    /// Returns `Upstream` if the store fails.
    async fn replace_all(&self, players: &[Player]) -> Result<(), RepositoryError>;
}
