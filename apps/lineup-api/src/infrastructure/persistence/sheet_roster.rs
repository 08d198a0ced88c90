//! Sheet-backed roster repository.

use std::sync::Arc;

use async_trait::async_trait;

use crate::application::ports::{RangeStore, SheetRange, ValueInput};
use crate::domain::roster::{PLAYER_COLUMNS, Player, RosterRepository};
use crate::domain::shared::RepositoryError;

const LAST_COL: usize = PLAYER_COLUMNS.len() - 1;

/// Sheet-backed implementation of `RosterRepository`.
///
/// The table is `A:I` with a header in row 1 and is always rewritten whole.
pub struct SheetRosterRepository<S: RangeStore> {
    store: Arc<S>,
    sheet: String,
}

impl<S: RangeStore> SheetRosterRepository<S> {
    /// Create a repository over the named sheet.
    pub fn new(store: Arc<S>, sheet: impl Into<String>) -> Self {
        Self {
            store,
            sheet: sheet.into(),
        }
    }
}

#[async_trait]
impl<S: RangeStore> RosterRepository for SheetRosterRepository<S> {
    async fn list(&self) -> Result<Vec<Player>, RepositoryError> {
        let rows = self
            .store
            .get(&SheetRange::rows_from(&self.sheet, 0, LAST_COL, 2))
            .await?;
        Ok(rows.iter().map(|row| Player::from_row(row)).collect())
    }

    async fn replace_all(&self, players: &[Player]) -> Result<(), RepositoryError> {
        self.store
            .clear(&SheetRange::rows_from(&self.sheet, 0, LAST_COL, 1))
            .await?;

        let mut rows = Vec::with_capacity(players.len() + 1);
        rows.push(PLAYER_COLUMNS.iter().map(|c| (*c).to_string()).collect());
        rows.extend(players.iter().map(Player::to_row));

        self.store
            .update(&SheetRange::cell(&self.sheet, 0, 1), rows, ValueInput::UserEntered)
            .await?;

        tracing::info!(players = players.len(), "Roster replaced");
        Ok(())
    }
}
