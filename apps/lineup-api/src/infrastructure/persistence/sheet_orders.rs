//! Sheet-backed order repository.
//!
//! Layout: row 1 is a header; each data row is `[orderName, savedAt, payloadJson]`
//! in columns A to C. Row positions are re-resolved from a fresh scan on every
//! call and never cached. Rows are written `RAW` so the stored name and
//! payload text read back exactly as written.
//!
//! `get` returns the first row carrying a name while `save` and `delete` act
//! on the last one. With unique names the two agree; they only diverge if
//! duplicates were introduced outside this repository or by concurrent saves.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::application::ports::{Clock, RangeStore, Rows, SheetRange, ValueInput};
use crate::domain::order_book::{
    DeleteOutcome, LineupPayload, OrderName, OrderRepository, OrderSummary, SavedOrder,
    format_saved_at,
};
use crate::domain::shared::RepositoryError;

/// First data row (1-based); row 1 holds the header.
const FIRST_DATA_ROW: usize = 2;

const NAME_COL: usize = 0;
const SAVED_AT_COL: usize = 1;
const PAYLOAD_COL: usize = 2;

/// Sheet-backed implementation of `OrderRepository`.
pub struct SheetOrderRepository<S: RangeStore> {
    store: Arc<S>,
    clock: Arc<dyn Clock>,
    sheet: String,
}

impl<S: RangeStore> SheetOrderRepository<S> {
    /// Create a repository over the named sheet.
    pub fn new(store: Arc<S>, clock: Arc<dyn Clock>, sheet: impl Into<String>) -> Self {
        Self {
            store,
            clock,
            sheet: sheet.into(),
        }
    }

    fn names_range(&self) -> SheetRange {
        SheetRange::rows_from(&self.sheet, NAME_COL, NAME_COL, FIRST_DATA_ROW)
    }

    fn records_range(&self, last_col: usize) -> SheetRange {
        SheetRange::rows_from(&self.sheet, NAME_COL, last_col, FIRST_DATA_ROW)
    }

    /// Scan the name column and return the sheet row of the last match.
    async fn locate_last(&self, name: &OrderName) -> Result<Option<usize>, RepositoryError> {
        let rows = self.store.get(&self.names_range()).await?;
        Ok(last_match(&rows, name).map(row_number))
    }
}

/// Index of the first row whose name cell equals `name`.
fn first_match(rows: &Rows, name: &OrderName) -> Option<usize> {
    rows.iter().position(|row| name_matches(row, name))
}

/// Index of the last row whose name cell equals `name`.
fn last_match(rows: &Rows, name: &OrderName) -> Option<usize> {
    rows.iter().rposition(|row| name_matches(row, name))
}

fn name_matches(row: &[String], name: &OrderName) -> bool {
    row.get(NAME_COL).is_some_and(|cell| name.matches(cell))
}

/// Sheet row (1-based) of scan index `index`.
const fn row_number(index: usize) -> usize {
    index + FIRST_DATA_ROW
}

fn cell(row: &[String], col: usize) -> String {
    row.get(col).cloned().unwrap_or_default()
}

fn decode_payload(name: &OrderName, row: &[String]) -> Result<Value, RepositoryError> {
    let text = row
        .get(PAYLOAD_COL)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| RepositoryError::CorruptRecord {
            key: name.to_string(),
            reason: "payload cell is empty".to_string(),
        })?;

    serde_json::from_str(text).map_err(|e| RepositoryError::CorruptRecord {
        key: name.to_string(),
        reason: e.to_string(),
    })
}

#[async_trait]
impl<S: RangeStore> OrderRepository for SheetOrderRepository<S> {
    async fn exists(&self, name: &str) -> Result<bool, RepositoryError> {
        let name = OrderName::parse(name)?;
        let rows = self.store.get(&self.names_range()).await?;
        Ok(rows.iter().any(|row| name_matches(row, &name)))
    }

    async fn list(&self) -> Result<Vec<OrderSummary>, RepositoryError> {
        let rows = self.store.get(&self.records_range(SAVED_AT_COL)).await?;
        Ok(rows
            .iter()
            .map(|row| OrderSummary {
                order_name: cell(row, NAME_COL),
                saved_at: cell(row, SAVED_AT_COL),
            })
            .collect())
    }

    async fn get(&self, name: &str) -> Result<Option<SavedOrder>, RepositoryError> {
        let name = OrderName::parse(name)?;
        let rows = self.store.get(&self.records_range(PAYLOAD_COL)).await?;

        let Some(index) = first_match(&rows, &name) else {
            return Ok(None);
        };
        let row = &rows[index];

        Ok(Some(SavedOrder {
            order_name: name.to_string(),
            saved_at: cell(row, SAVED_AT_COL),
            payload: decode_payload(&name, row)?,
        }))
    }

    async fn save(&self, name: &str, payload: &Value) -> Result<(), RepositoryError> {
        let name = OrderName::parse(name)?;
        if payload.is_null() {
            return Err(RepositoryError::Validation {
                field: "payload".to_string(),
                message: "payload required".to_string(),
            });
        }

        let saved_at = format_saved_at(self.clock.now());
        let json = payload.to_string();

        if let Some(lineup) = LineupPayload::view(payload) {
            tracing::debug!(
                order_name = %name,
                players = lineup.players.len(),
                starters = lineup.starting_list.len(),
                "Saving lineup"
            );
        }

        let values = vec![vec![name.to_string(), saved_at.clone(), json]];
        match self.locate_last(&name).await? {
            Some(row) => {
                let range = SheetRange::row(&self.sheet, NAME_COL, PAYLOAD_COL, row);
                self.store.update(&range, values, ValueInput::Raw).await?;
                tracing::info!(order_name = %name, row, saved_at = %saved_at, "Order overwritten");
            }
            None => {
                let range = SheetRange::columns(&self.sheet, NAME_COL, PAYLOAD_COL);
                self.store.append(&range, values, ValueInput::Raw).await?;
                tracing::info!(order_name = %name, saved_at = %saved_at, "Order created");
            }
        }
        Ok(())
    }

    async fn delete(&self, name: &str) -> Result<DeleteOutcome, RepositoryError> {
        let name = OrderName::parse(name)?;

        let Some(row) = self.locate_last(&name).await? else {
            tracing::debug!(order_name = %name, "Delete target not found");
            return Ok(DeleteOutcome::NotFound);
        };

        let sheet_id = self.store.sheet_id(&self.sheet).await?;
        self.store.delete_rows(sheet_id, row - 1, row).await?;

        tracing::info!(order_name = %name, row, "Order deleted");
        Ok(DeleteOutcome::Deleted)
    }
}
