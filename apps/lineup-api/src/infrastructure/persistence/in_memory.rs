//! In-memory range store for testing.
//!
//! Cells are stored verbatim whatever the requested `ValueInput`.

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::application::ports::{RangeStore, RangeStoreError, Rows, SheetRange, ValueInput};

#[derive(Debug, Default)]
struct Sheet {
    id: i64,
    rows: Rows,
}

impl Sheet {
    fn write(&mut self, top: usize, left: usize, rows: Rows) {
        for (offset, cells) in rows.into_iter().enumerate() {
            let idx = top + offset - 1;
            if self.rows.len() <= idx {
                self.rows.resize_with(idx + 1, Vec::new);
            }
            let row = &mut self.rows[idx];
            if row.len() < left + cells.len() {
                row.resize(left + cells.len(), String::new());
            }
            for (col, cell) in cells.into_iter().enumerate() {
                row[left + col] = cell;
            }
        }
        self.trim();
    }

    /// Drop trailing blank cells and rows so reads stay ragged.
    fn trim(&mut self) {
        for row in &mut self.rows {
            while row.last().is_some_and(String::is_empty) {
                row.pop();
            }
        }
        while self.rows.last().is_some_and(Vec::is_empty) {
            self.rows.pop();
        }
    }

    fn row_has_data(&self, idx: usize, first_col: usize, last_col: usize) -> bool {
        self.rows.get(idx).is_some_and(|row| {
            row.iter()
                .skip(first_col)
                .take(last_col - first_col + 1)
                .any(|c| !c.is_empty())
        })
    }
}

/// In-memory implementation of `RangeStore`.
///
/// Mirrors the spreadsheet behaviour the repositories depend on: ragged
/// reads, append below the last non-empty row, and structural row deletion.
/// Suitable for testing and development. Not for production use.
#[derive(Debug, Default)]
pub struct InMemoryRangeStore {
    sheets: RwLock<HashMap<String, Sheet>>,
}

impl InMemoryRangeStore {
    /// Create a store with the given empty sheets.
    #[must_use]
    pub fn with_sheets<'a>(titles: impl IntoIterator<Item = &'a str>) -> Self {
        let store = Self::default();
        for title in titles {
            store.add_sheet(title);
        }
        store
    }

    /// Add an empty sheet. Existing sheets are left untouched.
    pub fn add_sheet(&self, title: &str) {
        let mut sheets = self.sheets.write();
        let next_id = i64::try_from(sheets.len()).unwrap_or(i64::MAX) * 1_000 + 17;
        sheets.entry(title.to_string()).or_insert_with(|| Sheet {
            id: next_id,
            rows: Vec::new(),
        });
    }

    /// Replace the full contents of a sheet, creating it if needed (for test setup).
    pub fn set_rows(&self, title: &str, rows: Rows) {
        self.add_sheet(title);
        let mut sheets = self.sheets.write();
        if let Some(sheet) = sheets.get_mut(title) {
            sheet.rows = Vec::new();
            sheet.write(1, 0, rows);
        }
    }

    /// Snapshot of a sheet's rows, header included.
    #[must_use]
    pub fn rows(&self, title: &str) -> Rows {
        self.sheets
            .read()
            .get(title)
            .map(|s| s.rows.clone())
            .unwrap_or_default()
    }

    fn missing(range: &SheetRange) -> RangeStoreError {
        RangeStoreError::Upstream {
            message: format!("Unable to parse range: {range}"),
        }
    }
}

#[async_trait]
impl RangeStore for InMemoryRangeStore {
    async fn get(&self, range: &SheetRange) -> Result<Rows, RangeStoreError> {
        let sheets = self.sheets.read();
        let sheet = sheets.get(range.sheet()).ok_or_else(|| Self::missing(range))?;

        let top = range.first_row().unwrap_or(1) - 1;
        let bottom = range
            .last_row()
            .map_or(sheet.rows.len(), |r| r.min(sheet.rows.len()));

        let mut out: Rows = sheet
            .rows
            .iter()
            .take(bottom)
            .skip(top)
            .map(|row| {
                let mut cells: Vec<String> = row
                    .iter()
                    .skip(range.first_column())
                    .take(range.width())
                    .cloned()
                    .collect();
                while cells.last().is_some_and(String::is_empty) {
                    cells.pop();
                }
                cells
            })
            .collect();
        while out.last().is_some_and(Vec::is_empty) {
            out.pop();
        }
        Ok(out)
    }

    async fn update(
        &self,
        range: &SheetRange,
        rows: Rows,
        _input: ValueInput,
    ) -> Result<(), RangeStoreError> {
        let mut sheets = self.sheets.write();
        let sheet = sheets
            .get_mut(range.sheet())
            .ok_or_else(|| Self::missing(range))?;
        sheet.write(range.first_row().unwrap_or(1), range.first_column(), rows);
        Ok(())
    }

    async fn append(
        &self,
        range: &SheetRange,
        rows: Rows,
        _input: ValueInput,
    ) -> Result<(), RangeStoreError> {
        let mut sheets = self.sheets.write();
        let sheet = sheets
            .get_mut(range.sheet())
            .ok_or_else(|| Self::missing(range))?;

        let floor = range.first_row().unwrap_or(1);
        let last_used = (0..sheet.rows.len())
            .rev()
            .find(|&idx| sheet.row_has_data(idx, range.first_column(), range.last_column()))
            .map_or(0, |idx| idx + 1);
        let top = (last_used + 1).max(floor);

        sheet.write(top, range.first_column(), rows);
        Ok(())
    }

    async fn clear(&self, range: &SheetRange) -> Result<(), RangeStoreError> {
        let mut sheets = self.sheets.write();
        let sheet = sheets
            .get_mut(range.sheet())
            .ok_or_else(|| Self::missing(range))?;

        let top = range.first_row().unwrap_or(1) - 1;
        let bottom = range
            .last_row()
            .map_or(sheet.rows.len(), |r| r.min(sheet.rows.len()));
        for row in sheet.rows.iter_mut().take(bottom).skip(top) {
            for cell in row
                .iter_mut()
                .skip(range.first_column())
                .take(range.width())
            {
                cell.clear();
            }
        }
        sheet.trim();
        Ok(())
    }

    async fn sheet_id(&self, title: &str) -> Result<i64, RangeStoreError> {
        self.sheets
            .read()
            .get(title)
            .map(|s| s.id)
            .ok_or_else(|| RangeStoreError::SheetNotFound {
                title: title.to_string(),
            })
    }

    async fn delete_rows(
        &self,
        sheet_id: i64,
        start: usize,
        end: usize,
    ) -> Result<(), RangeStoreError> {
        let mut sheets = self.sheets.write();
        let sheet = sheets
            .values_mut()
            .find(|s| s.id == sheet_id)
            .ok_or_else(|| RangeStoreError::Upstream {
                message: format!("No grid with id: {sheet_id}"),
            })?;

        let end = end.min(sheet.rows.len());
        if start < end {
            sheet.rows.drain(start..end);
        }
        Ok(())
    }
}
