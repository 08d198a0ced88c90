//! Range Store Port (Driven Port)
//!
//! Interface to a remote tabular store addressed by A1-style ranges.
//! Cells travel as text; rows are ragged (trailing blank cells are omitted by
//! the store on reads).

use std::fmt;

use async_trait::async_trait;

use crate::domain::shared::RepositoryError;

/// Rows of cell text, outer vector in row order.
pub type Rows = Vec<Vec<String>>;

/// A rectangular address into one sheet of the store.
///
/// Columns are 0-based (`A` = 0); rows are 1-based as in A1 notation. An
/// absent first row means "from the top", an absent last row means "to the
/// end of the sheet".
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SheetRange {
    sheet: String,
    first_column: usize,
    last_column: usize,
    first_row: Option<usize>,
    last_row: Option<usize>,
}

impl SheetRange {
    /// A single cell, e.g. `B1`. Also used as the top-left anchor of a write.
    #[must_use]
    pub fn cell(sheet: impl Into<String>, column: usize, row: usize) -> Self {
        Self {
            sheet: sheet.into(),
            first_column: column,
            last_column: column,
            first_row: Some(row),
            last_row: Some(row),
        }
    }

    /// Whole columns, e.g. `A:C`.
    #[must_use]
    pub fn columns(sheet: impl Into<String>, first_column: usize, last_column: usize) -> Self {
        Self {
            sheet: sheet.into(),
            first_column,
            last_column,
            first_row: None,
            last_row: None,
        }
    }

    /// Columns from a given row to the end of the sheet, e.g. `A2:C`.
    #[must_use]
    pub fn rows_from(
        sheet: impl Into<String>,
        first_column: usize,
        last_column: usize,
        first_row: usize,
    ) -> Self {
        Self {
            sheet: sheet.into(),
            first_column,
            last_column,
            first_row: Some(first_row),
            last_row: None,
        }
    }

    /// One row across a column span, e.g. `A5:C5`.
    #[must_use]
    pub fn row(sheet: impl Into<String>, first_column: usize, last_column: usize, row: usize) -> Self {
        Self {
            sheet: sheet.into(),
            first_column,
            last_column,
            first_row: Some(row),
            last_row: Some(row),
        }
    }

    /// Sheet title.
    #[must_use]
    pub fn sheet(&self) -> &str {
        &self.sheet
    }

    /// First column (0-based).
    #[must_use]
    pub const fn first_column(&self) -> usize {
        self.first_column
    }

    /// Last column (0-based, inclusive).
    #[must_use]
    pub const fn last_column(&self) -> usize {
        self.last_column
    }

    /// First row (1-based), if bounded.
    #[must_use]
    pub const fn first_row(&self) -> Option<usize> {
        self.first_row
    }

    /// Last row (1-based, inclusive), if bounded.
    #[must_use]
    pub const fn last_row(&self) -> Option<usize> {
        self.last_row
    }

    /// Number of columns spanned.
    #[must_use]
    pub const fn width(&self) -> usize {
        self.last_column - self.first_column + 1
    }
}

impl fmt::Display for SheetRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}'!", self.sheet.replace('\'', "''"))?;

        let first = column_letters(self.first_column);
        let last = column_letters(self.last_column);
        match (self.first_row, self.last_row) {
            (Some(top), Some(bottom)) if top == bottom && self.first_column == self.last_column => {
                write!(f, "{first}{top}")
            }
            (Some(top), Some(bottom)) => write!(f, "{first}{top}:{last}{bottom}"),
            (Some(top), None) => write!(f, "{first}{top}:{last}"),
            (None, _) => write!(f, "{first}:{last}"),
        }
    }
}

/// Render a 0-based column index as A1 letters (`0` → `A`, `26` → `AA`).
#[must_use]
pub fn column_letters(index: usize) -> String {
    let mut letters = Vec::new();
    let mut n = index + 1;
    while n > 0 {
        let rem = (n - 1) % 26;
        letters.push(char::from(b'A' + u8::try_from(rem).unwrap_or(0)));
        n = (n - 1) / 26;
    }
    letters.iter().rev().collect()
}

/// How the store should interpret written cell text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueInput {
    /// Store text verbatim. `"007"` stays `"007"`.
    Raw,
    /// Parse text as if typed into the grid (numbers, booleans, formulas).
    UserEntered,
}

impl ValueInput {
    /// Wire name of the mode.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Raw => "RAW",
            Self::UserEntered => "USER_ENTERED",
        }
    }
}

/// Range store port error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RangeStoreError {
    /// No sheet carries the requested title.
    #[error("Sheet not found: {title}")]
    SheetNotFound {
        /// The missing sheet title.
        title: String,
    },

    /// The store could not be reached or rejected the call.
    #[error("{message}")]
    Upstream {
        /// Error details.
        message: String,
    },
}

impl From<RangeStoreError> for RepositoryError {
    fn from(err: RangeStoreError) -> Self {
        Self::upstream(err)
    }
}

/// Port for rectangular reads and writes against the backing grid.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RangeStore: Send + Sync {
    /// Read the cells of `range`. Trailing empty rows are omitted.
    async fn get(&self, range: &SheetRange) -> Result<Rows, RangeStoreError>;

    /// Write `rows` starting at the top-left of `range`.
    async fn update(
        &self,
        range: &SheetRange,
        rows: Rows,
        input: ValueInput,
    ) -> Result<(), RangeStoreError>;

    /// Write `rows` below the last non-empty row of the table found in `range`.
    async fn append(
        &self,
        range: &SheetRange,
        rows: Rows,
        input: ValueInput,
    ) -> Result<(), RangeStoreError>;

    /// Blank every cell of `range`.
    async fn clear(&self, range: &SheetRange) -> Result<(), RangeStoreError>;

    /// Resolve a sheet title to its numeric identifier.
    async fn sheet_id(&self, title: &str) -> Result<i64, RangeStoreError>;

    /// Structurally remove rows `[start, end)` (0-based) of a sheet, shifting
    /// the rows below up.
    async fn delete_rows(&self, sheet_id: i64, start: usize, end: usize)
    -> Result<(), RangeStoreError>;
}
