//! Google Sheets Range Store Adapter
//!
//! Implementation of `RangeStore` over the Google Sheets v4 REST API:
//! - Values get / update / append / clear on A1 ranges
//! - Sheet id lookup from spreadsheet metadata
//! - Structural row deletion via `batchUpdate`
//!
//! Writes pass the caller's `valueInputOption` (`RAW` or `USER_ENTERED`).
//! Calls are not retried.

mod adapter;
mod api_types;
mod config;
mod error;
mod http_client;

pub use adapter::SheetsRangeStore;
pub use config::{DEFAULT_API_BASE_URL, SheetsConfig};
pub use error::SheetsError;
