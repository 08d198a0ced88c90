//! Application Ports (Driven)
//!
//! - `RangeStore`: rectangular reads and writes against a sheet-like grid
//! - `Clock`: current UTC time

mod clock_port;
mod range_store_port;

pub use clock_port::{Clock, FixedClock, SystemClock};
pub use range_store_port::{
    RangeStore, RangeStoreError, Rows, SheetRange, ValueInput, column_letters,
};

#[cfg(test)]
pub use range_store_port::MockRangeStore;
