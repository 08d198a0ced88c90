//! Persistence Adapters
//!
//! Sheet-backed implementations of the repository traits, plus an in-memory
//! `RangeStore` for tests and local runs.

pub mod in_memory;
pub mod layout;
pub mod sheet_orders;
pub mod sheet_roster;
pub mod sheet_secret;

pub use in_memory::InMemoryRangeStore;
pub use layout::SheetLayout;
pub use sheet_orders::SheetOrderRepository;
pub use sheet_roster::SheetRosterRepository;
pub use sheet_secret::SheetSecretRepository;
