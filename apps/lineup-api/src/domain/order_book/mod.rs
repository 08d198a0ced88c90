//! Order Book Bounded Context
//!
//! Saved lineups ("orders") keyed by a caller-chosen name. Each order is
//! stored as one row `[orderName, savedAt, payloadJson]`.

pub mod record;
pub mod repository;

pub use record::{
    DeleteOutcome, LineupPayload, OrderName, OrderSummary, RosterEntry, SavedOrder, StartingSlot,
    format_saved_at,
};
pub use repository::OrderRepository;
