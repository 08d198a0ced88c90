//! Domain Layer
//!
//! Records, repository traits and errors with no infrastructure dependencies.
//!
//! # Bounded Contexts
//!
//! - [`order_book`]: Saved lineups keyed by a caller-chosen name
//! - [`roster`]: Team players and their fielding eligibility
//! - [`access`]: The shared secret guarding edits

pub mod access;
pub mod order_book;
pub mod roster;
pub mod shared;
