//! Roster Bounded Context
//!
//! The team's players and their fielding eligibility, kept in a fixed
//! nine-column table that is always replaced as a whole.

pub mod player;
pub mod repository;

pub use player::{PLAYER_COLUMNS, Player};
pub use repository::RosterRepository;
