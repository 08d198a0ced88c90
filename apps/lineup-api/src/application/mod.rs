//! Application Layer - Ports and use cases.
//!
//! This layer defines how the domain reaches external systems and holds the
//! small amount of orchestration that is not a plain repository call.

/// Port interfaces for external systems (range store, clock).
pub mod ports;

/// Use cases built on top of repositories.
pub mod use_cases;
