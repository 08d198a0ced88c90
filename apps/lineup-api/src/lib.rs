// Allow unwrap/expect in tests - tests should panic on unexpected errors
#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::significant_drop_tightening,
        clippy::too_many_lines,
        clippy::needless_pass_by_value,
        clippy::items_after_statements
    )
)]

//! Lineup API - Spreadsheet-backed roster and lineup service
//!
//! A small HTTP service that uses one spreadsheet as its database. It stores
//! the team roster, saved lineups ("orders") and a shared edit secret, and
//! exposes them as JSON endpoints.
//!
//! # Layers (inside → outside)
//!
//! - **Domain**: Records, repository traits and errors
//!   - `order_book`: Saved lineups keyed by name (upsert, delete-by-row)
//!   - `roster`: The nine-column player table
//!   - `access`: The single-cell shared secret
//!
//! - **Application**: Port definitions and use cases
//!   - `ports`: `RangeStore` (tabular range store), `Clock`
//!   - `use_cases`: `AccessGate` (secret check and rotation)
//!
//! - **Infrastructure**: Adapters and external integrations
//!   - `sheets`: Google Sheets v4 REST adapter for `RangeStore`
//!   - `persistence`: Sheet-backed repositories and an in-memory range store
//!   - `http`: Axum router, handlers, CORS and request-id middleware
//!   - `config`, `telemetry`, `metrics`: Ambient service concerns
//!
//! # Data Flow
//!
//! ```text
//! HTTP request ──► controller ──► repository ──► RangeStore ──► Sheets API
//!                      ▲                              │
//!                      └──────── JSON response ◄──────┘
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]

// =============================================================================
// Module Declarations
// =============================================================================

/// Domain layer - Records, repository traits and errors.
pub mod domain;

/// Application layer - Ports and use cases.
pub mod application;

/// Infrastructure layer - Adapters and external integrations.
pub mod infrastructure;

// =============================================================================
// Re-exports
// =============================================================================

// Domain types
pub use domain::access::{SecretCheck, SecretRepository, SecretUpdate};
pub use domain::order_book::{
    DeleteOutcome, LineupPayload, OrderName, OrderRepository, OrderSummary, SavedOrder,
};
pub use domain::roster::{Player, RosterRepository};
pub use domain::shared::RepositoryError;

// Ports
pub use application::ports::{
    Clock, FixedClock, RangeStore, RangeStoreError, SheetRange, SystemClock, ValueInput,
};
pub use application::use_cases::AccessGate;

// Infrastructure
pub use infrastructure::config::{ConfigError, Credentials, ServerSettings, ServiceConfig};
pub use infrastructure::http::{AppState, create_router};
pub use infrastructure::persistence::{
    InMemoryRangeStore, SheetLayout, SheetOrderRepository, SheetRosterRepository,
    SheetSecretRepository,
};
pub use infrastructure::sheets::{SheetsConfig, SheetsError, SheetsRangeStore};
