//! HTTP/REST API adapter.
//!
//! Inbound adapter exposing the roster, order and secret operations as JSON
//! endpoints. Every endpoint is reachable under a kebab-case path and its
//! camelCase alias.

mod controller;
mod error;
mod middleware;
mod request;
mod response;

pub use controller::{AppState, create_router};
pub use error::ApiError;
pub use request::*;
pub use response::*;
