//! Configuration Module
//!
//! Service configuration loaded from environment variables.

mod settings;

pub use settings::{ConfigError, Credentials, ServerSettings, ServiceConfig};
