//! CRM Core - shared infrastructure for the dashboard workspace
//!
//! Error handling with context, logging initialisation and TOML configuration.

pub mod config;
pub mod error;
pub mod logging;

pub use config::*;
pub use error::*;
pub use logging::*;

// Re-export commonly used external types
pub use tracing;
