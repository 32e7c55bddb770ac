//! HTTP request handlers for the CRM web server

pub mod auth;
pub mod health;
pub mod settings;
pub mod types;
pub mod views;

pub use auth::*;
pub use health::*;
pub use settings::*;
pub use views::*;

pub use types::*;
