//! equb-core
//!
//! Group lifecycle, payout rotation and transaction ledger core for an
//! equb (rotating-savings-group) backend. The HTTP transport, request
//! validation and authentication layers are external collaborators that
//! call into the services exposed here.

pub mod config;
pub mod database;
pub mod models;
pub mod services;
pub mod utils;

// Re-export commonly used types
pub use config::Settings;
pub use utils::errors::{EqubError, Result};

// Re-export main components for easy access
pub use database::Stores;
pub use services::ServiceFactory;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get library information
pub fn info() -> String {
    format!("{} v{}", NAME, VERSION)
}
