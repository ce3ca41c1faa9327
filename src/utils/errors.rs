//! Error handling for equb-core
//!
//! This module defines the main error types used throughout the crate
//! and provides a unified error handling strategy. Expected failures
//! (NotFound/Conflict/BadRequest) carry fixed, designed messages so the
//! transport layer never leaks storage-engine detail to callers.

use thiserror::Error;
use uuid::Uuid;

/// Main error type for equb-core operations
#[derive(Error, Debug)]
pub enum EqubError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Database migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Group not found")]
    GroupNotFound { group_id: Uuid },

    #[error("User not found")]
    UserNotFound { user_id: Uuid },

    #[error("User already in group")]
    AlreadyInGroup { group_id: Uuid, user_id: Uuid },

    #[error("{0}")]
    BadRequest(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for equb-core operations
pub type Result<T> = std::result::Result<T, EqubError>;

impl EqubError {
    /// HTTP-style status category for the transport layer.
    ///
    /// Unexpected kinds (storage, serialization, I/O) map to 500 and are
    /// passed through unchanged for the caller to classify as internal.
    pub fn status_code(&self) -> u16 {
        match self {
            EqubError::GroupNotFound { .. } | EqubError::UserNotFound { .. } => 404,
            EqubError::AlreadyInGroup { .. } => 409,
            EqubError::BadRequest(_) => 400,
            EqubError::Database(_)
            | EqubError::Migration(_)
            | EqubError::Config(_)
            | EqubError::Serialization(_)
            | EqubError::Io(_) => 500,
        }
    }

    /// Whether this is an expected, operational failure (a precondition or
    /// lookup miss) as opposed to an internal fault.
    pub fn is_operational(&self) -> bool {
        self.status_code() < 500
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_code_mapping() {
        let group_id = Uuid::new_v4();
        let user_id = Uuid::new_v4();

        assert_eq!(EqubError::GroupNotFound { group_id }.status_code(), 404);
        assert_eq!(EqubError::UserNotFound { user_id }.status_code(), 404);
        assert_eq!(
            EqubError::AlreadyInGroup { group_id, user_id }.status_code(),
            409
        );
        assert_eq!(
            EqubError::BadRequest("No eligible members for payout".to_string()).status_code(),
            400
        );
        assert_eq!(EqubError::Config("missing url".to_string()).status_code(), 500);
    }

    #[test]
    fn test_fixed_messages() {
        let group_id = Uuid::new_v4();
        let user_id = Uuid::new_v4();

        assert_eq!(
            EqubError::GroupNotFound { group_id }.to_string(),
            "Group not found"
        );
        assert_eq!(
            EqubError::AlreadyInGroup { group_id, user_id }.to_string(),
            "User already in group"
        );
    }

    #[test]
    fn test_operational_classification() {
        let group_id = Uuid::new_v4();
        assert!(EqubError::GroupNotFound { group_id }.is_operational());
        assert!(!EqubError::Config("bad".to_string()).is_operational());
    }
}
