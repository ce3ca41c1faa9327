//! User model
//!
//! Users are owned by the external identity provider; the core only reads
//! their id, role set and payout destination. Credentials never enter this
//! crate.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::utils::errors::EqubError;

/// Closed role set. Roles are not mutually exclusive; a user may hold
/// several at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "user_role", rename_all = "snake_case")]
pub enum UserRole {
    Member,
    GroupAdmin,
    SuperAdmin,
}

impl sqlx::postgres::PgHasArrayType for UserRole {
    fn array_type_info() -> sqlx::postgres::PgTypeInfo {
        sqlx::postgres::PgTypeInfo::with_name("_user_role")
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserRole::Member => write!(f, "member"),
            UserRole::GroupAdmin => write!(f, "group_admin"),
            UserRole::SuperAdmin => write!(f, "super_admin"),
        }
    }
}

impl FromStr for UserRole {
    type Err = EqubError;

    /// Unknown role names are rejected at the boundary rather than deep in
    /// the update path.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "member" => Ok(UserRole::Member),
            "group_admin" => Ok(UserRole::GroupAdmin),
            "super_admin" => Ok(UserRole::SuperAdmin),
            _ => Err(EqubError::BadRequest("Invalid role specified".to_string())),
        }
    }
}

/// Payout destination for a user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BankAccount {
    pub account_number: String,
    pub bank_name: String,
    pub account_holder: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub roles: Vec<UserRole>,
    pub bank_account: Option<BankAccount>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn new(username: impl Into<String>, email: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            username: username.into(),
            email: email.into(),
            roles: vec![UserRole::Member],
            bank_account: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn has_role(&self, role: UserRole) -> bool {
        self.roles.contains(&role)
    }
}

/// Public profile fields exposed on enriched payment history entries
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: Uuid,
    pub username: String,
    pub email: String,
}

impl From<&User> for UserProfile {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parsing_round_trip() {
        for role in [UserRole::Member, UserRole::GroupAdmin, UserRole::SuperAdmin] {
            assert_eq!(role.to_string().parse::<UserRole>().unwrap(), role);
        }
    }

    #[test]
    fn test_unknown_role_rejected() {
        let err = "owner".parse::<UserRole>().unwrap_err();
        assert_eq!(err.to_string(), "Invalid role specified");
        assert_eq!(err.status_code(), 400);
    }

    #[test]
    fn test_new_user_defaults_to_member() {
        let user = User::new("alice", "alice@example.com");
        assert!(user.has_role(UserRole::Member));
        assert!(!user.has_role(UserRole::SuperAdmin));
        assert!(user.bank_account.is_none());
    }
}
