//! Membership model
//!
//! A join record pairing one user and one group, kept as a derived index
//! over `Group.members` for fast existence checks and per-member totals.
//! The (user, group) pair is unique.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Membership {
    pub id: Uuid,
    pub user_id: Uuid,
    pub group_id: Uuid,
    pub joined_at: DateTime<Utc>,
    pub is_active: bool,
    /// Running total this user has contributed in this group.
    pub total_paid: i64,
    /// Running total this user has received in payouts from this group.
    pub total_received: i64,
}

impl Membership {
    pub fn new(user_id: Uuid, group_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            group_id,
            joined_at: Utc::now(),
            is_active: true,
            total_paid: 0,
            total_received: 0,
        }
    }
}
