//! Group model
//!
//! One savings circle. The group exclusively owns its `members` list and the
//! `current_winner`/`current_cycle` fields; they are mutated only through
//! the group and payout services.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Group {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    /// Immutable owning user; always present in `members`.
    pub creator: Uuid,
    /// Fixed contribution/payout unit in minor currency units.
    pub amount: i64,
    /// Cycle length in days.
    pub cycle_duration_days: i32,
    /// Starts at 1 and only ever moves forward.
    pub current_cycle: i32,
    pub current_winner: Option<Uuid>,
    pub admin: Option<Uuid>,
    pub is_active: bool,
    pub start_date: DateTime<Utc>,
    /// Unique member ids; insertion order is kept but carries no meaning.
    pub members: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateGroupRequest {
    pub name: String,
    pub description: Option<String>,
    pub amount: i64,
    pub cycle_duration_days: i32,
    pub creator: Uuid,
}

impl Group {
    /// Build a new group from a creation request. The creator auto-joins as
    /// the first member.
    pub fn from_request(request: CreateGroupRequest) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: request.name,
            description: request.description,
            creator: request.creator,
            amount: request.amount,
            cycle_duration_days: request.cycle_duration_days,
            current_cycle: 1,
            current_winner: None,
            admin: None,
            is_active: true,
            start_date: now,
            members: vec![request.creator],
            created_at: now,
            updated_at: now,
        }
    }

    pub fn has_member(&self, user_id: Uuid) -> bool {
        self.members.contains(&user_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_creator_auto_joins() {
        let creator = Uuid::new_v4();
        let group = Group::from_request(CreateGroupRequest {
            name: "Office equb".to_string(),
            description: None,
            amount: 1000,
            cycle_duration_days: 30,
            creator,
        });

        assert_eq!(group.members, vec![creator]);
        assert_eq!(group.current_cycle, 1);
        assert!(group.current_winner.is_none());
        assert!(group.is_active);
        assert!(group.has_member(creator));
    }
}
