//! Cycle model
//!
//! Append-only rotation history. Every successful payout rotation closes
//! the running cycle with a Completed row, so winner selection is auditable
//! beyond the group's single `current_winner` pointer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "cycle_status", rename_all = "lowercase")]
pub enum CycleStatus {
    Pending,
    Active,
    Completed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Cycle {
    pub id: Uuid,
    pub group_id: Uuid,
    pub cycle_number: i32,
    pub started_at: DateTime<Utc>,
    pub ended_at: Option<DateTime<Utc>>,
    pub status: CycleStatus,
    pub winner: Option<Uuid>,
    /// Pooled amount for the cycle: group amount times member count.
    pub total_amount: i64,
}

impl Cycle {
    /// Record the completion of one rotation.
    pub fn completed(
        group_id: Uuid,
        cycle_number: i32,
        winner: Uuid,
        total_amount: i64,
        started_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            group_id,
            cycle_number,
            started_at,
            ended_at: Some(Utc::now()),
            status: CycleStatus::Completed,
            winner: Some(winner),
            total_amount,
        }
    }
}
