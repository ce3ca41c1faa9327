//! Cycle repository implementation

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::database::ports::CycleStore;
use crate::models::Cycle;
use crate::utils::errors::Result;

#[derive(Debug, Clone)]
pub struct CycleRepository {
    pool: PgPool,
}

impl CycleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const CYCLE_COLUMNS: &str =
    "id, group_id, cycle_number, started_at, ended_at, status, winner, total_amount";

#[async_trait]
impl CycleStore for CycleRepository {
    async fn insert(&self, cycle: Cycle) -> Result<Cycle> {
        let inserted = sqlx::query_as::<_, Cycle>(&format!(
            r#"
            INSERT INTO cycles (id, group_id, cycle_number, started_at, ended_at, status, winner, total_amount)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {CYCLE_COLUMNS}
            "#
        ))
        .bind(cycle.id)
        .bind(cycle.group_id)
        .bind(cycle.cycle_number)
        .bind(cycle.started_at)
        .bind(cycle.ended_at)
        .bind(cycle.status)
        .bind(cycle.winner)
        .bind(cycle.total_amount)
        .fetch_one(&self.pool)
        .await?;

        Ok(inserted)
    }

    async fn list_for_group(&self, group_id: Uuid) -> Result<Vec<Cycle>> {
        let cycles = sqlx::query_as::<_, Cycle>(&format!(
            "SELECT {CYCLE_COLUMNS} FROM cycles WHERE group_id = $1 ORDER BY cycle_number ASC"
        ))
        .bind(group_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(cycles)
    }
}
