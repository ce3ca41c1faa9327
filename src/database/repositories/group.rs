//! Group repository implementation

use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::database::ports::GroupStore;
use crate::models::Group;
use crate::utils::errors::Result;

#[derive(Debug, Clone)]
pub struct GroupRepository {
    pool: PgPool,
}

impl GroupRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const GROUP_COLUMNS: &str = "id, name, description, creator, amount, cycle_duration_days, \
     current_cycle, current_winner, admin, is_active, start_date, members, created_at, updated_at";

#[async_trait]
impl GroupStore for GroupRepository {
    async fn insert(&self, group: Group) -> Result<Group> {
        let inserted = sqlx::query_as::<_, Group>(&format!(
            r#"
            INSERT INTO groups (id, name, description, creator, amount, cycle_duration_days,
                current_cycle, current_winner, admin, is_active, start_date, members, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            RETURNING {GROUP_COLUMNS}
            "#
        ))
        .bind(group.id)
        .bind(group.name)
        .bind(group.description)
        .bind(group.creator)
        .bind(group.amount)
        .bind(group.cycle_duration_days)
        .bind(group.current_cycle)
        .bind(group.current_winner)
        .bind(group.admin)
        .bind(group.is_active)
        .bind(group.start_date)
        .bind(group.members)
        .bind(group.created_at)
        .bind(group.updated_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(inserted)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Group>> {
        let group = sqlx::query_as::<_, Group>(&format!(
            "SELECT {GROUP_COLUMNS} FROM groups WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(group)
    }

    async fn update(&self, group: Group) -> Result<Group> {
        let updated = sqlx::query_as::<_, Group>(&format!(
            r#"
            UPDATE groups
            SET name = $2,
                description = $3,
                amount = $4,
                cycle_duration_days = $5,
                current_cycle = $6,
                current_winner = $7,
                admin = $8,
                is_active = $9,
                members = $10,
                updated_at = $11
            WHERE id = $1
            RETURNING {GROUP_COLUMNS}
            "#
        ))
        .bind(group.id)
        .bind(group.name)
        .bind(group.description)
        .bind(group.amount)
        .bind(group.cycle_duration_days)
        .bind(group.current_cycle)
        .bind(group.current_winner)
        .bind(group.admin)
        .bind(group.is_active)
        .bind(group.members)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(updated)
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM groups WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn list(&self) -> Result<Vec<Group>> {
        let groups = sqlx::query_as::<_, Group>(&format!(
            "SELECT {GROUP_COLUMNS} FROM groups ORDER BY created_at ASC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(groups)
    }

    async fn find_for_user(&self, user_id: Uuid) -> Result<Vec<Group>> {
        let groups = sqlx::query_as::<_, Group>(&format!(
            "SELECT {GROUP_COLUMNS} FROM groups WHERE $1 = ANY(members) OR admin = $1 ORDER BY created_at ASC"
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(groups)
    }
}
