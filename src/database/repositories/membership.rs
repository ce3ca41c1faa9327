//! Membership repository implementation

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::database::ports::MembershipStore;
use crate::models::Membership;
use crate::utils::errors::Result;

#[derive(Debug, Clone)]
pub struct MembershipRepository {
    pool: PgPool,
}

impl MembershipRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const MEMBERSHIP_COLUMNS: &str =
    "id, user_id, group_id, joined_at, is_active, total_paid, total_received";

#[async_trait]
impl MembershipStore for MembershipRepository {
    async fn insert(&self, membership: Membership) -> Result<Membership> {
        let inserted = sqlx::query_as::<_, Membership>(&format!(
            r#"
            INSERT INTO memberships (id, user_id, group_id, joined_at, is_active, total_paid, total_received)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {MEMBERSHIP_COLUMNS}
            "#
        ))
        .bind(membership.id)
        .bind(membership.user_id)
        .bind(membership.group_id)
        .bind(membership.joined_at)
        .bind(membership.is_active)
        .bind(membership.total_paid)
        .bind(membership.total_received)
        .fetch_one(&self.pool)
        .await?;

        Ok(inserted)
    }

    async fn find(&self, user_id: Uuid, group_id: Uuid) -> Result<Option<Membership>> {
        let membership = sqlx::query_as::<_, Membership>(&format!(
            "SELECT {MEMBERSHIP_COLUMNS} FROM memberships WHERE user_id = $1 AND group_id = $2"
        ))
        .bind(user_id)
        .bind(group_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(membership)
    }

    async fn exists(&self, user_id: Uuid, group_id: Uuid) -> Result<bool> {
        let count: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM memberships WHERE user_id = $1 AND group_id = $2",
        )
        .bind(user_id)
        .bind(group_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(count.0 > 0)
    }

    async fn delete(&self, user_id: Uuid, group_id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM memberships WHERE user_id = $1 AND group_id = $2")
            .bind(user_id)
            .bind(group_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_for_group(&self, group_id: Uuid) -> Result<u64> {
        let result = sqlx::query("DELETE FROM memberships WHERE group_id = $1")
            .bind(group_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    async fn list_for_group(&self, group_id: Uuid) -> Result<Vec<Membership>> {
        let memberships = sqlx::query_as::<_, Membership>(&format!(
            "SELECT {MEMBERSHIP_COLUMNS} FROM memberships WHERE group_id = $1 ORDER BY joined_at ASC"
        ))
        .bind(group_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(memberships)
    }
}
