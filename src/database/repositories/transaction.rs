//! Transaction repository implementation
//!
//! Rows are an audit trail: inserts and status updates only, no deletes.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::database::ports::TransactionStore;
use crate::models::Transaction;
use crate::utils::errors::Result;

#[derive(Debug, Clone)]
pub struct TransactionRepository {
    pool: PgPool,
}

impl TransactionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const TRANSACTION_COLUMNS: &str =
    "id, user_id, group_id, amount, kind, status, reference, description, processed_at, created_at";

#[async_trait]
impl TransactionStore for TransactionRepository {
    async fn insert(&self, transaction: Transaction) -> Result<Transaction> {
        let inserted = sqlx::query_as::<_, Transaction>(&format!(
            r#"
            INSERT INTO transactions (id, user_id, group_id, amount, kind, status, reference, description, processed_at, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING {TRANSACTION_COLUMNS}
            "#
        ))
        .bind(transaction.id)
        .bind(transaction.user_id)
        .bind(transaction.group_id)
        .bind(transaction.amount)
        .bind(transaction.kind)
        .bind(transaction.status)
        .bind(transaction.reference)
        .bind(transaction.description)
        .bind(transaction.processed_at)
        .bind(transaction.created_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(inserted)
    }

    async fn update(&self, transaction: Transaction) -> Result<Transaction> {
        let updated = sqlx::query_as::<_, Transaction>(&format!(
            r#"
            UPDATE transactions
            SET status = $2,
                reference = $3,
                processed_at = $4
            WHERE id = $1
            RETURNING {TRANSACTION_COLUMNS}
            "#
        ))
        .bind(transaction.id)
        .bind(transaction.status)
        .bind(transaction.reference)
        .bind(transaction.processed_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(updated)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Transaction>> {
        let transaction = sqlx::query_as::<_, Transaction>(&format!(
            "SELECT {TRANSACTION_COLUMNS} FROM transactions WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(transaction)
    }

    async fn list_for_group(&self, group_id: Uuid) -> Result<Vec<Transaction>> {
        let transactions = sqlx::query_as::<_, Transaction>(&format!(
            "SELECT {TRANSACTION_COLUMNS} FROM transactions WHERE group_id = $1 ORDER BY created_at DESC"
        ))
        .bind(group_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(transactions)
    }
}
