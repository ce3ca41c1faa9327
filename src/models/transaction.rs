//! Transaction model
//!
//! One funds-movement attempt. Rows are never deleted; a failed attempt
//! stays on record and a resubmission creates a fresh row. Status moves
//! pending -> {completed, failed} exactly once.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "transaction_type", rename_all = "lowercase")]
pub enum TransactionType {
    Contribution,
    Payout,
    Penalty,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "transaction_status", rename_all = "lowercase")]
pub enum TransactionStatus {
    Pending,
    Completed,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Transaction {
    pub id: Uuid,
    pub user_id: Uuid,
    pub group_id: Uuid,
    pub amount: i64,
    pub kind: TransactionType,
    pub status: TransactionStatus,
    /// External reference id returned by the gateway on success.
    pub reference: Option<String>,
    pub description: Option<String>,
    /// Set exactly once, when the row reaches a terminal status.
    pub processed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Transaction {
    /// Create a pending transaction row for a transfer attempt.
    pub fn pending(
        user_id: Uuid,
        group_id: Uuid,
        amount: i64,
        kind: TransactionType,
        description: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            group_id,
            amount,
            kind,
            status: TransactionStatus::Pending,
            reference: None,
            description,
            processed_at: None,
            created_at: Utc::now(),
        }
    }

    /// Finalize to completed with the gateway reference.
    pub fn complete(&mut self, reference: String) {
        self.status = TransactionStatus::Completed;
        self.reference = Some(reference);
        self.processed_at = Some(Utc::now());
    }

    /// Finalize to failed. The gateway's failure detail stays out of the
    /// row; the status itself is the audit record.
    pub fn fail(&mut self) {
        self.status = TransactionStatus::Failed;
        self.processed_at = Some(Utc::now());
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self.status,
            TransactionStatus::Completed | TransactionStatus::Failed
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pending_transaction_is_not_terminal() {
        let tx = Transaction::pending(
            Uuid::new_v4(),
            Uuid::new_v4(),
            1000,
            TransactionType::Contribution,
            None,
        );
        assert_eq!(tx.status, TransactionStatus::Pending);
        assert!(!tx.is_terminal());
        assert!(tx.processed_at.is_none());
    }

    #[test]
    fn test_complete_sets_reference_and_timestamp() {
        let mut tx = Transaction::pending(
            Uuid::new_v4(),
            Uuid::new_v4(),
            1000,
            TransactionType::Contribution,
            None,
        );
        tx.complete("txn_abc".to_string());
        assert_eq!(tx.status, TransactionStatus::Completed);
        assert_eq!(tx.reference.as_deref(), Some("txn_abc"));
        assert!(tx.processed_at.is_some());
        assert!(tx.is_terminal());
    }

    #[test]
    fn test_fail_is_terminal_without_reference() {
        let mut tx = Transaction::pending(
            Uuid::new_v4(),
            Uuid::new_v4(),
            500,
            TransactionType::Payout,
            None,
        );
        tx.fail();
        assert_eq!(tx.status, TransactionStatus::Failed);
        assert!(tx.reference.is_none());
        assert!(tx.processed_at.is_some());
    }
}
