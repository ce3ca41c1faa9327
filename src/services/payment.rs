//! Payment processing service
//!
//! Creates a pending ledger row before every transfer attempt and
//! finalizes it exactly once when the attempt settles. Failed attempts are
//! never retried here; the failed row is the permanent record and a
//! resubmission creates a fresh row. There is no idempotency key on
//! (user, group, cycle), so a member can record two completed
//! contributions in one cycle — preserved reference behavior, documented
//! as a known gap.

use std::collections::HashMap;
use std::sync::Arc;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::database::{TransactionStore, UserStore};
use crate::models::{BankAccount, Transaction, TransactionType, UserProfile};
use crate::services::gateway::{PaymentGateway, TransferRequest};
use crate::utils::errors::{EqubError, Result};
use crate::utils::logging;

#[derive(Debug, Clone)]
pub struct PaymentRequest {
    pub group_id: Uuid,
    pub user_id: Uuid,
    pub amount: i64,
    pub kind: TransactionType,
    pub description: Option<String>,
}

#[derive(Debug, Clone)]
pub struct PayoutRequest {
    pub group_id: Uuid,
    pub user_id: Uuid,
    /// Typically the group's configured amount, supplied by the caller.
    pub amount: i64,
    /// Destination override; when absent the user's stored account is
    /// resolved and passed through. Absence never blocks the attempt.
    pub bank_account: Option<BankAccount>,
}

/// A ledger entry enriched with the paying/receiving user's public profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentRecord {
    pub transaction: Transaction,
    pub user: Option<UserProfile>,
}

#[derive(Clone)]
pub struct PaymentService {
    transactions: Arc<dyn TransactionStore>,
    users: Arc<dyn UserStore>,
    gateway: Arc<dyn PaymentGateway>,
}

impl PaymentService {
    pub fn new(
        transactions: Arc<dyn TransactionStore>,
        users: Arc<dyn UserStore>,
        gateway: Arc<dyn PaymentGateway>,
    ) -> Self {
        Self {
            transactions,
            users,
            gateway,
        }
    }

    /// Process a contribution (or penalty) payment into the group pool.
    pub async fn process_payment(&self, request: PaymentRequest) -> Result<Transaction> {
        let transfer = TransferRequest {
            amount: request.amount,
            user_id: request.user_id,
            bank_account: None,
        };
        self.execute(
            Transaction::pending(
                request.user_id,
                request.group_id,
                request.amount,
                request.kind,
                request.description,
            ),
            transfer,
            "Payment processing failed",
        )
        .await
    }

    /// Process a payout to the cycle's winner.
    pub async fn process_payout(&self, request: PayoutRequest) -> Result<Transaction> {
        let bank_account = match request.bank_account {
            Some(account) => Some(account),
            None => self
                .users
                .find_by_id(request.user_id)
                .await?
                .and_then(|u| u.bank_account),
        };

        let transfer = TransferRequest {
            amount: request.amount,
            user_id: request.user_id,
            bank_account,
        };
        self.execute(
            Transaction::pending(
                request.user_id,
                request.group_id,
                request.amount,
                TransactionType::Payout,
                None,
            ),
            transfer,
            "Payout processing failed",
        )
        .await
    }

    /// All transactions for a group, newest first, with user profiles
    /// attached. A materialized list, not a stream.
    pub async fn get_group_payments(&self, group_id: Uuid) -> Result<Vec<PaymentRecord>> {
        debug!(group_id = %group_id, "Fetching group payment history");
        let transactions = self.transactions.list_for_group(group_id).await?;

        let mut profiles: HashMap<Uuid, Option<UserProfile>> = HashMap::new();
        let mut records = Vec::with_capacity(transactions.len());
        for transaction in transactions {
            let user = match profiles.get(&transaction.user_id) {
                Some(cached) => cached.clone(),
                None => {
                    let profile = self
                        .users
                        .find_by_id(transaction.user_id)
                        .await?
                        .map(|u| UserProfile::from(&u));
                    profiles.insert(transaction.user_id, profile.clone());
                    profile
                }
            };
            records.push(PaymentRecord { transaction, user });
        }

        Ok(records)
    }

    /// Run one transfer attempt against the gateway and finalize the ledger
    /// row to its terminal status. The gateway's failure detail stays in
    /// the log and the row's status; callers get the generic message.
    async fn execute(
        &self,
        pending: Transaction,
        transfer: TransferRequest,
        failure_message: &str,
    ) -> Result<Transaction> {
        let mut transaction = self.transactions.insert(pending).await?;

        match self.gateway.transfer(transfer).await {
            Ok(receipt) => {
                transaction.complete(receipt.reference);
                let transaction = self.transactions.update(transaction).await?;
                logging::log_transaction(
                    transaction.id,
                    transaction.group_id,
                    "completed",
                    transaction.amount,
                );
                Ok(transaction)
            }
            Err(gateway_error) => {
                warn!(
                    transaction_id = %transaction.id,
                    error = %gateway_error,
                    "Transfer attempt failed"
                );
                transaction.fail();
                let transaction = self.transactions.update(transaction).await?;
                logging::log_transaction(
                    transaction.id,
                    transaction.group_id,
                    "failed",
                    transaction.amount,
                );
                Err(EqubError::BadRequest(failure_message.to_string()))
            }
        }
    }
}
