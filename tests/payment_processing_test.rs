//! Payment processing integration tests
//!
//! Covers the pending -> terminal transaction lifecycle, failure
//! accounting, payout bank-account resolution and the enriched payment
//! history.

mod common;

use assert_matches::assert_matches;
use common::TestContext;
use uuid::Uuid;

use equb_core::database::UserStore;
use equb_core::models::{BankAccount, TransactionStatus, TransactionType};
use equb_core::services::{PaymentRequest, PayoutRequest};
use equb_core::EqubError;

#[tokio::test]
async fn test_successful_contribution_completes_transaction() {
    let ctx = TestContext::new();
    let user = ctx.create_user("payer").await;
    let group = ctx.create_group(user.id, 0).await;

    let transaction = ctx
        .services
        .payment_service
        .process_payment(PaymentRequest {
            group_id: group.id,
            user_id: user.id,
            amount: 1000,
            kind: TransactionType::Contribution,
            description: Some("cycle 1 contribution".to_string()),
        })
        .await
        .unwrap();

    assert_eq!(transaction.status, TransactionStatus::Completed);
    assert!(transaction.is_terminal());
    assert!(transaction.reference.as_deref().unwrap().starts_with("txn_"));
    assert!(transaction.processed_at.is_some());
    assert_eq!(transaction.amount, 1000);
    assert_eq!(transaction.kind, TransactionType::Contribution);
}

#[tokio::test]
async fn test_failed_transfer_records_failed_transaction() {
    let ctx = TestContext::with_failing_gateway();
    let user = ctx.create_user("payer").await;
    let group = ctx.create_group(user.id, 0).await;

    let err = ctx
        .services
        .payment_service
        .process_payment(PaymentRequest {
            group_id: group.id,
            user_id: user.id,
            amount: 1000,
            kind: TransactionType::Contribution,
            description: None,
        })
        .await
        .unwrap_err();

    assert_matches!(err, EqubError::BadRequest(_));
    assert_eq!(err.to_string(), "Payment processing failed");

    // The attempt itself stays on the ledger as the audit record.
    let records = ctx
        .services
        .payment_service
        .get_group_payments(group.id)
        .await
        .unwrap();
    assert_eq!(records.len(), 1);
    let failed = &records[0].transaction;
    assert_eq!(failed.status, TransactionStatus::Failed);
    assert!(failed.is_terminal());
    assert!(failed.reference.is_none());
    assert!(failed.processed_at.is_some());
}

#[tokio::test]
async fn test_failed_payout_uses_payout_message() {
    let ctx = TestContext::with_failing_gateway();
    let user = ctx.create_user("winner").await;
    let group = ctx.create_group(user.id, 0).await;

    let err = ctx
        .services
        .payment_service
        .process_payout(PayoutRequest {
            group_id: group.id,
            user_id: user.id,
            amount: group.amount,
            bank_account: None,
        })
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "Payout processing failed");
}

#[tokio::test]
async fn test_payout_resolves_stored_bank_account() {
    let ctx = TestContext::new();
    let mut user = ctx.create_user("winner").await;
    user.bank_account = Some(BankAccount {
        account_number: "0012345678".to_string(),
        bank_name: "Commercial Bank".to_string(),
        account_holder: "Winner W.".to_string(),
    });
    ctx.stores.users.update(user.clone()).await.unwrap();
    let group = ctx.create_group(user.id, 0).await;

    let transaction = ctx
        .services
        .payment_service
        .process_payout(PayoutRequest {
            group_id: group.id,
            user_id: user.id,
            amount: group.amount,
            bank_account: None,
        })
        .await
        .unwrap();

    assert_eq!(transaction.kind, TransactionType::Payout);
    assert_eq!(transaction.status, TransactionStatus::Completed);
}

#[tokio::test]
async fn test_payout_without_bank_account_still_attempts() {
    let ctx = TestContext::new();
    let user = ctx.create_user("unbanked").await;
    let group = ctx.create_group(user.id, 0).await;

    let transaction = ctx
        .services
        .payment_service
        .process_payout(PayoutRequest {
            group_id: group.id,
            user_id: user.id,
            amount: group.amount,
            bank_account: None,
        })
        .await
        .unwrap();

    assert_eq!(transaction.status, TransactionStatus::Completed);
}

#[tokio::test]
async fn test_resubmission_creates_a_new_transaction_row() {
    let ctx = TestContext::new();
    let user = ctx.create_user("payer").await;
    let group = ctx.create_group(user.id, 0).await;

    let request = PaymentRequest {
        group_id: group.id,
        user_id: user.id,
        amount: 1000,
        kind: TransactionType::Contribution,
        description: None,
    };
    let first = ctx
        .services
        .payment_service
        .process_payment(request.clone())
        .await
        .unwrap();
    let second = ctx
        .services
        .payment_service
        .process_payment(request)
        .await
        .unwrap();

    // No idempotency key: both attempts settle as independent rows.
    assert_ne!(first.id, second.id);
    let records = ctx
        .services
        .payment_service
        .get_group_payments(group.id)
        .await
        .unwrap();
    assert_eq!(records.len(), 2);
}

#[tokio::test]
async fn test_group_payments_are_newest_first_and_enriched() {
    let ctx = TestContext::new();
    let alice = ctx.create_user("alice").await;
    let bob = ctx.create_user("bob").await;
    let group = ctx.create_group(alice.id, 0).await;
    ctx.services
        .group_service
        .join_group(group.id, bob.id)
        .await
        .unwrap();

    for user_id in [alice.id, bob.id] {
        ctx.services
            .payment_service
            .process_payment(PaymentRequest {
                group_id: group.id,
                user_id,
                amount: 1000,
                kind: TransactionType::Contribution,
                description: None,
            })
            .await
            .unwrap();
    }

    let records = ctx
        .services
        .payment_service
        .get_group_payments(group.id)
        .await
        .unwrap();
    assert_eq!(records.len(), 2);
    for pair in records.windows(2) {
        assert!(pair[0].transaction.created_at >= pair[1].transaction.created_at);
    }

    let usernames: Vec<&str> = records
        .iter()
        .map(|r| r.user.as_ref().unwrap().username.as_str())
        .collect();
    assert!(usernames.contains(&"alice"));
    assert!(usernames.contains(&"bob"));
}

#[tokio::test]
async fn test_unknown_payer_yields_unenriched_record() {
    let ctx = TestContext::new();
    let ghost = Uuid::new_v4();
    let creator = ctx.create_user("creator").await;
    let group = ctx.create_group(creator.id, 0).await;

    ctx.services
        .payment_service
        .process_payment(PaymentRequest {
            group_id: group.id,
            user_id: ghost,
            amount: 500,
            kind: TransactionType::Penalty,
            description: None,
        })
        .await
        .unwrap();

    let records = ctx
        .services
        .payment_service
        .get_group_payments(group.id)
        .await
        .unwrap();
    assert_eq!(records.len(), 1);
    assert!(records[0].user.is_none());
    assert_eq!(records[0].transaction.kind, TransactionType::Penalty);
}

#[tokio::test]
async fn test_observed_transactions_are_never_pending() {
    let ctx = TestContext::with_failing_gateway();
    let user = ctx.create_user("payer").await;
    let group = ctx.create_group(user.id, 0).await;

    for _ in 0..5 {
        let _ = ctx
            .services
            .payment_service
            .process_payment(PaymentRequest {
                group_id: group.id,
                user_id: user.id,
                amount: 1000,
                kind: TransactionType::Contribution,
                description: None,
            })
            .await;
    }

    for record in ctx
        .services
        .payment_service
        .get_group_payments(group.id)
        .await
        .unwrap()
    {
        assert!(record.transaction.is_terminal());
    }
}
