//! Payment gateway port and the simulated implementation
//!
//! The external transfer execution is an abstracted "move funds" capability.
//! The simulated gateway reproduces the reference behavior: a configurable
//! success rate (default 90%) and settlement latency (default 1.5s). A
//! dispatched transfer is fire-and-settle; there is no in-flight
//! cancellation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rand::Rng;
use std::time::Duration;
use thiserror::Error;
use uuid::Uuid;

use crate::config::PaymentConfig;
use crate::models::BankAccount;

/// Gateway-specific errors
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Transfer declined: {0}")]
    Declined(String),

    #[error("Transfer timed out")]
    Timeout,

    #[error("Gateway unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, Clone)]
pub struct TransferRequest {
    pub amount: i64,
    pub user_id: Uuid,
    pub bank_account: Option<BankAccount>,
}

#[derive(Debug, Clone)]
pub struct TransferReceipt {
    /// External reference id, recorded on the transaction row.
    pub reference: String,
    pub settled_at: DateTime<Utc>,
}

#[async_trait]
pub trait PaymentGateway: Send + Sync {
    async fn transfer(
        &self,
        request: TransferRequest,
    ) -> std::result::Result<TransferReceipt, GatewayError>;
}

/// Randomized transfer simulation.
#[derive(Debug, Clone)]
pub struct SimulatedGateway {
    success_rate: f64,
    delay: Duration,
}

impl SimulatedGateway {
    pub fn new(success_rate: f64, delay: Duration) -> Self {
        Self {
            success_rate,
            delay,
        }
    }

    pub fn from_config(config: &PaymentConfig) -> Self {
        Self::new(config.success_rate, Duration::from_millis(config.delay_ms))
    }
}

impl Default for SimulatedGateway {
    fn default() -> Self {
        Self::new(0.9, Duration::from_millis(1500))
    }
}

#[async_trait]
impl PaymentGateway for SimulatedGateway {
    async fn transfer(
        &self,
        _request: TransferRequest,
    ) -> std::result::Result<TransferReceipt, GatewayError> {
        tokio::time::sleep(self.delay).await;

        let roll: f64 = rand::thread_rng().gen();
        if roll < self.success_rate {
            Ok(TransferReceipt {
                reference: format!("txn_{}", Uuid::new_v4()),
                settled_at: Utc::now(),
            })
        } else {
            Err(GatewayError::Declined(
                "Payment processing failed due to insufficient funds".to_string(),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> TransferRequest {
        TransferRequest {
            amount: 1000,
            user_id: Uuid::new_v4(),
            bank_account: None,
        }
    }

    #[tokio::test]
    async fn test_always_succeeds_at_full_rate() {
        let gateway = SimulatedGateway::new(1.0, Duration::ZERO);
        for _ in 0..20 {
            let receipt = gateway.transfer(request()).await.unwrap();
            assert!(receipt.reference.starts_with("txn_"));
        }
    }

    #[tokio::test]
    async fn test_always_fails_at_zero_rate() {
        let gateway = SimulatedGateway::new(0.0, Duration::ZERO);
        for _ in 0..20 {
            let err = gateway.transfer(request()).await.unwrap_err();
            assert!(matches!(err, GatewayError::Declined(_)));
        }
    }

    #[tokio::test]
    async fn test_from_config_uses_settings() {
        let config = PaymentConfig {
            success_rate: 1.0,
            delay_ms: 0,
        };
        let gateway = SimulatedGateway::from_config(&config);
        assert!(gateway.transfer(request()).await.is_ok());
    }
}
