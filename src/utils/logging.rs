//! Logging configuration and setup
//!
//! This module provides logging initialization and structured logging
//! helpers for the equb-core services.

use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

use crate::config::LoggingConfig;
use crate::utils::errors::Result;

/// Initialize logging based on configuration.
///
/// Returns the appender guard; dropping it stops the background writer, so
/// the caller must keep it alive for the process lifetime.
pub fn init_logging(config: &LoggingConfig) -> Result<WorkerGuard> {
    let file_appender = tracing_appender::rolling::daily(&config.file_path, "equb-core.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.level))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stdout))
        .with(tracing_subscriber::fmt::layer().with_writer(non_blocking))
        .init();

    info!("Logging initialized with level: {}", config.level);
    Ok(guard)
}

/// Log group lifecycle events with structured data
pub fn log_group_event(group_id: Uuid, event: &str, user_id: Option<Uuid>) {
    match user_id {
        Some(user_id) => info!(group_id = %group_id, user_id = %user_id, "{}", event),
        None => info!(group_id = %group_id, "{}", event),
    }
}

/// Log a finalized transaction
pub fn log_transaction(transaction_id: Uuid, group_id: Uuid, status: &str, amount: i64) {
    if status == "failed" {
        warn!(
            transaction_id = %transaction_id,
            group_id = %group_id,
            amount = amount,
            "Transaction failed"
        );
    } else {
        info!(
            transaction_id = %transaction_id,
            group_id = %group_id,
            status = status,
            amount = amount,
            "Transaction finalized"
        );
    }
}
