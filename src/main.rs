//! equb-core bootstrap binary
//!
//! Loads settings, initializes tracing, connects Postgres, applies
//! migrations and provisions the super admin, then stays up until
//! interrupted. The HTTP transport mounts the service factory in-process;
//! it is not part of this crate.

use tracing::info;

use equb_core::{
    config::Settings,
    database::{connection, Stores},
    services::{provisioning, ServiceFactory},
    utils::logging,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    // Load configuration; a malformed file or env var aborts startup
    let settings = Settings::new()?;
    settings.validate()?;

    // Initialize logging; the guard must outlive the process body
    let _log_guard = logging::init_logging(&settings.logging)?;

    info!("Starting equb-core...");

    // Initialize database connection
    info!("Connecting to database...");
    let pool_config = connection::PoolConfig::from_settings(&settings.database);
    let pool = connection::create_pool(&pool_config).await?;

    // Run database migrations
    connection::run_migrations(&pool).await?;

    // Wire stores and services
    let stores = Stores::postgres(pool.clone());
    let services = ServiceFactory::with_simulated_gateway(stores.clone(), &settings);

    // Idempotent startup provisioning
    provisioning::ensure_super_admin(stores.users.as_ref(), &settings.super_admin).await?;

    connection::health_check(&pool).await?;
    info!("equb-core is ready");

    // The factory is handed to the transport layer here; until one is
    // mounted the binary just holds the pool open.
    let _ = &services;

    tokio::signal::ctrl_c().await?;
    info!("equb-core has been shut down.");

    Ok(())
}
