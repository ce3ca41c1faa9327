//! Database module
//!
//! Storage ports, their in-memory and Postgres implementations, and
//! connection management.

pub mod connection;
pub mod memory;
pub mod ports;
pub mod repositories;

pub use connection::{create_pool, health_check, run_migrations, DatabasePool, PoolConfig};
pub use ports::{CycleStore, GroupStore, MembershipStore, TransactionStore, UserStore};

use std::sync::Arc;

/// Bundle of store handles handed to the service layer.
///
/// The services never see a concrete backend; tests run on
/// [`Stores::in_memory`] while the bootstrap binary wires
/// [`Stores::postgres`].
#[derive(Clone)]
pub struct Stores {
    pub groups: Arc<dyn GroupStore>,
    pub users: Arc<dyn UserStore>,
    pub memberships: Arc<dyn MembershipStore>,
    pub transactions: Arc<dyn TransactionStore>,
    pub cycles: Arc<dyn CycleStore>,
}

impl Stores {
    /// Stores backed by the Postgres repositories.
    pub fn postgres(pool: DatabasePool) -> Self {
        Self {
            groups: Arc::new(repositories::GroupRepository::new(pool.clone())),
            users: Arc::new(repositories::UserRepository::new(pool.clone())),
            memberships: Arc::new(repositories::MembershipRepository::new(pool.clone())),
            transactions: Arc::new(repositories::TransactionRepository::new(pool.clone())),
            cycles: Arc::new(repositories::CycleRepository::new(pool)),
        }
    }

    /// Stores backed by in-process hash maps.
    pub fn in_memory() -> Self {
        Self {
            groups: Arc::new(memory::InMemoryGroupStore::new()),
            users: Arc::new(memory::InMemoryUserStore::new()),
            memberships: Arc::new(memory::InMemoryMembershipStore::new()),
            transactions: Arc::new(memory::InMemoryTransactionStore::new()),
            cycles: Arc::new(memory::InMemoryCycleStore::new()),
        }
    }
}
