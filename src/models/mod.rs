//! Data models
//!
//! Entity structs shared across services and storage implementations.

pub mod cycle;
pub mod group;
pub mod membership;
pub mod transaction;
pub mod user;

pub use cycle::{Cycle, CycleStatus};
pub use group::{CreateGroupRequest, Group};
pub use membership::Membership;
pub use transaction::{Transaction, TransactionStatus, TransactionType};
pub use user::{BankAccount, User, UserProfile, UserRole};
