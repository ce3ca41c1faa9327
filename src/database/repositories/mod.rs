//! Postgres repository implementations of the storage ports

pub mod cycle;
pub mod group;
pub mod membership;
pub mod transaction;
pub mod user;

pub use cycle::CycleRepository;
pub use group::GroupRepository;
pub use membership::MembershipRepository;
pub use transaction::TransactionRepository;
pub use user::UserRepository;
