//! Storage ports
//!
//! The persistent store is an external collaborator, so the services talk
//! to these traits rather than a concrete backend. Two implementations
//! exist: the in-memory stores in [`super::memory`] and the Postgres
//! repositories in [`super::repositories`].

use async_trait::async_trait;
use uuid::Uuid;

use crate::models::{Cycle, Group, Membership, Transaction, User, UserRole};
use crate::utils::errors::Result;

#[async_trait]
pub trait GroupStore: Send + Sync {
    async fn insert(&self, group: Group) -> Result<Group>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Group>>;
    /// Full-document write of a previously loaded group.
    async fn update(&self, group: Group) -> Result<Group>;
    /// Returns false when no such group existed.
    async fn delete(&self, id: Uuid) -> Result<bool>;
    async fn list(&self) -> Result<Vec<Group>>;
    /// Groups where the user is a member or the assigned admin.
    async fn find_for_user(&self, user_id: Uuid) -> Result<Vec<Group>>;
}

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn insert(&self, user: User) -> Result<User>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>>;
    async fn update(&self, user: User) -> Result<User>;
    async fn list(&self) -> Result<Vec<User>>;
    async fn find_by_role(&self, role: UserRole) -> Result<Vec<User>>;
}

#[async_trait]
pub trait MembershipStore: Send + Sync {
    async fn insert(&self, membership: Membership) -> Result<Membership>;
    async fn find(&self, user_id: Uuid, group_id: Uuid) -> Result<Option<Membership>>;
    async fn exists(&self, user_id: Uuid, group_id: Uuid) -> Result<bool>;
    /// Returns false when no matching row existed.
    async fn delete(&self, user_id: Uuid, group_id: Uuid) -> Result<bool>;
    /// Cascade helper for group deletion; returns the number of rows removed.
    async fn delete_for_group(&self, group_id: Uuid) -> Result<u64>;
    async fn list_for_group(&self, group_id: Uuid) -> Result<Vec<Membership>>;
}

#[async_trait]
pub trait TransactionStore: Send + Sync {
    async fn insert(&self, transaction: Transaction) -> Result<Transaction>;
    async fn update(&self, transaction: Transaction) -> Result<Transaction>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Transaction>>;
    /// All transactions for a group, newest first.
    async fn list_for_group(&self, group_id: Uuid) -> Result<Vec<Transaction>>;
}

#[async_trait]
pub trait CycleStore: Send + Sync {
    async fn insert(&self, cycle: Cycle) -> Result<Cycle>;
    /// Rotation history in ascending cycle order.
    async fn list_for_group(&self, group_id: Uuid) -> Result<Vec<Cycle>>;
}
