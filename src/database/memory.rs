//! In-memory store implementations
//!
//! Thread-safe stores over `Arc<RwLock<HashMap>>`, used by the test suite
//! and suitable anywhere persistence is not required.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::database::ports::{
    CycleStore, GroupStore, MembershipStore, TransactionStore, UserStore,
};
use crate::models::{Cycle, Group, Membership, Transaction, User, UserRole};
use crate::utils::errors::Result;

#[derive(Default, Clone)]
pub struct InMemoryGroupStore {
    groups: Arc<RwLock<HashMap<Uuid, Group>>>,
}

impl InMemoryGroupStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl GroupStore for InMemoryGroupStore {
    async fn insert(&self, group: Group) -> Result<Group> {
        let mut groups = self.groups.write().await;
        groups.insert(group.id, group.clone());
        Ok(group)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Group>> {
        let groups = self.groups.read().await;
        Ok(groups.get(&id).cloned())
    }

    async fn update(&self, group: Group) -> Result<Group> {
        let mut groups = self.groups.write().await;
        groups.insert(group.id, group.clone());
        Ok(group)
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        let mut groups = self.groups.write().await;
        Ok(groups.remove(&id).is_some())
    }

    async fn list(&self) -> Result<Vec<Group>> {
        let groups = self.groups.read().await;
        let mut all: Vec<Group> = groups.values().cloned().collect();
        all.sort_by_key(|g| g.created_at);
        Ok(all)
    }

    async fn find_for_user(&self, user_id: Uuid) -> Result<Vec<Group>> {
        let groups = self.groups.read().await;
        let mut matched: Vec<Group> = groups
            .values()
            .filter(|g| g.has_member(user_id) || g.admin == Some(user_id))
            .cloned()
            .collect();
        matched.sort_by_key(|g| g.created_at);
        Ok(matched)
    }
}

#[derive(Default, Clone)]
pub struct InMemoryUserStore {
    users: Arc<RwLock<HashMap<Uuid, User>>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn insert(&self, user: User) -> Result<User> {
        let mut users = self.users.write().await;
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>> {
        let users = self.users.read().await;
        Ok(users.get(&id).cloned())
    }

    async fn update(&self, user: User) -> Result<User> {
        let mut users = self.users.write().await;
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn list(&self) -> Result<Vec<User>> {
        let users = self.users.read().await;
        let mut all: Vec<User> = users.values().cloned().collect();
        all.sort_by_key(|u| u.created_at);
        Ok(all)
    }

    async fn find_by_role(&self, role: UserRole) -> Result<Vec<User>> {
        let users = self.users.read().await;
        Ok(users
            .values()
            .filter(|u| u.has_role(role))
            .cloned()
            .collect())
    }
}

#[derive(Default, Clone)]
pub struct InMemoryMembershipStore {
    memberships: Arc<RwLock<HashMap<Uuid, Membership>>>,
}

impl InMemoryMembershipStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MembershipStore for InMemoryMembershipStore {
    async fn insert(&self, membership: Membership) -> Result<Membership> {
        let mut memberships = self.memberships.write().await;
        memberships.insert(membership.id, membership.clone());
        Ok(membership)
    }

    async fn find(&self, user_id: Uuid, group_id: Uuid) -> Result<Option<Membership>> {
        let memberships = self.memberships.read().await;
        Ok(memberships
            .values()
            .find(|m| m.user_id == user_id && m.group_id == group_id)
            .cloned())
    }

    async fn exists(&self, user_id: Uuid, group_id: Uuid) -> Result<bool> {
        Ok(self.find(user_id, group_id).await?.is_some())
    }

    async fn delete(&self, user_id: Uuid, group_id: Uuid) -> Result<bool> {
        let mut memberships = self.memberships.write().await;
        let id = memberships
            .values()
            .find(|m| m.user_id == user_id && m.group_id == group_id)
            .map(|m| m.id);
        Ok(match id {
            Some(id) => memberships.remove(&id).is_some(),
            None => false,
        })
    }

    async fn delete_for_group(&self, group_id: Uuid) -> Result<u64> {
        let mut memberships = self.memberships.write().await;
        let before = memberships.len();
        memberships.retain(|_, m| m.group_id != group_id);
        Ok((before - memberships.len()) as u64)
    }

    async fn list_for_group(&self, group_id: Uuid) -> Result<Vec<Membership>> {
        let memberships = self.memberships.read().await;
        let mut rows: Vec<Membership> = memberships
            .values()
            .filter(|m| m.group_id == group_id)
            .cloned()
            .collect();
        rows.sort_by_key(|m| m.joined_at);
        Ok(rows)
    }
}

#[derive(Default, Clone)]
pub struct InMemoryTransactionStore {
    transactions: Arc<RwLock<HashMap<Uuid, Transaction>>>,
}

impl InMemoryTransactionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TransactionStore for InMemoryTransactionStore {
    async fn insert(&self, transaction: Transaction) -> Result<Transaction> {
        let mut transactions = self.transactions.write().await;
        transactions.insert(transaction.id, transaction.clone());
        Ok(transaction)
    }

    async fn update(&self, transaction: Transaction) -> Result<Transaction> {
        let mut transactions = self.transactions.write().await;
        transactions.insert(transaction.id, transaction.clone());
        Ok(transaction)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Transaction>> {
        let transactions = self.transactions.read().await;
        Ok(transactions.get(&id).cloned())
    }

    async fn list_for_group(&self, group_id: Uuid) -> Result<Vec<Transaction>> {
        let transactions = self.transactions.read().await;
        let mut rows: Vec<Transaction> = transactions
            .values()
            .filter(|t| t.group_id == group_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }
}

#[derive(Default, Clone)]
pub struct InMemoryCycleStore {
    cycles: Arc<RwLock<HashMap<Uuid, Cycle>>>,
}

impl InMemoryCycleStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CycleStore for InMemoryCycleStore {
    async fn insert(&self, cycle: Cycle) -> Result<Cycle> {
        let mut cycles = self.cycles.write().await;
        cycles.insert(cycle.id, cycle.clone());
        Ok(cycle)
    }

    async fn list_for_group(&self, group_id: Uuid) -> Result<Vec<Cycle>> {
        let cycles = self.cycles.read().await;
        let mut rows: Vec<Cycle> = cycles
            .values()
            .filter(|c| c.group_id == group_id)
            .cloned()
            .collect();
        rows.sort_by_key(|c| c.cycle_number);
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CreateGroupRequest, TransactionType};

    fn sample_group(creator: Uuid) -> Group {
        Group::from_request(CreateGroupRequest {
            name: "test".to_string(),
            description: None,
            amount: 1000,
            cycle_duration_days: 30,
            creator,
        })
    }

    #[tokio::test]
    async fn test_group_store_round_trip() {
        let store = InMemoryGroupStore::new();
        let group = sample_group(Uuid::new_v4());

        store.insert(group.clone()).await.unwrap();
        let loaded = store.find_by_id(group.id).await.unwrap().unwrap();
        assert_eq!(loaded, group);

        assert!(store.delete(group.id).await.unwrap());
        assert!(!store.delete(group.id).await.unwrap());
        assert!(store.find_by_id(group.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_find_for_user_matches_admin_too() {
        let store = InMemoryGroupStore::new();
        let creator = Uuid::new_v4();
        let admin = Uuid::new_v4();
        let mut group = sample_group(creator);
        group.admin = Some(admin);
        store.insert(group).await.unwrap();

        assert_eq!(store.find_for_user(creator).await.unwrap().len(), 1);
        assert_eq!(store.find_for_user(admin).await.unwrap().len(), 1);
        assert!(store.find_for_user(Uuid::new_v4()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_membership_store_delete_for_group() {
        let store = InMemoryMembershipStore::new();
        let group_id = Uuid::new_v4();
        let other_group = Uuid::new_v4();

        store
            .insert(Membership::new(Uuid::new_v4(), group_id))
            .await
            .unwrap();
        store
            .insert(Membership::new(Uuid::new_v4(), group_id))
            .await
            .unwrap();
        store
            .insert(Membership::new(Uuid::new_v4(), other_group))
            .await
            .unwrap();

        assert_eq!(store.delete_for_group(group_id).await.unwrap(), 2);
        assert!(store.list_for_group(group_id).await.unwrap().is_empty());
        assert_eq!(store.list_for_group(other_group).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_transaction_store_newest_first() {
        let store = InMemoryTransactionStore::new();
        let group_id = Uuid::new_v4();
        let user_id = Uuid::new_v4();

        let mut first =
            Transaction::pending(user_id, group_id, 100, TransactionType::Contribution, None);
        first.created_at = first.created_at - chrono::Duration::seconds(10);
        let second =
            Transaction::pending(user_id, group_id, 200, TransactionType::Contribution, None);

        store.insert(first.clone()).await.unwrap();
        store.insert(second.clone()).await.unwrap();

        let rows = store.list_for_group(group_id).await.unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].id, second.id);
        assert_eq!(rows[1].id, first.id);
    }
}
