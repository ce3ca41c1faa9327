//! Group lifecycle service
//!
//! Owns group creation, membership mutation, admin assignment and deletion.
//! Every mutation dual-writes the group's own member list and the
//! membership index, and runs under the group's exclusive lock so
//! concurrent read-modify-writes cannot drop an update.

use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

use crate::database::{GroupStore, MembershipStore};
use crate::models::{CreateGroupRequest, Group, Membership};
use crate::services::locks::GroupLocks;
use crate::utils::errors::{EqubError, Result};
use crate::utils::logging;

#[derive(Clone)]
pub struct GroupService {
    groups: Arc<dyn GroupStore>,
    memberships: Arc<dyn MembershipStore>,
    locks: GroupLocks,
}

impl GroupService {
    pub fn new(
        groups: Arc<dyn GroupStore>,
        memberships: Arc<dyn MembershipStore>,
        locks: GroupLocks,
    ) -> Self {
        Self {
            groups,
            memberships,
            locks,
        }
    }

    /// Create a group. The creator auto-joins as the first member and gets
    /// a membership row.
    pub async fn create_group(&self, request: CreateGroupRequest) -> Result<Group> {
        // The validation layer checks these too; they are re-checked here
        // because the group invariants depend on them.
        if request.amount <= 0 {
            return Err(EqubError::BadRequest(
                "Amount must be greater than 0".to_string(),
            ));
        }
        if request.cycle_duration_days < 1 {
            return Err(EqubError::BadRequest(
                "Cycle duration must be at least 1 day".to_string(),
            ));
        }

        let group = self.groups.insert(Group::from_request(request)).await?;
        self.memberships
            .insert(Membership::new(group.creator, group.id))
            .await?;

        logging::log_group_event(group.id, "Group created", Some(group.creator));
        Ok(group)
    }

    /// Add a user to a group's member list and the membership index.
    pub async fn join_group(&self, group_id: Uuid, user_id: Uuid) -> Result<Group> {
        let _guard = self.locks.acquire(group_id).await;

        let mut group = self
            .groups
            .find_by_id(group_id)
            .await?
            .ok_or(EqubError::GroupNotFound { group_id })?;

        if group.has_member(user_id) {
            return Err(EqubError::AlreadyInGroup { group_id, user_id });
        }

        group.members.push(user_id);
        let group = self.groups.update(group).await?;
        self.memberships
            .insert(Membership::new(user_id, group_id))
            .await?;

        logging::log_group_event(group_id, "User joined group", Some(user_id));
        Ok(group)
    }

    /// Set the group admin. Membership of the assignee is not checked here;
    /// role legitimacy belongs to the authorization layer.
    pub async fn assign_admin(&self, group_id: Uuid, admin_id: Uuid) -> Result<Group> {
        let _guard = self.locks.acquire(group_id).await;

        let mut group = self
            .groups
            .find_by_id(group_id)
            .await?
            .ok_or(EqubError::GroupNotFound { group_id })?;

        group.admin = Some(admin_id);
        let group = self.groups.update(group).await?;

        logging::log_group_event(group_id, "Group admin assigned", Some(admin_id));
        Ok(group)
    }

    /// Clear the group admin, provided the caller names the current one.
    pub async fn remove_admin(&self, group_id: Uuid, admin_id: Uuid) -> Result<Group> {
        let _guard = self.locks.acquire(group_id).await;

        let mut group = self
            .groups
            .find_by_id(group_id)
            .await?
            .ok_or(EqubError::GroupNotFound { group_id })?;

        if group.admin != Some(admin_id) {
            return Err(EqubError::BadRequest(
                "Specified user is not the current admin of this group".to_string(),
            ));
        }

        group.admin = None;
        let group = self.groups.update(group).await?;

        logging::log_group_event(group_id, "Group admin removed", Some(admin_id));
        Ok(group)
    }

    /// Remove a user from the group. Filtering an absent user from the
    /// member list is not an error; the membership delete and group save
    /// still happen.
    pub async fn remove_user_from_group(&self, group_id: Uuid, user_id: Uuid) -> Result<Group> {
        let _guard = self.locks.acquire(group_id).await;

        let mut group = self
            .groups
            .find_by_id(group_id)
            .await?
            .ok_or(EqubError::GroupNotFound { group_id })?;

        group.members.retain(|m| *m != user_id);
        self.memberships.delete(user_id, group_id).await?;
        let group = self.groups.update(group).await?;

        logging::log_group_event(group_id, "User removed from group", Some(user_id));
        Ok(group)
    }

    /// Delete the group, then cascade-delete its membership rows.
    pub async fn delete_group(&self, group_id: Uuid) -> Result<()> {
        let _guard = self.locks.acquire(group_id).await;

        if !self.groups.delete(group_id).await? {
            return Err(EqubError::GroupNotFound { group_id });
        }
        let removed = self.memberships.delete_for_group(group_id).await?;
        self.locks.forget(group_id);

        info!(group_id = %group_id, memberships_removed = removed, "Group deleted");
        Ok(())
    }

    /// Whether the user appears in the group's member list. Absent groups
    /// answer false rather than erroring.
    pub async fn is_group_member(&self, group_id: Uuid, user_id: Uuid) -> Result<bool> {
        Ok(match self.groups.find_by_id(group_id).await? {
            Some(group) => group.has_member(user_id),
            None => false,
        })
    }

    /// Whether the user is the group's current winner. Absent groups and
    /// unset winners answer false.
    pub async fn is_current_winner(&self, group_id: Uuid, user_id: Uuid) -> Result<bool> {
        Ok(match self.groups.find_by_id(group_id).await? {
            Some(group) => group.current_winner == Some(user_id),
            None => false,
        })
    }

    pub async fn get_group_by_id(&self, group_id: Uuid) -> Result<Option<Group>> {
        debug!(group_id = %group_id, "Fetching group");
        self.groups.find_by_id(group_id).await
    }

    pub async fn get_all_groups(&self) -> Result<Vec<Group>> {
        self.groups.list().await
    }

    /// Groups where the user is a member or the assigned admin.
    pub async fn get_user_groups(&self, user_id: Uuid) -> Result<Vec<Group>> {
        debug!(user_id = %user_id, "Fetching groups for user");
        self.groups.find_for_user(user_id).await
    }

    /// Membership rows for a group, for existence checks and totals.
    pub async fn get_group_memberships(&self, group_id: Uuid) -> Result<Vec<Membership>> {
        self.memberships.list_for_group(group_id).await
    }
}
