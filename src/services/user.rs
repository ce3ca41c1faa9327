//! User service
//!
//! The identity provider owns users; this service covers only the role
//! operations the core is responsible for. Role names are validated by the
//! `UserRole` type at the boundary, so unknown names never reach these
//! methods.

use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

use crate::database::UserStore;
use crate::models::{User, UserRole};
use crate::utils::errors::{EqubError, Result};

#[derive(Clone)]
pub struct UserService {
    users: Arc<dyn UserStore>,
}

impl UserService {
    pub fn new(users: Arc<dyn UserStore>) -> Self {
        Self { users }
    }

    pub async fn get_user_by_id(&self, user_id: Uuid) -> Result<Option<User>> {
        debug!(user_id = %user_id, "Fetching user");
        self.users.find_by_id(user_id).await
    }

    pub async fn get_all_users(&self) -> Result<Vec<User>> {
        self.users.list().await
    }

    pub async fn get_users_by_role(&self, role: UserRole) -> Result<Vec<User>> {
        debug!(role = %role, "Fetching users by role");
        self.users.find_by_role(role).await
    }

    /// Replace the user's role set with the single given role.
    pub async fn assign_role(&self, user_id: Uuid, role: UserRole) -> Result<User> {
        let mut user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(EqubError::UserNotFound { user_id })?;

        user.roles = vec![role];
        let user = self.users.update(user).await?;

        info!(user_id = %user_id, role = %role, "Role assigned");
        Ok(user)
    }

    /// Drop the given role from the user's role set. Removing a role the
    /// user does not hold is a no-op.
    pub async fn remove_role(&self, user_id: Uuid, role: UserRole) -> Result<User> {
        let mut user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(EqubError::UserNotFound { user_id })?;

        user.roles.retain(|r| *r != role);
        let user = self.users.update(user).await?;

        info!(user_id = %user_id, role = %role, "Role removed");
        Ok(user)
    }
}
