//! Startup provisioning
//!
//! The super admin is modeled as an explicit, idempotent provisioning step
//! invoked once at process start, rather than ambient global state.

use tracing::info;

use crate::config::SuperAdminConfig;
use crate::database::UserStore;
use crate::models::{User, UserRole};
use crate::utils::errors::Result;

/// Ensure exactly one bootstrap super admin exists. Safe to call on every
/// start: when any user already holds the role, nothing happens.
pub async fn ensure_super_admin(users: &dyn UserStore, config: &SuperAdminConfig) -> Result<()> {
    let existing = users.find_by_role(UserRole::SuperAdmin).await?;
    if !existing.is_empty() {
        return Ok(());
    }

    let mut admin = User::new(config.username.clone(), config.email.clone());
    admin.roles = vec![UserRole::SuperAdmin];
    let admin = users.insert(admin).await?;

    info!(
        user_id = %admin.id,
        username = %admin.username,
        "Super admin created"
    );
    Ok(())
}
