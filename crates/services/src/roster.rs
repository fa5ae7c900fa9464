//! # Reporter Roster
//!
//! Admin-side user management: listing the user base and toggling members
//! between reader and reporter. The admin account itself is never a valid
//! toggle target.

use std::sync::Arc;

use uuid::Uuid;

use crate::policy;
use domains::{AppError, Result, Role, UserProfile, UserStore};

pub struct RosterService {
    users: Arc<dyn UserStore>,
    admin_email: String,
}

impl RosterService {
    pub fn new(users: Arc<dyn UserStore>, admin_email: impl Into<String>) -> Self {
        Self {
            users,
            admin_email: admin_email.into(),
        }
    }

    /// The full user roster, oldest first.
    pub async fn list(&self, actor: Option<&UserProfile>) -> Result<Vec<UserProfile>> {
        if !policy::can_manage_users(actor) {
            return Err(AppError::PermissionDenied(
                "only the admin can view the user roster".to_string(),
            ));
        }
        let mut users = self.users.list().await?;
        users.sort_by_key(|u| u.created_at);
        Ok(users)
    }

    /// Flips a user between reader and reporter and returns the updated
    /// profile. The admin role is never changed by this action.
    pub async fn toggle_reporter(
        &self,
        actor: Option<&UserProfile>,
        target_uid: Uuid,
    ) -> Result<UserProfile> {
        let target = self
            .users
            .get(target_uid)
            .await?
            .ok_or_else(|| AppError::NotFound("UserProfile".to_string(), target_uid.to_string()))?;
        if !policy::can_toggle_reporter(actor, &target, &self.admin_email) {
            return Err(AppError::PermissionDenied(
                "reporter status is managed by the admin, and the admin account cannot be toggled"
                    .to_string(),
            ));
        }
        let next = match target.role {
            Role::Reader => Role::Reporter,
            Role::Reporter => Role::Reader,
            Role::Admin => {
                return Err(AppError::PermissionDenied(
                    "the admin role cannot be toggled".to_string(),
                ))
            }
        };
        self.users.set_role(target_uid, next).await?;
        tracing::info!(uid = %target_uid, role = ?next, "reporter status toggled");
        Ok(UserProfile {
            role: next,
            ..target
        })
    }
}
