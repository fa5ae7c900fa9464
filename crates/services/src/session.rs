//! # Session
//!
//! The identity resolver: maps raw authentication principals to
//! `UserProfile`s with a role, and owns the only process-wide mutable state
//! in the system: the current user. Built as an injectable object with an
//! explicit subscribe/teardown lifecycle so tests can substitute fakes.

use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::JoinHandle;

use domains::{AuthGateway, Principal, Result, Role, UserProfile, UserStore};

/// Display-name fallback when the identity provider carries none.
const DEFAULT_DISPLAY_NAME: &str = "Friend";

/// Resolves a principal to a profile.
///
/// First sign-in creates the backing record with `Role::Reader`; later
/// sign-ins load the persisted role. A failing profile store is logged and
/// degraded to `Reader`; authentication success is never blocked by a
/// secondary store failure. The configured admin email forces `Role::Admin`
/// in the returned profile regardless of what the record says; the record
/// itself is left untouched.
pub async fn resolve_profile(
    users: &dyn UserStore,
    admin_email: &str,
    principal: Principal,
) -> UserProfile {
    let display_name = principal
        .display_name
        .clone()
        .unwrap_or_else(|| DEFAULT_DISPLAY_NAME.to_string());

    let mut role = Role::Reader;
    let mut created_at = chrono::Utc::now();

    match users.get(principal.uid).await {
        Ok(Some(existing)) => {
            role = existing.role;
            created_at = existing.created_at;
        }
        Ok(None) => {
            let record = UserProfile {
                uid: principal.uid,
                email: principal.email.clone(),
                display_name: display_name.clone(),
                photo_url: principal.photo_url.clone(),
                role: Role::Reader,
                created_at,
            };
            if let Err(err) = users.put(&record).await {
                tracing::error!(uid = %principal.uid, %err, "failed to create user profile record");
            }
        }
        Err(err) => {
            tracing::error!(uid = %principal.uid, %err, "failed to load user profile record");
        }
    }

    if principal.email.as_deref() == Some(admin_email) {
        role = Role::Admin;
    }

    UserProfile {
        uid: principal.uid,
        email: principal.email,
        display_name,
        photo_url: principal.photo_url,
        role,
        created_at,
    }
}

/// The live session: follows the auth gateway's principal stream, re-runs
/// resolution on every change, and publishes `Option<UserProfile>` to its
/// own subscribers.
pub struct Session {
    auth: Arc<dyn AuthGateway>,
    current_rx: watch::Receiver<Option<UserProfile>>,
    worker: JoinHandle<()>,
}

impl Session {
    /// Subscribes to the gateway and starts the resolution worker. The
    /// principal present at start time is resolved immediately.
    pub fn start(
        auth: Arc<dyn AuthGateway>,
        users: Arc<dyn UserStore>,
        admin_email: impl Into<String>,
    ) -> Self {
        let admin_email = admin_email.into();
        let (tx, rx) = watch::channel(None);
        let mut auth_rx = auth.subscribe();

        let worker = tokio::spawn(async move {
            loop {
                let principal = auth_rx.borrow_and_update().clone();
                let profile = match principal {
                    Some(p) => Some(resolve_profile(users.as_ref(), &admin_email, p).await),
                    None => None,
                };
                if tx.send(profile).is_err() {
                    break;
                }
                if auth_rx.changed().await.is_err() {
                    break;
                }
            }
        });

        Self {
            auth,
            current_rx: rx,
            worker,
        }
    }

    /// Snapshot of the current user.
    pub fn current(&self) -> Option<UserProfile> {
        self.current_rx.borrow().clone()
    }

    /// Live subscription to the current user. Dropping the receiver
    /// unsubscribes; receivers are independent of each other.
    pub fn subscribe(&self) -> watch::Receiver<Option<UserProfile>> {
        self.current_rx.clone()
    }

    pub async fn sign_up(&self, email: &str, password: &str, display_name: &str) -> Result<()> {
        self.auth.sign_up(email, password, display_name).await?;
        Ok(())
    }

    pub async fn sign_in(&self, email: &str, password: &str) -> Result<()> {
        self.auth.sign_in(email, password).await?;
        Ok(())
    }

    /// Completes a federated sign-in with a principal obtained outside this
    /// process (popup/redirect flow).
    pub async fn sign_in_federated(&self, principal: Principal) -> Result<()> {
        self.auth.sign_in_federated(principal).await
    }

    pub async fn sign_out(&self) -> Result<()> {
        self.auth.sign_out().await
    }

    /// Stops following auth-state changes. Subscribers keep their last
    /// observed value.
    pub fn shutdown(&self) {
        self.worker.abort();
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.worker.abort();
    }
}
