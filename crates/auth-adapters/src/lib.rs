//! # auth-adapters
//!
//! Argon2-based implementation of `AuthGateway`: an in-process credential
//! registry plus the auth-state channel the session follows. Profile
//! records and roles are not its business; it only knows accounts and who
//! is currently signed in.

use async_trait::async_trait;
use dashmap::DashMap;
use tokio::sync::watch;
use uuid::Uuid;

use argon2::password_hash::{
    rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString,
};
use argon2::Argon2;

use domains::{AppError, AuthGateway, Principal, Result};

/// Identity-provider minimum, matching the usual hosted-auth rule.
const MIN_PASSWORD_LEN: usize = 6;

struct Account {
    principal: Principal,
    password_hash: String,
}

pub struct CredentialAuthGateway {
    /// Keyed by lowercased email
    accounts: DashMap<String, Account>,
    state: watch::Sender<Option<Principal>>,
}

impl CredentialAuthGateway {
    pub fn new() -> Self {
        let (state, _) = watch::channel(None);
        Self {
            accounts: DashMap::new(),
            state,
        }
    }
}

impl Default for CredentialAuthGateway {
    fn default() -> Self {
        Self::new()
    }
}

/// Generated avatar for accounts registered without a photo.
fn avatar_url(display_name: &str) -> String {
    let mut encoded = String::with_capacity(display_name.len());
    for byte in display_name.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                encoded.push(byte as char)
            }
            _ => encoded.push_str(&format!("%{byte:02X}")),
        }
    }
    format!("https://ui-avatars.com/api/?name={encoded}&background=random")
}

#[async_trait]
impl AuthGateway for CredentialAuthGateway {
    async fn sign_up(&self, email: &str, password: &str, display_name: &str)
        -> Result<Principal> {
        let email = email.trim().to_lowercase();
        if email.is_empty() || !email.contains('@') {
            return Err(AppError::Authentication("invalid email address".to_string()));
        }
        if password.len() < MIN_PASSWORD_LEN {
            return Err(AppError::Authentication(format!(
                "password should be at least {MIN_PASSWORD_LEN} characters"
            )));
        }
        if self.accounts.contains_key(&email) {
            return Err(AppError::Authentication(
                "email address is already in use".to_string(),
            ));
        }

        let salt = SaltString::generate(&mut OsRng);
        let password_hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|err| AppError::Authentication(err.to_string()))?
            .to_string();

        let principal = Principal {
            uid: Uuid::now_v7(),
            email: Some(email.clone()),
            display_name: Some(display_name.to_string()),
            photo_url: Some(avatar_url(display_name)),
        };
        self.accounts.insert(
            email,
            Account {
                principal: principal.clone(),
                password_hash,
            },
        );

        // Registration signs the new account in.
        self.state.send_replace(Some(principal.clone()));
        tracing::info!(uid = %principal.uid, "account registered");
        Ok(principal)
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<Principal> {
        let email = email.trim().to_lowercase();
        let principal = match self.accounts.get(&email) {
            Some(account) => {
                let parsed = PasswordHash::new(&account.password_hash)
                    .map_err(|err| AppError::Authentication(err.to_string()))?;
                if Argon2::default()
                    .verify_password(password.as_bytes(), &parsed)
                    .is_err()
                {
                    return Err(AppError::Authentication(
                        "invalid email or password".to_string(),
                    ));
                }
                account.principal.clone()
            }
            None => {
                return Err(AppError::Authentication(
                    "invalid email or password".to_string(),
                ))
            }
        };

        self.state.send_replace(Some(principal.clone()));
        tracing::info!(uid = %principal.uid, "signed in");
        Ok(principal)
    }

    async fn sign_in_federated(&self, principal: Principal) -> Result<()> {
        tracing::info!(uid = %principal.uid, "federated sign-in");
        self.state.send_replace(Some(principal));
        Ok(())
    }

    async fn sign_out(&self) -> Result<()> {
        self.state.send_replace(None);
        Ok(())
    }

    fn subscribe(&self) -> watch::Receiver<Option<Principal>> {
        self.state.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn sign_up_then_sign_in() {
        let gateway = CredentialAuthGateway::new();
        let registered = gateway
            .sign_up("Kid@Example.com", "secret1", "한별")
            .await
            .unwrap();

        gateway.sign_out().await.unwrap();
        let signed_in = gateway.sign_in("kid@example.com", "secret1").await.unwrap();
        assert_eq!(signed_in.uid, registered.uid);
        assert_eq!(signed_in.email.as_deref(), Some("kid@example.com"));
    }

    #[tokio::test]
    async fn wrong_password_is_rejected() {
        let gateway = CredentialAuthGateway::new();
        gateway
            .sign_up("kid@example.com", "secret1", "한별")
            .await
            .unwrap();

        let result = gateway.sign_in("kid@example.com", "nope123").await;
        assert!(matches!(result, Err(AppError::Authentication(_))));
    }

    #[tokio::test]
    async fn duplicate_email_and_weak_password_are_rejected() {
        let gateway = CredentialAuthGateway::new();
        gateway
            .sign_up("kid@example.com", "secret1", "한별")
            .await
            .unwrap();

        let duplicate = gateway.sign_up("kid@example.com", "secret2", "두리").await;
        assert!(matches!(duplicate, Err(AppError::Authentication(_))));

        let weak = gateway.sign_up("other@example.com", "abc", "두리").await;
        assert!(matches!(weak, Err(AppError::Authentication(_))));
    }

    #[tokio::test]
    async fn subscription_follows_auth_state() {
        let gateway = CredentialAuthGateway::new();
        let rx = gateway.subscribe();
        assert!(rx.borrow().is_none());

        let principal = gateway
            .sign_up("kid@example.com", "secret1", "한별")
            .await
            .unwrap();
        assert_eq!(rx.borrow().as_ref().map(|p| p.uid), Some(principal.uid));

        gateway.sign_out().await.unwrap();
        assert!(rx.borrow().is_none());
    }
}
