//! # Core Traits (Ports)
//!
//! The external document store, identity provider, and assist gateway are
//! consumed exclusively through these contracts. Adapters implement them;
//! services depend on them behind `Arc<dyn ...>`.

use async_trait::async_trait;
use tokio::sync::watch;
use uuid::Uuid;

use crate::error::Result;
use crate::models::{Article, ArticleFilter, Category, Comment, Principal, Role, UserProfile};

/// Persistence contract for the `users` collection.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn get(&self, uid: Uuid) -> Result<Option<UserProfile>>;
    /// Insert-or-replace keyed by `uid`.
    async fn put(&self, profile: &UserProfile) -> Result<()>;
    async fn list(&self) -> Result<Vec<UserProfile>>;
    async fn set_role(&self, uid: Uuid, role: Role) -> Result<()>;
}

/// Persistence contract for the `categories` collection.
/// `list` carries no ordering guarantee; callers sort.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait CategoryStore: Send + Sync {
    async fn insert(&self, category: &Category) -> Result<()>;
    async fn get(&self, id: Uuid) -> Result<Option<Category>>;
    async fn list(&self) -> Result<Vec<Category>>;
    async fn delete(&self, id: Uuid) -> Result<()>;
}

/// Persistence contract for the `articles` collection.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait ArticleStore: Send + Sync {
    async fn insert(&self, article: &Article) -> Result<()>;
    /// Full replace keyed by `article.id`.
    async fn update(&self, article: &Article) -> Result<()>;
    async fn get(&self, id: Uuid) -> Result<Option<Article>>;
    async fn delete(&self, id: Uuid) -> Result<()>;
    /// Equality filter only; no ordering guarantee.
    async fn list(&self, filter: ArticleFilter) -> Result<Vec<Article>>;
    async fn increment_views(&self, id: Uuid) -> Result<()>;
}

/// Persistence contract for the `comments` collection.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait CommentStore: Send + Sync {
    async fn insert(&self, comment: &Comment) -> Result<()>;
    /// Equality filter by article; no ordering guarantee.
    async fn list_by_article(&self, article_id: Uuid) -> Result<Vec<Comment>>;
}

/// Identity provider contract.
///
/// The gateway owns credentials and the current principal; profile records
/// and roles are the session's business, not the gateway's.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait AuthGateway: Send + Sync {
    /// Registers a new account and signs it in.
    async fn sign_up(&self, email: &str, password: &str, display_name: &str)
        -> Result<Principal>;
    async fn sign_in(&self, email: &str, password: &str) -> Result<Principal>;
    /// Accepts a principal obtained from a federated provider flow that
    /// completed outside this process, and signs it in.
    async fn sign_in_federated(&self, principal: Principal) -> Result<()>;
    async fn sign_out(&self) -> Result<()>;
    /// Auth-state subscription: receives the current principal (or absence
    /// thereof) on every change. Dropping the receiver unsubscribes.
    fn subscribe(&self) -> watch::Receiver<Option<Principal>>;
}

/// Text-completion contract for the AI assist gateway.
/// Callers must treat failures as non-fatal.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait TextAssist: Send + Sync {
    /// One completion call: a natural-language instruction prefix plus the
    /// article body as payload. Returns plain text.
    async fn complete(&self, instruction: &str, payload: &str) -> Result<String>;
}
