//! # Category Registry
//!
//! CRUD over the small set of named categories and the source of truth for
//! category display names. Deletion never cascades: articles keep their
//! dangling `category_id` and fall back to a stored label.

use std::sync::Arc;

use tokio::sync::watch;
use uuid::Uuid;

use crate::policy;
use domains::{AppError, Category, CategoryStore, Result, UserProfile, FALLBACK_CATEGORY_LABEL};

pub struct CategoryService {
    store: Arc<dyn CategoryStore>,
    feed: watch::Sender<Vec<Category>>,
}

impl CategoryService {
    pub fn new(store: Arc<dyn CategoryStore>) -> Self {
        let (feed, _) = watch::channel(Vec::new());
        Self { store, feed }
    }

    /// All categories, ascending by creation time. The store carries no
    /// ordering guarantee, so the sort happens here. An empty registry is a
    /// value, not an error; article publishing treats it as a hard
    /// precondition failure.
    pub async fn list(&self) -> Result<Vec<Category>> {
        let mut categories = self.store.list().await?;
        categories.sort_by_key(|c| c.created_at);
        Ok(categories)
    }

    pub async fn create(&self, actor: Option<&UserProfile>, name: &str) -> Result<Category> {
        if !policy::can_manage_categories(actor) {
            return Err(AppError::PermissionDenied(
                "only the admin can manage categories".to_string(),
            ));
        }
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::Precondition(
                "category name must not be empty".to_string(),
            ));
        }

        let category = Category {
            id: Uuid::now_v7(),
            name: name.to_string(),
            created_at: chrono::Utc::now(),
        };
        self.store.insert(&category).await?;
        tracing::info!(category_id = %category.id, name = %category.name, "category created");
        self.publish().await;
        Ok(category)
    }

    /// Unconditional delete. Referencing articles are not checked or
    /// updated; their display falls back via `Article::category_label`.
    pub async fn delete(&self, actor: Option<&UserProfile>, id: Uuid) -> Result<()> {
        if !policy::can_manage_categories(actor) {
            return Err(AppError::PermissionDenied(
                "only the admin can manage categories".to_string(),
            ));
        }
        self.store.delete(id).await?;
        tracing::info!(category_id = %id, "category deleted");
        self.publish().await;
        Ok(())
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Option<Category>> {
        self.store.get(id).await
    }

    /// Display name for a category-scoped listing; `None` from the store
    /// means the category was deleted after articles referenced it.
    pub async fn display_name(&self, id: Uuid) -> String {
        match self.store.get(id).await {
            Ok(Some(category)) => category.name,
            Ok(None) => FALLBACK_CATEGORY_LABEL.to_string(),
            Err(err) => {
                tracing::warn!(category_id = %id, %err, "category lookup failed");
                FALLBACK_CATEGORY_LABEL.to_string()
            }
        }
    }

    /// Live subscription to the category list, re-published after every
    /// mutation through this service. Call `refresh` once to prime it.
    /// Receivers are independent; dropping one unsubscribes it.
    pub fn subscribe(&self) -> watch::Receiver<Vec<Category>> {
        self.feed.subscribe()
    }

    /// Re-reads the registry and publishes to subscribers.
    pub async fn refresh(&self) -> Result<()> {
        let categories = self.list().await?;
        self.feed.send_replace(categories);
        Ok(())
    }

    async fn publish(&self) {
        match self.list().await {
            Ok(categories) => {
                self.feed.send_replace(categories);
            }
            Err(err) => tracing::warn!(%err, "category feed refresh failed"),
        }
    }
}
