//! # Article Repository
//!
//! CRUD over articles, gated by the authorization policy. Owns the
//! denormalized category fields: `category_id` is resolved against the live
//! registry at every create and update, and the resulting name snapshot is
//! stored alongside. There is no cross-collection transaction, so a rename
//! racing a write can leave a stale snapshot; it is accepted and never
//! retroactively repaired.

use std::sync::Arc;

use uuid::Uuid;

use crate::policy;
use domains::{
    AppError, Article, ArticleDraft, ArticleFilter, ArticleStore, Category, CategoryStore,
    Result, UserProfile,
};

pub struct ArticleService {
    articles: Arc<dyn ArticleStore>,
    categories: Arc<dyn CategoryStore>,
}

impl ArticleService {
    pub fn new(articles: Arc<dyn ArticleStore>, categories: Arc<dyn CategoryStore>) -> Self {
        Self {
            articles,
            categories,
        }
    }

    pub async fn create(
        &self,
        actor: Option<&UserProfile>,
        draft: ArticleDraft,
    ) -> Result<Article> {
        if !policy::can_write_article(actor) {
            return Err(AppError::PermissionDenied(
                "only reporters and the admin can publish articles".to_string(),
            ));
        }
        let author = actor.ok_or_else(|| {
            AppError::PermissionDenied("sign in to publish articles".to_string())
        })?;
        validate_draft(&draft)?;

        // Publishing requires at least one category to exist.
        if self.categories.list().await?.is_empty() {
            return Err(AppError::Precondition(
                "cannot publish without a category".to_string(),
            ));
        }
        let category = self.resolve_category(draft.category_id).await?;

        let article = Article {
            id: Uuid::now_v7(),
            title: draft.title,
            summary: draft.summary,
            content: draft.content,
            category_id: Some(category.id),
            category_name: category.name.clone(),
            category: category.name,
            image_url: draft.image_url,
            youtube_url: draft.youtube_url,
            author_id: author.uid,
            author_name: author.display_name.clone(),
            created_at: chrono::Utc::now(),
            updated_at: None,
            views: 0,
            tags: draft.tags,
        };
        self.articles.insert(&article).await?;
        tracing::info!(article_id = %article.id, author = %article.author_name, "article published");
        Ok(article)
    }

    /// Full replace of the content fields. Authorship and creation time are
    /// immutable; the category snapshot is re-resolved exactly as in
    /// `create`.
    pub async fn update(
        &self,
        actor: Option<&UserProfile>,
        id: Uuid,
        draft: ArticleDraft,
    ) -> Result<Article> {
        let existing = self
            .articles
            .get(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Article".to_string(), id.to_string()))?;
        if !policy::can_edit_article(actor, &existing) {
            return Err(AppError::PermissionDenied(
                "only the original author or the admin can edit this article".to_string(),
            ));
        }
        validate_draft(&draft)?;
        let category = self.resolve_category(draft.category_id).await?;

        let article = Article {
            id: existing.id,
            title: draft.title,
            summary: draft.summary,
            content: draft.content,
            category_id: Some(category.id),
            category_name: category.name.clone(),
            category: category.name,
            image_url: draft.image_url,
            youtube_url: draft.youtube_url,
            author_id: existing.author_id,
            author_name: existing.author_name,
            created_at: existing.created_at,
            updated_at: Some(chrono::Utc::now()),
            views: existing.views,
            tags: draft.tags,
        };
        self.articles.update(&article).await?;
        tracing::info!(article_id = %article.id, "article updated");
        Ok(article)
    }

    pub async fn delete(&self, actor: Option<&UserProfile>, id: Uuid) -> Result<()> {
        if !policy::can_delete_article(actor) {
            return Err(AppError::PermissionDenied(
                "only the admin can delete articles".to_string(),
            ));
        }
        self.articles.delete(id).await?;
        tracing::info!(article_id = %id, "article deleted");
        Ok(())
    }

    pub async fn get(&self, id: Uuid) -> Result<Option<Article>> {
        self.articles.get(id).await
    }

    /// Articles matching `filter`, newest first. The store only matches;
    /// ordering and the limit are applied here after fetch, so no compound
    /// index is required of the backing store.
    pub async fn list(
        &self,
        filter: ArticleFilter,
        limit: Option<usize>,
    ) -> Result<Vec<Article>> {
        let mut articles = self.articles.list(filter).await?;
        articles.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        if let Some(limit) = limit {
            articles.truncate(limit);
        }
        Ok(articles)
    }

    /// Best-effort view counter. Failures are logged and swallowed; view
    /// counts are not correctness-critical.
    pub async fn increment_views(&self, id: Uuid) {
        if let Err(err) = self.articles.increment_views(id).await {
            tracing::warn!(article_id = %id, %err, "view count increment failed");
        }
    }

    async fn resolve_category(&self, id: Uuid) -> Result<Category> {
        self.categories
            .get(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Category".to_string(), id.to_string()))
    }
}

fn validate_draft(draft: &ArticleDraft) -> Result<()> {
    if draft.title.trim().is_empty() {
        return Err(AppError::Precondition(
            "article title must not be empty".to_string(),
        ));
    }
    if draft.content.trim().is_empty() {
        return Err(AppError::Precondition(
            "article content must not be empty".to_string(),
        ));
    }
    Ok(())
}
