//! # Comment Ledger
//!
//! Append-only per-article comments: public read, authenticated write, no
//! edit or delete path. Orphans left behind by article deletion are
//! tolerated.

use std::sync::Arc;

use uuid::Uuid;

use crate::policy;
use domains::{AppError, ArticleStore, Comment, CommentStore, Result, UserProfile};

pub struct CommentService {
    comments: Arc<dyn CommentStore>,
    articles: Arc<dyn ArticleStore>,
}

impl CommentService {
    pub fn new(comments: Arc<dyn CommentStore>, articles: Arc<dyn ArticleStore>) -> Self {
        Self { comments, articles }
    }

    /// Comments for an article, newest first. Fetched without server-side
    /// ordering and sorted here, so no compound index is required.
    pub async fn list_by_article(&self, article_id: Uuid) -> Result<Vec<Comment>> {
        let mut comments = self.comments.list_by_article(article_id).await?;
        comments.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(comments)
    }

    /// Appends a comment, snapshotting the author's name and photo at write
    /// time. The article must exist when the comment is created.
    pub async fn add(
        &self,
        actor: Option<&UserProfile>,
        article_id: Uuid,
        content: &str,
    ) -> Result<Comment> {
        if !policy::can_comment(actor) {
            return Err(AppError::PermissionDenied(
                "sign in to comment".to_string(),
            ));
        }
        let author = actor
            .ok_or_else(|| AppError::PermissionDenied("sign in to comment".to_string()))?;
        if content.trim().is_empty() {
            return Err(AppError::Precondition(
                "comment content must not be empty".to_string(),
            ));
        }
        self.articles
            .get(article_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Article".to_string(), article_id.to_string()))?;

        let comment = Comment {
            id: Uuid::now_v7(),
            article_id,
            user_id: author.uid,
            user_name: author.display_name.clone(),
            user_photo: author.photo_url.clone(),
            content: content.to_string(),
            created_at: chrono::Utc::now(),
        };
        self.comments.insert(&comment).await?;
        tracing::info!(comment_id = %comment.id, article_id = %article_id, "comment added");
        Ok(comment)
    }
}
