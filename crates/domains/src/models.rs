//! # Domain Models
//!
//! These structs represent the core entities of the newsroom.
//! We use UUID v7 for time-ordered, globally unique identification.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Display label used when an article's category can no longer be resolved
/// (the category was deleted after the article referenced it).
pub const FALLBACK_CATEGORY_LABEL: &str = "일반";

/// The fixed role set of the site. Exactly one admin exists, identified by
/// a configured email address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Reporter,
    Reader,
}

/// A raw authentication principal as handed over by the identity provider.
/// Everything except `uid` may be absent; the resolver fills in fallbacks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    pub uid: Uuid,
    pub email: Option<String>,
    pub display_name: Option<String>,
    pub photo_url: Option<String>,
}

/// The resolved profile of a signed-in user, as stored in the `users`
/// collection and published to session subscribers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub uid: Uuid,
    pub email: Option<String>,
    pub display_name: String,
    pub photo_url: Option<String>,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

/// A named article category, ordered by creation time in navigation.
/// Name uniqueness is intentionally not enforced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// A published article.
///
/// `category_name` is a denormalized snapshot of the referenced category's
/// name at write time; `category` is the legacy plain-text field kept in
/// sync for records written before ids existed. Renaming a category does
/// not retroactively update past articles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    pub id: Uuid,
    pub title: String,
    pub summary: String,
    /// Rich text / HTML body
    pub content: String,
    /// Absent on legacy records that only carry the plain-text `category`
    pub category_id: Option<Uuid>,
    pub category_name: String,
    /// Legacy plain-text fallback, superseded by `category_name`
    pub category: String,
    pub image_url: String,
    pub youtube_url: Option<String>,
    pub author_id: Uuid,
    pub author_name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    pub views: u64,
    pub tags: Vec<String>,
}

impl Article {
    /// Best label available for display: the denormalized snapshot, the
    /// legacy plain-text field, or the generic fallback.
    pub fn category_label(&self) -> &str {
        if !self.category_name.trim().is_empty() {
            &self.category_name
        } else if !self.category.trim().is_empty() {
            &self.category
        } else {
            FALLBACK_CATEGORY_LABEL
        }
    }
}

/// Write-side input for creating or fully replacing an article's content
/// fields. Authorship and timestamps are assigned by the repository.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArticleDraft {
    pub title: String,
    pub summary: String,
    pub content: String,
    pub category_id: Uuid,
    pub image_url: String,
    pub youtube_url: Option<String>,
    pub tags: Vec<String>,
}

/// Equality filter for article listings. Ordering and limits are the
/// repository's business; stores only match.
#[derive(Debug, Clone, Copy, Default)]
pub struct ArticleFilter {
    pub category_id: Option<Uuid>,
}

/// A reader comment on an article. Append-only: never edited or deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: Uuid,
    pub article_id: Uuid,
    pub user_id: Uuid,
    /// Snapshot of the author's display name at write time
    pub user_name: String,
    /// Snapshot of the author's photo at write time
    pub user_photo: Option<String>,
    pub content: String,
    pub created_at: DateTime<Utc>,
}
