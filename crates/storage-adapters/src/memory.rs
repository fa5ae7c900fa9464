//! # In-memory document store
//!
//! One concurrent map per collection, behaving like the external document
//! store's contract: equality filtering, no ordering guarantees. The
//! default backend, and the happy-path double in tests.

use async_trait::async_trait;
use dashmap::DashMap;
use uuid::Uuid;

use domains::{
    AppError, Article, ArticleFilter, ArticleStore, Category, CategoryStore, Comment,
    CommentStore, Result, Role, UserProfile, UserStore,
};

#[derive(Default)]
pub struct MemoryStore {
    users: DashMap<Uuid, UserProfile>,
    categories: DashMap<Uuid, Category>,
    articles: DashMap<Uuid, Article>,
    comments: DashMap<Uuid, Comment>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn get(&self, uid: Uuid) -> Result<Option<UserProfile>> {
        Ok(self.users.get(&uid).map(|entry| entry.value().clone()))
    }

    async fn put(&self, profile: &UserProfile) -> Result<()> {
        self.users.insert(profile.uid, profile.clone());
        Ok(())
    }

    async fn list(&self) -> Result<Vec<UserProfile>> {
        Ok(self.users.iter().map(|entry| entry.value().clone()).collect())
    }

    async fn set_role(&self, uid: Uuid, role: Role) -> Result<()> {
        match self.users.get_mut(&uid) {
            Some(mut entry) => {
                entry.role = role;
                Ok(())
            }
            None => Err(AppError::NotFound(
                "UserProfile".to_string(),
                uid.to_string(),
            )),
        }
    }
}

#[async_trait]
impl CategoryStore for MemoryStore {
    async fn insert(&self, category: &Category) -> Result<()> {
        self.categories.insert(category.id, category.clone());
        Ok(())
    }

    async fn get(&self, id: Uuid) -> Result<Option<Category>> {
        Ok(self.categories.get(&id).map(|entry| entry.value().clone()))
    }

    async fn list(&self) -> Result<Vec<Category>> {
        Ok(self.categories.iter().map(|entry| entry.value().clone()).collect())
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        self.categories.remove(&id);
        Ok(())
    }
}

#[async_trait]
impl ArticleStore for MemoryStore {
    async fn insert(&self, article: &Article) -> Result<()> {
        self.articles.insert(article.id, article.clone());
        Ok(())
    }

    async fn update(&self, article: &Article) -> Result<()> {
        if !self.articles.contains_key(&article.id) {
            return Err(AppError::NotFound(
                "Article".to_string(),
                article.id.to_string(),
            ));
        }
        self.articles.insert(article.id, article.clone());
        Ok(())
    }

    async fn get(&self, id: Uuid) -> Result<Option<Article>> {
        Ok(self.articles.get(&id).map(|entry| entry.value().clone()))
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        self.articles.remove(&id);
        Ok(())
    }

    async fn list(&self, filter: ArticleFilter) -> Result<Vec<Article>> {
        Ok(self
            .articles
            .iter()
            .filter(|entry| match filter.category_id {
                Some(category_id) => entry.category_id == Some(category_id),
                None => true,
            })
            .map(|entry| entry.value().clone())
            .collect())
    }

    async fn increment_views(&self, id: Uuid) -> Result<()> {
        match self.articles.get_mut(&id) {
            Some(mut entry) => {
                entry.views += 1;
                Ok(())
            }
            None => Err(AppError::NotFound("Article".to_string(), id.to_string())),
        }
    }
}

#[async_trait]
impl CommentStore for MemoryStore {
    async fn insert(&self, comment: &Comment) -> Result<()> {
        self.comments.insert(comment.id, comment.clone());
        Ok(())
    }

    async fn list_by_article(&self, article_id: Uuid) -> Result<Vec<Comment>> {
        Ok(self
            .comments
            .iter()
            .filter(|entry| entry.article_id == article_id)
            .map(|entry| entry.value().clone())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn category(name: &str) -> Category {
        Category {
            id: Uuid::now_v7(),
            name: name.to_string(),
            created_at: Utc::now(),
        }
    }

    fn article(category_id: Uuid) -> Article {
        Article {
            id: Uuid::now_v7(),
            title: "테스트 기사".to_string(),
            summary: "요약".to_string(),
            content: "<p>본문</p>".to_string(),
            category_id: Some(category_id),
            category_name: "학교 이야기".to_string(),
            category: "학교 이야기".to_string(),
            image_url: String::new(),
            youtube_url: None,
            author_id: Uuid::now_v7(),
            author_name: "김기자".to_string(),
            created_at: Utc::now(),
            updated_at: None,
            views: 0,
            tags: vec![],
        }
    }

    #[tokio::test]
    async fn test_article_filter_and_views() {
        let store = MemoryStore::new();
        let school = category("학교 이야기");
        let culture = category("문화/행사");
        CategoryStore::insert(&store, &school).await.unwrap();
        CategoryStore::insert(&store, &culture).await.unwrap();

        let a = article(school.id);
        let b = article(culture.id);
        ArticleStore::insert(&store, &a).await.unwrap();
        ArticleStore::insert(&store, &b).await.unwrap();

        let school_only = ArticleStore::list(
            &store,
            ArticleFilter {
                category_id: Some(school.id),
            },
        )
        .await
        .unwrap();
        assert_eq!(school_only.len(), 1);
        assert_eq!(school_only[0].id, a.id);

        store.increment_views(a.id).await.unwrap();
        store.increment_views(a.id).await.unwrap();
        let fetched = ArticleStore::get(&store, a.id).await.unwrap().unwrap();
        assert_eq!(fetched.views, 2);

        let missing = store.increment_views(Uuid::now_v7()).await;
        assert!(matches!(missing, Err(AppError::NotFound(_, _))));
    }

    #[tokio::test]
    async fn test_set_role_roundtrip() {
        let store = MemoryStore::new();
        let profile = UserProfile {
            uid: Uuid::now_v7(),
            email: Some("kid@example.com".to_string()),
            display_name: "한별".to_string(),
            photo_url: None,
            role: Role::Reader,
            created_at: Utc::now(),
        };
        store.put(&profile).await.unwrap();
        store.set_role(profile.uid, Role::Reporter).await.unwrap();
        let fetched = UserStore::get(&store, profile.uid).await.unwrap().unwrap();
        assert_eq!(fetched.role, Role::Reporter);
    }
}
