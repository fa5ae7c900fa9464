//! # SQLite document store
//!
//! Maps the four record collections onto SQLite tables. Collections stay
//! independent: no statement here touches more than one table, matching
//! the external store's no-transaction contract.

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::Row;
use std::str::FromStr;
use uuid::Uuid;

use domains::{
    AppError, Article, ArticleFilter, ArticleStore, Category, CategoryStore, Comment,
    CommentStore, Result, Role, UserProfile, UserStore,
};

const SCHEMA: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS users (
        uid TEXT PRIMARY KEY,
        email TEXT,
        display_name TEXT NOT NULL,
        photo_url TEXT,
        role TEXT NOT NULL,
        created_at TEXT NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS categories (
        id TEXT PRIMARY KEY,
        name TEXT NOT NULL,
        created_at TEXT NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS articles (
        id TEXT PRIMARY KEY,
        title TEXT NOT NULL,
        summary TEXT NOT NULL,
        content TEXT NOT NULL,
        category_id TEXT,
        category_name TEXT NOT NULL,
        category TEXT NOT NULL,
        image_url TEXT NOT NULL,
        youtube_url TEXT,
        author_id TEXT NOT NULL,
        author_name TEXT NOT NULL,
        created_at TEXT NOT NULL,
        updated_at TEXT,
        views INTEGER NOT NULL,
        tags TEXT NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS comments (
        id TEXT PRIMARY KEY,
        article_id TEXT NOT NULL,
        user_id TEXT NOT NULL,
        user_name TEXT NOT NULL,
        user_photo TEXT,
        content TEXT NOT NULL,
        created_at TEXT NOT NULL
    )",
];

pub struct SqliteStore {
    pool: SqlitePool,
}

// Helpers for UUID and role column conversion
fn uuid_to_text(id: Uuid) -> String {
    id.to_string()
}

fn text_to_uuid(text: &str) -> Uuid {
    Uuid::try_parse(text).unwrap_or_default()
}

fn role_to_text(role: Role) -> &'static str {
    match role {
        Role::Admin => "admin",
        Role::Reporter => "reporter",
        Role::Reader => "reader",
    }
}

// Unknown or missing role values default to reader.
fn text_to_role(text: &str) -> Role {
    match text {
        "admin" => Role::Admin,
        "reporter" => Role::Reporter,
        _ => Role::Reader,
    }
}

fn db_err(err: sqlx::Error) -> AppError {
    AppError::Backend(err.to_string())
}

impl SqliteStore {
    /// Opens (creating if missing) the database at `url` and bootstraps the
    /// schema. A single connection: SQLite serializes writes anyway.
    pub async fn new(url: &str) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(url)
            .map_err(db_err)?
            .create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .map_err(db_err)?;
        for statement in SCHEMA {
            sqlx::query(statement)
                .execute(&pool)
                .await
                .map_err(db_err)?;
        }
        Ok(Self { pool })
    }
}

fn row_to_user(row: &sqlx::sqlite::SqliteRow) -> UserProfile {
    UserProfile {
        uid: text_to_uuid(&row.get::<String, _>("uid")),
        email: row.get("email"),
        display_name: row.get("display_name"),
        photo_url: row.get("photo_url"),
        role: text_to_role(&row.get::<String, _>("role")),
        created_at: row.get("created_at"),
    }
}

fn row_to_category(row: &sqlx::sqlite::SqliteRow) -> Category {
    Category {
        id: text_to_uuid(&row.get::<String, _>("id")),
        name: row.get("name"),
        created_at: row.get("created_at"),
    }
}

fn row_to_article(row: &sqlx::sqlite::SqliteRow) -> Article {
    Article {
        id: text_to_uuid(&row.get::<String, _>("id")),
        title: row.get("title"),
        summary: row.get("summary"),
        content: row.get("content"),
        category_id: row
            .get::<Option<String>, _>("category_id")
            .as_deref()
            .map(text_to_uuid),
        category_name: row.get("category_name"),
        category: row.get("category"),
        image_url: row.get("image_url"),
        youtube_url: row.get("youtube_url"),
        author_id: text_to_uuid(&row.get::<String, _>("author_id")),
        author_name: row.get("author_name"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
        views: row.get::<i64, _>("views") as u64,
        tags: serde_json::from_str(&row.get::<String, _>("tags")).unwrap_or_default(),
    }
}

fn row_to_comment(row: &sqlx::sqlite::SqliteRow) -> Comment {
    Comment {
        id: text_to_uuid(&row.get::<String, _>("id")),
        article_id: text_to_uuid(&row.get::<String, _>("article_id")),
        user_id: text_to_uuid(&row.get::<String, _>("user_id")),
        user_name: row.get("user_name"),
        user_photo: row.get("user_photo"),
        content: row.get("content"),
        created_at: row.get("created_at"),
    }
}

#[async_trait]
impl UserStore for SqliteStore {
    async fn get(&self, uid: Uuid) -> Result<Option<UserProfile>> {
        let row = sqlx::query("SELECT * FROM users WHERE uid = ?")
            .bind(uuid_to_text(uid))
            .fetch_optional(&self.pool)
            .await
            .map_err(db_err)?;
        Ok(row.as_ref().map(row_to_user))
    }

    async fn put(&self, profile: &UserProfile) -> Result<()> {
        sqlx::query(
            "INSERT OR REPLACE INTO users (uid, email, display_name, photo_url, role, created_at)
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(uuid_to_text(profile.uid))
        .bind(&profile.email)
        .bind(&profile.display_name)
        .bind(&profile.photo_url)
        .bind(role_to_text(profile.role))
        .bind(profile.created_at)
        .execute(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(())
    }

    async fn list(&self) -> Result<Vec<UserProfile>> {
        let rows = sqlx::query("SELECT * FROM users")
            .fetch_all(&self.pool)
            .await
            .map_err(db_err)?;
        Ok(rows.iter().map(row_to_user).collect())
    }

    async fn set_role(&self, uid: Uuid, role: Role) -> Result<()> {
        let result = sqlx::query("UPDATE users SET role = ? WHERE uid = ?")
            .bind(role_to_text(role))
            .bind(uuid_to_text(uid))
            .execute(&self.pool)
            .await
            .map_err(db_err)?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(
                "UserProfile".to_string(),
                uid.to_string(),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl CategoryStore for SqliteStore {
    async fn insert(&self, category: &Category) -> Result<()> {
        sqlx::query("INSERT OR REPLACE INTO categories (id, name, created_at) VALUES (?, ?, ?)")
            .bind(uuid_to_text(category.id))
            .bind(&category.name)
            .bind(category.created_at)
            .execute(&self.pool)
            .await
            .map_err(db_err)?;
        Ok(())
    }

    async fn get(&self, id: Uuid) -> Result<Option<Category>> {
        let row = sqlx::query("SELECT * FROM categories WHERE id = ?")
            .bind(uuid_to_text(id))
            .fetch_optional(&self.pool)
            .await
            .map_err(db_err)?;
        Ok(row.as_ref().map(row_to_category))
    }

    async fn list(&self) -> Result<Vec<Category>> {
        let rows = sqlx::query("SELECT * FROM categories")
            .fetch_all(&self.pool)
            .await
            .map_err(db_err)?;
        Ok(rows.iter().map(row_to_category).collect())
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        sqlx::query("DELETE FROM categories WHERE id = ?")
            .bind(uuid_to_text(id))
            .execute(&self.pool)
            .await
            .map_err(db_err)?;
        Ok(())
    }
}

#[async_trait]
impl ArticleStore for SqliteStore {
    async fn insert(&self, article: &Article) -> Result<()> {
        sqlx::query(
            "INSERT INTO articles (id, title, summary, content, category_id, category_name,
             category, image_url, youtube_url, author_id, author_name, created_at, updated_at,
             views, tags) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(uuid_to_text(article.id))
        .bind(&article.title)
        .bind(&article.summary)
        .bind(&article.content)
        .bind(article.category_id.map(uuid_to_text))
        .bind(&article.category_name)
        .bind(&article.category)
        .bind(&article.image_url)
        .bind(&article.youtube_url)
        .bind(uuid_to_text(article.author_id))
        .bind(&article.author_name)
        .bind(article.created_at)
        .bind(article.updated_at)
        .bind(article.views as i64)
        .bind(serde_json::to_string(&article.tags).map_err(|e| AppError::Backend(e.to_string()))?)
        .execute(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(())
    }

    async fn update(&self, article: &Article) -> Result<()> {
        let result = sqlx::query(
            "UPDATE articles SET title = ?, summary = ?, content = ?, category_id = ?,
             category_name = ?, category = ?, image_url = ?, youtube_url = ?, updated_at = ?,
             tags = ? WHERE id = ?",
        )
        .bind(&article.title)
        .bind(&article.summary)
        .bind(&article.content)
        .bind(article.category_id.map(uuid_to_text))
        .bind(&article.category_name)
        .bind(&article.category)
        .bind(&article.image_url)
        .bind(&article.youtube_url)
        .bind(article.updated_at)
        .bind(serde_json::to_string(&article.tags).map_err(|e| AppError::Backend(e.to_string()))?)
        .bind(uuid_to_text(article.id))
        .execute(&self.pool)
        .await
        .map_err(db_err)?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(
                "Article".to_string(),
                article.id.to_string(),
            ));
        }
        Ok(())
    }

    async fn get(&self, id: Uuid) -> Result<Option<Article>> {
        let row = sqlx::query("SELECT * FROM articles WHERE id = ?")
            .bind(uuid_to_text(id))
            .fetch_optional(&self.pool)
            .await
            .map_err(db_err)?;
        Ok(row.as_ref().map(row_to_article))
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        sqlx::query("DELETE FROM articles WHERE id = ?")
            .bind(uuid_to_text(id))
            .execute(&self.pool)
            .await
            .map_err(db_err)?;
        Ok(())
    }

    async fn list(&self, filter: ArticleFilter) -> Result<Vec<Article>> {
        let rows = match filter.category_id {
            Some(category_id) => {
                sqlx::query("SELECT * FROM articles WHERE category_id = ?")
                    .bind(uuid_to_text(category_id))
                    .fetch_all(&self.pool)
                    .await
            }
            None => sqlx::query("SELECT * FROM articles").fetch_all(&self.pool).await,
        }
        .map_err(db_err)?;
        Ok(rows.iter().map(row_to_article).collect())
    }

    async fn increment_views(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("UPDATE articles SET views = views + 1 WHERE id = ?")
            .bind(uuid_to_text(id))
            .execute(&self.pool)
            .await
            .map_err(db_err)?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Article".to_string(), id.to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl CommentStore for SqliteStore {
    async fn insert(&self, comment: &Comment) -> Result<()> {
        sqlx::query(
            "INSERT INTO comments (id, article_id, user_id, user_name, user_photo, content,
             created_at) VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(uuid_to_text(comment.id))
        .bind(uuid_to_text(comment.article_id))
        .bind(uuid_to_text(comment.user_id))
        .bind(&comment.user_name)
        .bind(&comment.user_photo)
        .bind(&comment.content)
        .bind(comment.created_at)
        .execute(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(())
    }

    async fn list_by_article(&self, article_id: Uuid) -> Result<Vec<Comment>> {
        let rows = sqlx::query("SELECT * FROM comments WHERE article_id = ?")
            .bind(uuid_to_text(article_id))
            .fetch_all(&self.pool)
            .await
            .map_err(db_err)?;
        Ok(rows.iter().map(row_to_comment).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[tokio::test]
    async fn test_article_roundtrip_and_views() {
        let store = SqliteStore::new("sqlite::memory:").await.unwrap();

        let category = Category {
            id: Uuid::now_v7(),
            name: "학교 이야기".to_string(),
            created_at: Utc::now(),
        };
        CategoryStore::insert(&store, &category).await.unwrap();

        let article = Article {
            id: Uuid::now_v7(),
            title: "체육대회 소식".to_string(),
            summary: "가을 체육대회".to_string(),
            content: "<p>지난 금요일...</p>".to_string(),
            category_id: Some(category.id),
            category_name: category.name.clone(),
            category: category.name.clone(),
            image_url: "https://example.com/sports.jpg".to_string(),
            youtube_url: None,
            author_id: Uuid::now_v7(),
            author_name: "김기자".to_string(),
            created_at: Utc::now(),
            updated_at: None,
            views: 0,
            tags: vec!["체육".to_string()],
        };
        ArticleStore::insert(&store, &article).await.unwrap();

        let fetched = ArticleStore::get(&store, article.id).await.unwrap().unwrap();
        assert_eq!(fetched.title, article.title);
        assert_eq!(fetched.category_id, Some(category.id));
        assert_eq!(fetched.tags, article.tags);

        store.increment_views(article.id).await.unwrap();
        let fetched = ArticleStore::get(&store, article.id).await.unwrap().unwrap();
        assert_eq!(fetched.views, 1);

        let filtered = ArticleStore::list(
            &store,
            ArticleFilter {
                category_id: Some(category.id),
            },
        )
        .await
        .unwrap();
        assert_eq!(filtered.len(), 1);

        let none = ArticleStore::list(
            &store,
            ArticleFilter {
                category_id: Some(Uuid::now_v7()),
            },
        )
        .await
        .unwrap();
        assert!(none.is_empty());
    }

    #[tokio::test]
    async fn test_user_role_persistence() {
        let store = SqliteStore::new("sqlite::memory:").await.unwrap();
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
        assert_eq!(fetched.email, profile.email);
    }
}
