//! # Newsroom Binary
//!
//! Assembles the application from compile-time-selected adapters and runs
//! a seed pass: registers the admin, creates the starter categories, and
//! publishes a sample article so a fresh deployment is not empty.

use std::sync::Arc;

use anyhow::Context;

use auth_adapters::CredentialAuthGateway;
use configs::Settings;
use domains::{
    ArticleDraft, ArticleFilter, ArticleStore, CategoryStore, CommentStore, TextAssist,
    UserStore,
};
use services::{ArticleService, AssistService, CategoryService, CommentService, Session};

use assist_adapters::DisabledAssist;

#[cfg(feature = "assist-http")]
use assist_adapters::HttpAssistGateway;

#[cfg(feature = "db-sqlite")]
use storage_adapters::SqliteStore;

#[cfg(not(feature = "db-sqlite"))]
use storage_adapters::MemoryStore;

const STARTER_CATEGORIES: [&str; 5] = [
    "우리동네 소식",
    "학교 이야기",
    "문화/행사",
    "어린이 생각",
    "과학/탐구",
];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let settings = Settings::load().context("failed to load settings")?;

    // 1. Document store
    #[cfg(feature = "db-sqlite")]
    let store = {
        let url = settings.database.url.as_deref().unwrap_or("sqlite:newsroom.db");
        Arc::new(
            SqliteStore::new(url)
                .await
                .context("failed to open sqlite store")?,
        )
    };
    #[cfg(not(feature = "db-sqlite"))]
    let store = Arc::new(MemoryStore::new());

    let users: Arc<dyn UserStore> = store.clone();
    let category_store: Arc<dyn CategoryStore> = store.clone();
    let article_store: Arc<dyn ArticleStore> = store.clone();
    let comment_store: Arc<dyn CommentStore> = store.clone();

    // 2. Identity provider and session
    let auth = Arc::new(CredentialAuthGateway::new());
    let session = Session::start(auth.clone(), users.clone(), &settings.admin_email);

    // 3. Assist gateway
    #[cfg(feature = "assist-http")]
    let assist: Arc<dyn TextAssist> =
        match (settings.assist.endpoint, settings.assist.api_key) {
            (Some(endpoint), Some(api_key)) => {
                Arc::new(HttpAssistGateway::new(endpoint, api_key))
            }
            _ => Arc::new(DisabledAssist),
        };
    #[cfg(not(feature = "assist-http"))]
    let assist: Arc<dyn TextAssist> = Arc::new(DisabledAssist);

    // 4. Services
    let categories = CategoryService::new(category_store.clone());
    let articles = ArticleService::new(article_store.clone(), category_store);
    let comments = CommentService::new(comment_store, article_store);
    let assist = AssistService::new(assist);

    tracing::info!(admin_email = %settings.admin_email, "newsroom starting");

    // 5. Seed: register the admin and wait for the session to resolve it
    session
        .sign_up(&settings.admin_email, "press-pass-2024", "편집장")
        .await
        .context("failed to register the admin account")?;
    let mut session_rx = session.subscribe();
    let admin = loop {
        if let Some(profile) = session.current() {
            break profile;
        }
        if session_rx.changed().await.is_err() {
            anyhow::bail!("session worker stopped before resolving the admin");
        }
    };
    tracing::info!(uid = %admin.uid, role = ?admin.role, "admin signed in");

    if categories.list().await?.is_empty() {
        for name in STARTER_CATEGORIES {
            categories.create(Some(&admin), name).await?;
        }
    }
    let school = categories
        .list()
        .await?
        .into_iter()
        .find(|c| c.name == "학교 이야기")
        .context("starter categories missing")?;

    let body = "<p>지난 금요일, 무지개초등학교 운동장에서 가을 체육대회가 열렸습니다. \
                청군과 백군이 줄다리기와 이어달리기에서 멋진 승부를 펼쳤습니다.</p>";
    // Degrades to the original text when no assist endpoint is configured.
    let polished = assist.polish_article(body).await;

    let article = articles
        .create(
            Some(&admin),
            ArticleDraft {
                title: "가을 체육대회, 운동장을 달군 하루".to_string(),
                summary: "무지개초 가을 체육대회 소식을 전해드립니다.".to_string(),
                content: polished,
                category_id: school.id,
                image_url: "https://picsum.photos/800/600".to_string(),
                youtube_url: None,
                tags: vec!["체육대회".to_string()],
            },
        )
        .await?;
    comments
        .add(Some(&admin), article.id, "멋진 첫 기사를 기다리고 있어요!")
        .await?;
    articles.increment_views(article.id).await;

    for article in articles.list(ArticleFilter::default(), None).await? {
        tracing::info!(
            title = %article.title,
            category = %article.category_label(),
            views = article.views,
            "seeded article"
        );
    }

    session.sign_out().await?;
    session.shutdown();
    Ok(())
}
