//! # Authorization Policy
//!
//! Pure decision functions answering "can principal P perform action A on
//! entity E". This module is the single home of role logic; call sites must
//! never re-derive it inline.

use domains::{Article, Role, UserProfile};

fn is_admin(user: Option<&UserProfile>) -> bool {
    matches!(user, Some(u) if u.role == Role::Admin)
}

/// Reporters and the admin may publish new articles.
pub fn can_write_article(user: Option<&UserProfile>) -> bool {
    matches!(user, Some(u) if u.role == Role::Admin || u.role == Role::Reporter)
}

/// The admin may edit any article; a reporter only their own.
pub fn can_edit_article(user: Option<&UserProfile>, article: &Article) -> bool {
    match user {
        Some(u) => {
            u.role == Role::Admin || (u.role == Role::Reporter && u.uid == article.author_id)
        }
        None => false,
    }
}

/// Deletion is admin-only.
pub fn can_delete_article(user: Option<&UserProfile>) -> bool {
    is_admin(user)
}

pub fn can_manage_categories(user: Option<&UserProfile>) -> bool {
    is_admin(user)
}

/// Viewing and administering the user roster is admin-only.
pub fn can_manage_users(user: Option<&UserProfile>) -> bool {
    is_admin(user)
}

/// The admin may toggle anyone between reporter and reader, except the
/// admin account itself.
pub fn can_toggle_reporter(
    user: Option<&UserProfile>,
    target: &UserProfile,
    admin_email: &str,
) -> bool {
    is_admin(user) && target.email.as_deref() != Some(admin_email)
}

/// Any signed-in user may comment.
pub fn can_comment(user: Option<&UserProfile>) -> bool {
    user.is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn user(role: Role) -> UserProfile {
        UserProfile {
            uid: Uuid::now_v7(),
            email: Some(format!("{:?}@example.com", role).to_lowercase()),
            display_name: "테스트".to_string(),
            photo_url: None,
            role,
            created_at: Utc::now(),
        }
    }

    fn article_by(author_id: Uuid) -> Article {
        Article {
            id: Uuid::now_v7(),
            title: "제목".to_string(),
            summary: "요약".to_string(),
            content: "<p>본문</p>".to_string(),
            category_id: Some(Uuid::now_v7()),
            category_name: "과학/탐구".to_string(),
            category: "과학/탐구".to_string(),
            image_url: String::new(),
            youtube_url: None,
            author_id,
            author_name: "김기자".to_string(),
            created_at: Utc::now(),
            updated_at: None,
            views: 0,
            tags: vec![],
        }
    }

    #[test]
    fn write_requires_reporter_or_admin() {
        assert!(can_write_article(Some(&user(Role::Admin))));
        assert!(can_write_article(Some(&user(Role::Reporter))));
        assert!(!can_write_article(Some(&user(Role::Reader))));
        assert!(!can_write_article(None));
    }

    #[test]
    fn edit_requires_admin_or_own_authorship() {
        let reporter = user(Role::Reporter);
        let own = article_by(reporter.uid);
        let other = article_by(Uuid::now_v7());

        assert!(can_edit_article(Some(&reporter), &own));
        assert!(!can_edit_article(Some(&reporter), &other));
        assert!(can_edit_article(Some(&user(Role::Admin)), &other));
        assert!(!can_edit_article(Some(&user(Role::Reader)), &other));
        assert!(!can_edit_article(None, &own));
    }

    #[test]
    fn delete_is_admin_only() {
        assert!(can_delete_article(Some(&user(Role::Admin))));
        assert!(!can_delete_article(Some(&user(Role::Reporter))));
        assert!(!can_delete_article(Some(&user(Role::Reader))));
        assert!(!can_delete_article(None));
    }

    #[test]
    fn category_management_is_admin_only() {
        assert!(can_manage_categories(Some(&user(Role::Admin))));
        assert!(!can_manage_categories(Some(&user(Role::Reporter))));
        assert!(!can_manage_categories(None));
    }

    #[test]
    fn toggle_never_targets_the_admin_account() {
        let admin_email = "acehwan69@gmail.com";
        let admin = user(Role::Admin);
        let mut target = user(Role::Reader);

        assert!(can_toggle_reporter(Some(&admin), &target, admin_email));

        target.email = Some(admin_email.to_string());
        assert!(!can_toggle_reporter(Some(&admin), &target, admin_email));

        let reporter = user(Role::Reporter);
        let other = user(Role::Reader);
        assert!(!can_toggle_reporter(Some(&reporter), &other, admin_email));
        assert!(!can_toggle_reporter(None, &other, admin_email));
    }

    #[test]
    fn commenting_requires_any_signed_in_user() {
        assert!(can_comment(Some(&user(Role::Reader))));
        assert!(can_comment(Some(&user(Role::Admin))));
        assert!(!can_comment(None));
    }
}
