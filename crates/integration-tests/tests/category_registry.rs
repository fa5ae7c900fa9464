//! Category registry: admin-gated CRUD, creation-time ordering, the live
//! feed, and the dangling-reference fallback.


use domains::{AppError, CategoryStore, FALLBACK_CATEGORY_LABEL};
use services::CategoryService;

#[tokio::test]
async fn create_list_delete_roundtrip() {
    let store = fixtures::store();
    let service = CategoryService::new(store.clone());
    let admin = fixtures::admin();

    let local = service.create(Some(&admin), "우리동네 소식").await.unwrap();
    let school = service.create(Some(&admin), "학교 이야기").await.unwrap();

    let listed = service.list().await.unwrap();
    assert_eq!(
        listed.iter().map(|c| c.name.as_str()).collect::<Vec<_>>(),
        vec!["우리동네 소식", "학교 이야기"]
    );

    service.delete(Some(&admin), local.id).await.unwrap();
    let listed = service.list().await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, school.id);
}

#[tokio::test]
async fn management_is_admin_only() {
    let store = fixtures::store();
    let service = CategoryService::new(store.clone());

    let denied = service
        .create(Some(&fixtures::reporter()), "문화/행사")
        .await;
    assert!(matches!(denied, Err(AppError::PermissionDenied(_))));

    let denied = service.create(None, "문화/행사").await;
    assert!(matches!(denied, Err(AppError::PermissionDenied(_))));

    // No write happened.
    assert!(CategoryStore::list(store.as_ref()).await.unwrap().is_empty());
}

#[tokio::test]
async fn blank_names_are_rejected_without_a_write() {
    let store = fixtures::store();
    let service = CategoryService::new(store.clone());
    let admin = fixtures::admin();

    let rejected = service.create(Some(&admin), "   ").await;
    assert!(matches!(rejected, Err(AppError::Precondition(_))));
    assert!(CategoryStore::list(store.as_ref()).await.unwrap().is_empty());
}

#[tokio::test]
async fn listing_sorts_by_creation_time_regardless_of_store_order() {
    let store = fixtures::store();
    let service = CategoryService::new(store.clone());

    // Inserted newest-first; the registry must still list oldest-first.
    let newest = fixtures::category_at("어린이 생각", 1);
    let middle = fixtures::category_at("문화/행사", 30);
    let oldest = fixtures::category_at("우리동네 소식", 90);
    for category in [&newest, &middle, &oldest] {
        CategoryStore::insert(store.as_ref(), category).await.unwrap();
    }

    let listed = service.list().await.unwrap();
    assert_eq!(
        listed.iter().map(|c| c.id).collect::<Vec<_>>(),
        vec![oldest.id, middle.id, newest.id]
    );
}

#[tokio::test]
async fn deleted_category_falls_back_to_generic_label() {
    let store = fixtures::store();
    let service = CategoryService::new(store.clone());
    let admin = fixtures::admin();

    let category = service.create(Some(&admin), "과학/탐구").await.unwrap();
    assert_eq!(service.display_name(category.id).await, "과학/탐구");

    service.delete(Some(&admin), category.id).await.unwrap();
    assert!(service.get_by_id(category.id).await.unwrap().is_none());
    assert_eq!(
        service.display_name(category.id).await,
        FALLBACK_CATEGORY_LABEL
    );
}

#[tokio::test]
async fn feed_republishes_after_every_mutation() {
    let store = fixtures::store();
    let service = CategoryService::new(store.clone());
    let admin = fixtures::admin();

    let rx = service.subscribe();
    assert!(rx.borrow().is_empty());

    let category = service.create(Some(&admin), "학교 이야기").await.unwrap();
    assert_eq!(rx.borrow().len(), 1);

    // A second subscriber is independent and sees the same state.
    let rx2 = service.subscribe();
    assert_eq!(rx2.borrow().len(), 1);

    service.delete(Some(&admin), category.id).await.unwrap();
    assert!(rx.borrow().is_empty());
    assert!(rx2.borrow().is_empty());
}
