//! Integration tests for Products domain
//!
//! These tests use real PostgreSQL via testcontainers to ensure:
//! - Keyset and offset queries page correctly against the real index
//! - Check constraints back up request validation
//! - Timestamps survive the round trip without losing precision

use chrono::{DateTime, Duration, TimeZone, Utc};
use domain_products::*;
use sea_orm::{ActiveModelTrait, DatabaseConnection};
use test_utils::{TestDataBuilder, TestDatabase, assertions::*};
use uuid::Uuid;

fn input(builder: &TestDataBuilder, i: u64) -> CreateProduct {
    CreateProduct {
        name: builder.name("product", &i.to_string()),
        description: Some(format!("Product number {}", i)),
        price: builder.price(i),
        stock: builder.stock(i),
    }
}

/// Insert a row with a fixed `created_at`, bypassing the repository clock
async fn insert_at(db: &DatabaseConnection, name: &str, at: DateTime<Utc>) -> Product {
    let product = Product {
        id: Uuid::now_v7(),
        name: name.to_string(),
        description: None,
        price: 9.99,
        stock: 1,
        created_at: at,
        updated_at: at,
    };
    let model = entity::ActiveModel::from(product).insert(db).await.unwrap();
    model.into()
}

/// Three rows one minute apart, returned newest first
async fn seed_three(db: &DatabaseConnection) -> Vec<Product> {
    let base = Utc.with_ymd_and_hms(2025, 1, 1, 12, 0, 0).unwrap();
    let oldest = insert_at(db, "Oldest", base).await;
    let middle = insert_at(db, "Middle", base + Duration::minutes(1)).await;
    let newest = insert_at(db, "Newest", base + Duration::minutes(2)).await;
    vec![newest, middle, oldest]
}

fn ids(products: &[Product]) -> Vec<Uuid> {
    products.iter().map(|p| p.id).collect()
}

// ============================================================================
// Repository Tests
// ============================================================================

#[tokio::test]
async fn test_create_and_get_product() {
    let db = TestDatabase::new().await;
    let repo = PgProductRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("create_and_get");

    let input = input(&builder, 0);
    let created = repo.create(input.clone()).await.unwrap();

    assert_eq!(created.name, input.name);
    assert_eq!(created.price, input.price);
    assert_eq!(created.stock, input.stock);
    assert_eq!(created.created_at, created.updated_at);

    let retrieved = repo.get_by_id(created.id).await.unwrap();
    let retrieved = assert_some(retrieved, "product should exist");

    assert_uuid_eq(retrieved.id, created.id, "retrieved product id");
    // Microsecond timestamps come back unchanged
    assert_eq!(retrieved, created);
}

#[tokio::test]
async fn test_get_missing_product_is_none() {
    let db = TestDatabase::new().await;
    let repo = PgProductRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("get_missing");

    let result = repo.get_by_id(builder.uuid()).await.unwrap();
    assert!(result.is_none());
}

#[tokio::test]
async fn test_check_constraints_reject_bad_rows() {
    let db = TestDatabase::new().await;
    let repo = PgProductRepository::new(db.connection());

    // Skips request validation to reach the database
    let zero_price = CreateProduct {
        name: "Free lunch".to_string(),
        description: None,
        price: 0.0,
        stock: 1,
    };
    let result = repo.create(zero_price).await;
    assert!(matches!(result, Err(ProductError::Internal(_))));

    let negative_stock = CreateProduct {
        name: "Backorder".to_string(),
        description: None,
        price: 1.0,
        stock: -1,
    };
    let result = repo.create(negative_stock).await;
    assert!(matches!(result, Err(ProductError::Internal(_))));
}

#[tokio::test]
async fn test_update_product_keeps_identity() {
    let db = TestDatabase::new().await;
    let repo = PgProductRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("update_product");

    let created = repo.create(input(&builder, 1)).await.unwrap();

    let updated = repo
        .update(
            created.id,
            UpdateProduct {
                name: Some(builder.name("product", "renamed")),
                price: Some(12.5),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_uuid_eq(updated.id, created.id, "updated product id");
    assert_eq!(updated.name, builder.name("product", "renamed"));
    assert_eq!(updated.price, 12.5);
    assert_eq!(updated.stock, created.stock);
    assert_eq!(updated.description, created.description);
    assert_eq!(updated.created_at, created.created_at);
    assert!(updated.updated_at >= created.updated_at);
}

#[tokio::test]
async fn test_update_missing_product_is_not_found() {
    let db = TestDatabase::new().await;
    let repo = PgProductRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("update_missing");

    let result = repo
        .update(
            builder.uuid(),
            UpdateProduct {
                stock: Some(1),
                ..Default::default()
            },
        )
        .await;

    assert!(matches!(result, Err(ProductError::NotFound(_))));
}

#[tokio::test]
async fn test_delete_product() {
    let db = TestDatabase::new().await;
    let repo = PgProductRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("delete_product");

    let created = repo.create(input(&builder, 2)).await.unwrap();

    assert!(repo.delete(created.id).await.unwrap());
    assert!(repo.get_by_id(created.id).await.unwrap().is_none());
    assert!(!repo.delete(created.id).await.unwrap());
}

// ============================================================================
// Pagination Tests
// ============================================================================

#[tokio::test]
async fn test_offset_pages_through_three_products() {
    let db = TestDatabase::new().await;
    let seeded = seed_three(&db.connection()).await;
    let service = ProductService::new(PgProductRepository::new(db.connection()));

    let first = service
        .list_offset(OffsetParams { page: 1, limit: 2 })
        .await
        .unwrap();
    assert_ids_eq(&ids(&first.data), &ids(&seeded[..2]), "first offset page");
    assert_eq!(first.total, 3);
    assert_eq!(first.total_pages, 2);

    let second = service
        .list_offset(OffsetParams { page: 2, limit: 2 })
        .await
        .unwrap();
    assert_ids_eq(&ids(&second.data), &ids(&seeded[2..]), "second offset page");

    let beyond = service
        .list_offset(OffsetParams { page: 5, limit: 2 })
        .await
        .unwrap();
    assert!(beyond.data.is_empty());
    assert_eq!(beyond.total, 3);
}

#[tokio::test]
async fn test_offset_huge_page_is_empty_with_true_total() {
    let db = TestDatabase::new().await;
    seed_three(&db.connection()).await;
    let service = ProductService::new(PgProductRepository::new(db.connection()));

    let page = service
        .list_offset(OffsetParams {
            page: 1_000_000_000_000_000_000,
            limit: 10,
        })
        .await
        .unwrap();
    assert!(page.data.is_empty());
    assert_eq!(page.total, 3);
    assert_eq!(page.page, 1_000_000_000_000_000_000);

    let last = service
        .list_offset(OffsetParams {
            page: u64::MAX,
            limit: 100,
        })
        .await
        .unwrap();
    assert!(last.data.is_empty());
    assert_eq!(last.total, 3);
}

#[tokio::test]
async fn test_cursor_pages_through_three_products() {
    let db = TestDatabase::new().await;
    let seeded = seed_three(&db.connection()).await;
    let service = ProductService::new(PgProductRepository::new(db.connection()));

    let first = service
        .list_cursor(CursorParams {
            limit: 2,
            cursor: None,
        })
        .await
        .unwrap();
    assert_ids_eq(&ids(&first.data), &ids(&seeded[..2]), "first cursor page");
    assert!(first.has_next_page);
    assert_eq!(first.next_cursor, Some(seeded[1].id));

    let second = service
        .list_cursor(CursorParams {
            limit: 2,
            cursor: first.next_cursor.map(|id| id.to_string()),
        })
        .await
        .unwrap();
    assert_ids_eq(&ids(&second.data), &ids(&seeded[2..]), "second cursor page");
    assert!(!second.has_next_page);
    assert!(second.next_cursor.is_none());
}

#[tokio::test]
async fn test_cursor_and_offset_agree_with_shared_timestamps() {
    let db = TestDatabase::new().await;
    let conn = db.connection();
    let at = Utc.with_ymd_and_hms(2025, 6, 1, 8, 30, 0).unwrap();
    for i in 0..4 {
        insert_at(&conn, &format!("Twin {}", i), at).await;
    }
    insert_at(&conn, "Earlier", at - Duration::seconds(1)).await;
    insert_at(&conn, "Later", at + Duration::seconds(1)).await;

    let service = ProductService::new(PgProductRepository::new(conn));

    let everything = service
        .list_offset(OffsetParams { page: 1, limit: 100 })
        .await
        .unwrap();
    assert_eq!(everything.total, 6);

    let mut visited = Vec::new();
    let mut cursor = None;
    loop {
        let page = service
            .list_cursor(CursorParams { limit: 2, cursor })
            .await
            .unwrap();
        visited.extend(ids(&page.data));
        if !page.has_next_page {
            break;
        }
        cursor = page.next_cursor.map(|id| id.to_string());
    }

    assert_ids_eq(&visited, &ids(&everything.data), "cursor traversal order");
}

#[tokio::test]
async fn test_deleted_cursor_is_invalid() {
    let db = TestDatabase::new().await;
    let seeded = seed_three(&db.connection()).await;
    let service = ProductService::new(PgProductRepository::new(db.connection()));

    service.delete_product(seeded[1].id).await.unwrap();

    let result = service
        .list_cursor(CursorParams {
            limit: 2,
            cursor: Some(seeded[1].id.to_string()),
        })
        .await;
    assert!(matches!(result, Err(ProductError::InvalidCursor(_))));
}

#[tokio::test]
async fn test_delete_missing_product_changes_nothing() {
    let db = TestDatabase::new().await;
    seed_three(&db.connection()).await;
    let service = ProductService::new(PgProductRepository::new(db.connection()));
    let builder = TestDataBuilder::from_test_name("delete_missing");

    let result = service.delete_product(builder.uuid()).await;
    assert!(matches!(result, Err(ProductError::NotFound(_))));

    let page = service
        .list_offset(OffsetParams::default())
        .await
        .unwrap();
    assert_eq!(page.total, 3);
}

#[tokio::test]
async fn test_truncate_empties_both_listings() {
    let db = TestDatabase::new().await;
    seed_three(&db.connection()).await;
    db.truncate("products").await;
    let service = ProductService::new(PgProductRepository::new(db.connection()));

    let offset = service
        .list_offset(OffsetParams::default())
        .await
        .unwrap();
    assert_eq!(offset.total, 0);
    assert_eq!(offset.total_pages, 0);

    let cursor = service
        .list_cursor(CursorParams::default())
        .await
        .unwrap();
    assert!(cursor.data.is_empty());
    assert!(!cursor.has_next_page);
}
