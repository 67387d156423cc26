use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{ProductError, ProductResult};
use crate::models::{CreateProduct, Product, UpdateProduct};
use crate::pagination::{OffsetWindow, SortKey, listing_order};

/// Repository trait for Product persistence
///
/// Both listing methods return rows in `(created_at DESC, id DESC)` order.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Insert a new product and return it as stored
    async fn create(&self, input: CreateProduct) -> ProductResult<Product>;

    async fn get_by_id(&self, id: Uuid) -> ProductResult<Option<Product>>;

    /// Up to `take` rows starting at `skip`, plus the total row count, from one snapshot
    async fn list_window(&self, skip: u64, take: u64) -> ProductResult<OffsetWindow>;

    /// Up to `take` rows listed strictly after `after` (from the start when `None`)
    async fn list_after(&self, after: Option<SortKey>, take: u64) -> ProductResult<Vec<Product>>;

    /// Apply a partial update. `NotFound` when the row does not exist.
    async fn update(&self, id: Uuid, input: UpdateProduct) -> ProductResult<Product>;

    /// Returns whether a row was removed
    async fn delete(&self, id: Uuid) -> ProductResult<bool>;
}

/// In-memory implementation of ProductRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryProductRepository {
    products: Arc<RwLock<HashMap<Uuid, Product>>>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self {
            products: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Store `product` as-is, keeping its id and timestamps
    pub async fn insert(&self, product: Product) {
        self.products.write().await.insert(product.id, product);
    }
}

fn to_usize(n: u64) -> usize {
    usize::try_from(n).unwrap_or(usize::MAX)
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn create(&self, input: CreateProduct) -> ProductResult<Product> {
        let product = Product::new(input);
        self.products
            .write()
            .await
            .insert(product.id, product.clone());

        tracing::info!(product_id = %product.id, "Created product");
        Ok(product)
    }

    async fn get_by_id(&self, id: Uuid) -> ProductResult<Option<Product>> {
        let products = self.products.read().await;
        Ok(products.get(&id).cloned())
    }

    async fn list_window(&self, skip: u64, take: u64) -> ProductResult<OffsetWindow> {
        // One guard for both the count and the window
        let products = self.products.read().await;

        let mut rows: Vec<&Product> = products.values().collect();
        rows.sort_by(|a, b| listing_order(a, b));

        let window = rows
            .into_iter()
            .skip(to_usize(skip))
            .take(to_usize(take))
            .cloned()
            .collect();

        Ok(OffsetWindow {
            rows: window,
            total: products.len() as u64,
        })
    }

    async fn list_after(&self, after: Option<SortKey>, take: u64) -> ProductResult<Vec<Product>> {
        let products = self.products.read().await;

        let mut rows: Vec<&Product> = products
            .values()
            .filter(|p| after.is_none_or(|cursor| SortKey::of(p).is_after(&cursor)))
            .collect();
        rows.sort_by(|a, b| listing_order(a, b));

        Ok(rows.into_iter().take(to_usize(take)).cloned().collect())
    }

    async fn update(&self, id: Uuid, input: UpdateProduct) -> ProductResult<Product> {
        let mut products = self.products.write().await;

        let product = products.get_mut(&id).ok_or(ProductError::NotFound(id))?;
        product.apply_update(input);
        let updated = product.clone();

        tracing::info!(product_id = %id, "Updated product");
        Ok(updated)
    }

    async fn delete(&self, id: Uuid) -> ProductResult<bool> {
        let removed = self.products.write().await.remove(&id).is_some();
        if removed {
            tracing::info!(product_id = %id, "Deleted product");
        }
        Ok(removed)
    }
}
