use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;
use validator::Validate;

use crate::error::{ProductError, ProductResult};
use crate::models::{
    CreateProduct, CursorPage, CursorParams, ListMode, OffsetPage, OffsetParams, Product,
    ProductPage, UpdateProduct,
};
use crate::pagination::{SortKey, offset_skip, trim_overfetch};
use crate::repository::ProductRepository;

/// Service layer for Product business logic
pub struct ProductService<R: ProductRepository> {
    repository: Arc<R>,
}

impl<R: ProductRepository> Clone for ProductService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

fn validate<T: Validate>(input: &T) -> ProductResult<()> {
    input
        .validate()
        .map_err(|e| ProductError::Validation(e.to_string()))
}

impl<R: ProductRepository> ProductService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    #[instrument(skip(self, input))]
    pub async fn create_product(&self, input: CreateProduct) -> ProductResult<Product> {
        validate(&input)?;
        self.repository.create(input).await
    }

    #[instrument(skip(self))]
    pub async fn get_product(&self, id: Uuid) -> ProductResult<Product> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(ProductError::NotFound(id))
    }

    /// Page `params.page` of `params.limit` rows, newest first, with totals
    #[instrument(skip(self))]
    pub async fn list_offset(&self, params: OffsetParams) -> ProductResult<OffsetPage> {
        validate(&params)?;

        let skip = offset_skip(params.page, params.limit);
        let window = self.repository.list_window(skip, params.limit).await?;

        Ok(OffsetPage::from_window(window, params.page, params.limit))
    }

    /// Up to `params.limit` rows after `params.cursor`, newest first
    #[instrument(skip(self))]
    pub async fn list_cursor(&self, params: CursorParams) -> ProductResult<CursorPage> {
        validate(&params)?;

        let after = match params.cursor.as_deref() {
            Some(raw) => Some(self.resolve_cursor(raw).await?),
            None => None,
        };

        // One extra row tells whether another page exists
        let rows = self
            .repository
            .list_after(after, params.limit.saturating_add(1))
            .await?;

        Ok(trim_overfetch(rows, params.limit))
    }

    pub async fn list_products(&self, mode: ListMode) -> ProductResult<ProductPage> {
        match mode {
            ListMode::Offset(params) => self.list_offset(params).await.map(ProductPage::Offset),
            ListMode::Cursor(params) => self.list_cursor(params).await.map(ProductPage::Cursor),
        }
    }

    /// Map a cursor token to the sort key of the row it names
    async fn resolve_cursor(&self, raw: &str) -> ProductResult<SortKey> {
        let id = Uuid::parse_str(raw.trim()).map_err(|_| {
            ProductError::InvalidCursor(format!("Cursor '{}' is not a product id", raw))
        })?;

        let product = self.repository.get_by_id(id).await?.ok_or_else(|| {
            ProductError::InvalidCursor(format!(
                "Cursor {} does not reference an existing product",
                id
            ))
        })?;

        Ok(SortKey::of(&product))
    }

    #[instrument(skip(self, input))]
    pub async fn update_product(&self, id: Uuid, input: UpdateProduct) -> ProductResult<Product> {
        validate(&input)?;

        self.get_product(id).await?;
        self.repository.update(id, input).await
    }

    /// Delete and return the removed product
    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: Uuid) -> ProductResult<Product> {
        let product = self.get_product(id).await?;

        if !self.repository.delete(id).await? {
            return Err(ProductError::NotFound(id));
        }

        Ok(product)
    }
}
