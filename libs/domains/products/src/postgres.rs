use async_trait::async_trait;
use database::BaseRepository;
use sea_orm::ActiveValue::Set;
use sea_orm::{
    AccessMode, ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait, IsolationLevel,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Select, TransactionTrait,
};
use uuid::Uuid;

use crate::{
    entity,
    error::{ProductError, ProductResult},
    models::{self, CreateProduct, Product, UpdateProduct},
    pagination::{OffsetWindow, SortKey},
    repository::ProductRepository,
};

pub struct PgProductRepository {
    base: BaseRepository<entity::Entity>,
}

impl PgProductRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }
}

/// `(created_at DESC, id DESC)`, served by `idx_products_created_at_id`
fn in_listing_order(query: Select<entity::Entity>) -> Select<entity::Entity> {
    query
        .order_by_desc(entity::Column::CreatedAt)
        .order_by_desc(entity::Column::Id)
}

/// Rows strictly after `key` in listing order
fn after_condition(key: SortKey) -> Condition {
    let created_at: sea_orm::prelude::DateTimeWithTimeZone = key.created_at.into();
    Condition::any()
        .add(entity::Column::CreatedAt.lt(created_at))
        .add(
            Condition::all()
                .add(entity::Column::CreatedAt.eq(created_at))
                .add(entity::Column::Id.lt(key.id)),
        )
}

#[async_trait]
impl ProductRepository for PgProductRepository {
    async fn create(&self, input: CreateProduct) -> ProductResult<Product> {
        let active_model: entity::ActiveModel = input.into();

        let model = self.base.insert(active_model).await?;

        tracing::info!(product_id = %model.id, "Created product");
        Ok(model.into())
    }

    async fn get_by_id(&self, id: Uuid) -> ProductResult<Option<Product>> {
        let model = self.base.find_by_id(id).await?;
        Ok(model.map(Into::into))
    }

    async fn list_window(&self, skip: u64, take: u64) -> ProductResult<OffsetWindow> {
        // Count and window must agree, so both run in one read-only snapshot
        let txn = self
            .base
            .db()
            .begin_with_config(
                Some(IsolationLevel::RepeatableRead),
                Some(AccessMode::ReadOnly),
            )
            .await?;

        let total = entity::Entity::find().count(&txn).await?;

        // Postgres binds OFFSET as a signed 64-bit value; anything larger is past the end
        let models = if i64::try_from(skip).is_ok() {
            in_listing_order(entity::Entity::find())
                .offset(skip)
                .limit(take)
                .all(&txn)
                .await?
        } else {
            Vec::new()
        };

        txn.commit().await?;

        Ok(OffsetWindow {
            rows: models.into_iter().map(Into::into).collect(),
            total,
        })
    }

    async fn list_after(&self, after: Option<SortKey>, take: u64) -> ProductResult<Vec<Product>> {
        let mut query = entity::Entity::find();
        if let Some(key) = after {
            query = query.filter(after_condition(key));
        }

        let models = in_listing_order(query)
            .limit(take)
            .all(self.base.db())
            .await?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn update(&self, id: Uuid, input: UpdateProduct) -> ProductResult<Product> {
        let model = self
            .base
            .find_by_id(id)
            .await?
            .ok_or(ProductError::NotFound(id))?;

        let mut active_model: entity::ActiveModel = model.into();
        if let Some(name) = input.name {
            active_model.name = Set(name);
        }
        if let Some(description) = input.description {
            active_model.description = Set(Some(description));
        }
        if let Some(price) = input.price {
            active_model.price = Set(price);
        }
        if let Some(stock) = input.stock {
            active_model.stock = Set(stock);
        }
        active_model.updated_at = Set(models::now().into());

        let updated = self
            .base
            .update(active_model)
            .await
            .map_err(|e| match e {
                // Deleted between the lookup and the write
                DbErr::RecordNotUpdated => ProductError::NotFound(id),
                other => other.into(),
            })?;

        tracing::info!(product_id = %id, "Updated product");
        Ok(updated.into())
    }

    async fn delete(&self, id: Uuid) -> ProductResult<bool> {
        let rows_affected = self.base.delete_by_id(id).await?;

        if rows_affected > 0 {
            tracing::info!(product_id = %id, "Deleted product");
            Ok(true)
        } else {
            Ok(false)
        }
    }
}
