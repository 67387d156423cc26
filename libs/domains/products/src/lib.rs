//! Products Domain
//!
//! A product catalog with two ways of paging through it: by page number (`offset`) and by
//! resuming after the last row seen (`cursor`). Both list in `(created_at DESC, id DESC)` order.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Validation, cursor resolution, page assembly
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Data access (trait + Postgres and in-memory implementations)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Entities, DTOs, page shapes
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_products::{PgProductRepository, ProductService, handlers};
//! use sea_orm::DatabaseConnection;
//!
//! fn products_router(db: DatabaseConnection) -> axum::Router {
//!     let service = ProductService::new(PgProductRepository::new(db));
//!     handlers::router(service)
//! }
//! ```

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod pagination;
pub mod postgres;
pub mod repository;
pub mod service;

// Re-export commonly used types
pub use error::{ProductError, ProductResult};
pub use handlers::ApiDoc;
pub use models::{
    CreateProduct, CursorPage, CursorParams, ListMode, ListQuery, OffsetPage, OffsetParams,
    PaginationMode, Product, ProductPage, UpdateProduct,
};
pub use pagination::SortKey;
pub use postgres::PgProductRepository;
pub use repository::{InMemoryProductRepository, ProductRepository};
pub use service::ProductService;
