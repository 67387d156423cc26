use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use strum::{Display, EnumString};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::{Validate, ValidationError};

pub const DEFAULT_PAGE: u64 = 1;
pub const DEFAULT_PAGE_SIZE: u64 = 10;
pub const MAX_PAGE_SIZE: u64 = 100;

/// Rejects names made only of whitespace
fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

/// Current time at the precision Postgres stores (microseconds)
pub(crate) fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

/// Product entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Product {
    /// Unique identifier (UUIDv7). Also the cursor token for cursor pagination.
    pub id: Uuid,
    /// Product name
    pub name: String,
    /// Optional free-form description
    pub description: Option<String>,
    /// Unit price, always greater than zero
    pub price: f64,
    /// Units in stock
    pub stock: i32,
    /// Creation timestamp, primary sort key for listings
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

/// DTO for creating a new product
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateProduct {
    #[validate(length(min = 3, max = 200), custom(function = "validate_not_blank"))]
    #[schema(min_length = 3, max_length = 200, example = "Desk lamp")]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[validate(range(exclusive_min = 0.0))]
    #[schema(example = 24.99)]
    pub price: f64,
    #[validate(range(min = 0))]
    #[schema(minimum = 0, example = 12)]
    pub stock: i32,
}

/// DTO for a partial update. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateProduct {
    #[validate(length(min = 3, max = 200), custom(function = "validate_not_blank"))]
    pub name: Option<String>,
    pub description: Option<String>,
    #[validate(range(exclusive_min = 0.0))]
    pub price: Option<f64>,
    #[validate(range(min = 0))]
    pub stock: Option<i32>,
}

impl Product {
    /// Create a new product from CreateProduct DTO
    pub fn new(input: CreateProduct) -> Self {
        let now = now();
        Self {
            id: Uuid::now_v7(),
            name: input.name,
            description: input.description,
            price: input.price,
            stock: input.stock,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply updates from UpdateProduct DTO
    pub fn apply_update(&mut self, update: UpdateProduct) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(description) = update.description {
            self.description = Some(description);
        }
        if let Some(price) = update.price {
            self.price = price;
        }
        if let Some(stock) = update.stock {
            self.stock = stock;
        }
        self.updated_at = now();
    }
}

fn default_page() -> u64 {
    DEFAULT_PAGE
}

fn default_limit() -> u64 {
    DEFAULT_PAGE_SIZE
}

/// `?cursor=` and `?cursor=%20` mean "no cursor"
fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}

/// Query parameters for offset pagination
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct OffsetParams {
    /// 1-based page number
    #[serde(default = "default_page")]
    #[validate(range(min = 1))]
    #[param(minimum = 1, example = 1)]
    pub page: u64,
    /// Page size
    #[serde(default = "default_limit")]
    #[validate(range(min = 1, max = 100))]
    #[param(minimum = 1, maximum = 100, example = 10)]
    pub limit: u64,
}

impl Default for OffsetParams {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Query parameters for cursor pagination
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CursorParams {
    /// Page size
    #[serde(default = "default_limit")]
    #[validate(range(min = 1, max = 100))]
    #[param(minimum = 1, maximum = 100, example = 10)]
    pub limit: u64,
    /// `next_cursor` from the previous page; omit for the first page
    #[serde(default, deserialize_with = "empty_as_none")]
    pub cursor: Option<String>,
}

impl Default for CursorParams {
    fn default() -> Self {
        Self {
            limit: DEFAULT_PAGE_SIZE,
            cursor: None,
        }
    }
}

/// Which pager serves `GET /products`
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    ToSchema,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum PaginationMode {
    Offset,
    #[default]
    Cursor,
}

/// Combined query for `GET /products`. Fields that do not apply to `mode` are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListQuery {
    /// Pagination strategy, cursor by default
    #[serde(default)]
    pub mode: PaginationMode,
    /// 1-based page number (offset mode)
    #[serde(default = "default_page")]
    #[validate(range(min = 1))]
    #[param(minimum = 1)]
    pub page: u64,
    /// Page size
    #[serde(default = "default_limit")]
    #[validate(range(min = 1, max = 100))]
    #[param(minimum = 1, maximum = 100)]
    pub limit: u64,
    /// Resume position (cursor mode)
    #[serde(default, deserialize_with = "empty_as_none")]
    pub cursor: Option<String>,
}

impl ListQuery {
    pub fn into_mode(self) -> ListMode {
        match self.mode {
            PaginationMode::Offset => ListMode::Offset(OffsetParams {
                page: self.page,
                limit: self.limit,
            }),
            PaginationMode::Cursor => ListMode::Cursor(CursorParams {
                limit: self.limit,
                cursor: self.cursor,
            }),
        }
    }
}

/// A listing request for either pager
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListMode {
    Offset(OffsetParams),
    Cursor(CursorParams),
}

/// One page of an offset listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct OffsetPage {
    pub data: Vec<Product>,
    /// Total number of products at the time of the read
    pub total: u64,
    pub page: u64,
    pub limit: u64,
    /// `ceil(total / limit)`
    pub total_pages: u64,
}

/// One page of a cursor listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CursorPage {
    pub data: Vec<Product>,
    pub has_next_page: bool,
    /// Pass as `cursor` to fetch the next page. Present only when `has_next_page` is true.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_cursor: Option<Uuid>,
}

/// Result of `list_products`, shaped by the requested mode
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum ProductPage {
    Offset(OffsetPage),
    Cursor(CursorPage),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create(name: &str, price: f64, stock: i32) -> CreateProduct {
        CreateProduct {
            name: name.to_string(),
            description: None,
            price,
            stock,
        }
    }

    #[test]
    fn test_create_validation_rules() {
        assert!(create("Lamp", 9.5, 0).validate().is_ok());
        assert!(create("ab", 9.5, 0).validate().is_err());
        assert!(create("   ", 9.5, 0).validate().is_err());
        assert!(create("Lamp", 0.0, 0).validate().is_err());
        assert!(create("Lamp", -1.0, 0).validate().is_err());
        assert!(create("Lamp", 9.5, -1).validate().is_err());
        assert!(create(&"x".repeat(201), 9.5, 0).validate().is_err());
    }

    #[test]
    fn test_update_validation_only_checks_present_fields() {
        assert!(UpdateProduct::default().validate().is_ok());

        let bad = UpdateProduct {
            price: Some(0.0),
            ..Default::default()
        };
        assert!(bad.validate().is_err());
    }

    #[test]
    fn test_new_product_timestamps_are_microsecond_precise() {
        let product = Product::new(create("Lamp", 9.5, 3));
        assert_eq!(product.created_at, product.updated_at);
        assert_eq!(product.created_at.timestamp_subsec_nanos() % 1_000, 0);
    }

    #[test]
    fn test_apply_update_keeps_identity() {
        let mut product = Product::new(create("Lamp", 9.5, 3));
        let (id, created_at) = (product.id, product.created_at);

        product.apply_update(UpdateProduct {
            name: Some("Floor lamp".into()),
            stock: Some(7),
            ..Default::default()
        });

        assert_eq!(product.id, id);
        assert_eq!(product.created_at, created_at);
        assert_eq!(product.name, "Floor lamp");
        assert_eq!(product.stock, 7);
        assert_eq!(product.price, 9.5);
        assert!(product.updated_at >= created_at);
    }

    #[test]
    fn test_list_query_defaults_to_cursor_mode() {
        let query: ListQuery = serde_json::from_str("{}").unwrap();
        assert_eq!(
            query.into_mode(),
            ListMode::Cursor(CursorParams {
                limit: 10,
                cursor: None
            })
        );
    }

    #[test]
    fn test_list_query_offset_mode() {
        let query: ListQuery =
            serde_json::from_str(r#"{"mode":"offset","page":3,"limit":5}"#).unwrap();
        assert_eq!(
            query.into_mode(),
            ListMode::Offset(OffsetParams { page: 3, limit: 5 })
        );
    }

    #[test]
    fn test_blank_cursor_is_absent() {
        let params: CursorParams = serde_json::from_str(r#"{"cursor":"  "}"#).unwrap();
        assert_eq!(params.cursor, None);
    }

    #[test]
    fn test_cursor_page_omits_missing_next_cursor() {
        let page = CursorPage {
            data: vec![],
            has_next_page: false,
            next_cursor: None,
        };
        let json = serde_json::to_value(&page).unwrap();
        assert!(json.get("next_cursor").is_none());
    }

    #[test]
    fn test_product_page_serializes_untagged() {
        let page = ProductPage::Offset(OffsetPage {
            data: vec![],
            total: 0,
            page: 1,
            limit: 10,
            total_pages: 0,
        });
        let json = serde_json::to_value(&page).unwrap();
        assert_eq!(json["total_pages"], 0);
        assert!(json.get("Offset").is_none());
    }
}
