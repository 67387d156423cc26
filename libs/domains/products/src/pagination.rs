//! Pure pagination arithmetic shared by every repository.
//!
//! Listings are ordered by `(created_at DESC, id DESC)`. The `id` tie-break makes the order
//! total, so rows created in the same microsecond keep a stable position between requests.

use chrono::{DateTime, Utc};
use std::cmp::Ordering;
use uuid::Uuid;

use crate::models::{CursorPage, OffsetPage, Product};

/// Position of a row in the listing order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SortKey {
    pub created_at: DateTime<Utc>,
    pub id: Uuid,
}

impl SortKey {
    pub fn of(product: &Product) -> Self {
        Self {
            created_at: product.created_at,
            id: product.id,
        }
    }

    /// True when `self` is listed strictly after `cursor` (older, or same instant with lower id)
    pub fn is_after(&self, cursor: &SortKey) -> bool {
        self < cursor
    }
}

/// Comparator for the listing order (newest first)
pub fn listing_order(a: &Product, b: &Product) -> Ordering {
    SortKey::of(b).cmp(&SortKey::of(a))
}

/// Rows to skip for a 1-based `page`
pub fn offset_skip(page: u64, limit: u64) -> u64 {
    page.saturating_sub(1).saturating_mul(limit)
}

pub fn total_pages(total: u64, limit: u64) -> u64 {
    if limit == 0 {
        return 0;
    }
    total.div_ceil(limit)
}

/// A window of rows and the row count, read from one snapshot
#[derive(Debug, Clone, PartialEq)]
pub struct OffsetWindow {
    pub rows: Vec<Product>,
    pub total: u64,
}

impl OffsetPage {
    pub fn from_window(window: OffsetWindow, page: u64, limit: u64) -> Self {
        Self {
            data: window.rows,
            total: window.total,
            page,
            limit,
            total_pages: total_pages(window.total, limit),
        }
    }
}

/// Turn a `limit + 1` over-fetch into a page.
///
/// The extra row only signals that another page exists; it is dropped, and the cursor is the
/// last row actually returned.
pub fn trim_overfetch(mut rows: Vec<Product>, limit: u64) -> CursorPage {
    let limit = usize::try_from(limit).unwrap_or(usize::MAX);
    let has_next_page = rows.len() > limit;
    if has_next_page {
        rows.truncate(limit);
    }

    let next_cursor = if has_next_page {
        rows.last().map(|p| p.id)
    } else {
        None
    };

    CursorPage {
        data: rows,
        has_next_page,
        next_cursor,
    }
}
