//! Offset-based pagination.
//!
//! Offset pagination is suitable when random page access is required or a
//! total count must be shown. Under concurrent writes ahead of the window it
//! may repeat or skip rows; prefer cursor pagination for iteration.

#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Rows per page when the request does not say.
pub const DEFAULT_ROWS_PER_PAGE: i64 = 25;

/// Maximum number of rows per page. Larger sizes are rejected.
pub const MAX_ROWS_PER_PAGE: i64 = 1000;

/// Offset-based pagination parameters.
///
/// A `limit` of `None` selects every matching row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct OffsetPagination {
    /// Maximum number of records to return.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<i64>,
    /// Number of records to skip.
    #[serde(default)]
    pub offset: i64,
}

impl OffsetPagination {
    /// Selects every matching row.
    #[inline]
    pub fn all() -> Self {
        Self::default()
    }

    /// Creates pagination from an optional 1-based page number and page size.
    ///
    /// Without a page the whole result set is returned. Without a page size
    /// [`DEFAULT_ROWS_PER_PAGE`] applies. Non-positive values and page sizes
    /// above [`MAX_ROWS_PER_PAGE`] are rejected.
    pub fn from_page(page: Option<i64>, rows_per_page: Option<i64>) -> Result<Self> {
        let rows_per_page = rows_per_page.unwrap_or(DEFAULT_ROWS_PER_PAGE);
        if rows_per_page <= 0 {
            return Err(Error::invalid_argument(format!(
                "rows per page must be positive, got {rows_per_page}"
            )));
        }
        if rows_per_page > MAX_ROWS_PER_PAGE {
            return Err(Error::invalid_argument(format!(
                "rows per page must be at most {MAX_ROWS_PER_PAGE}, got {rows_per_page}"
            )));
        }

        let Some(page) = page else {
            return Ok(Self::all());
        };
        if page <= 0 {
            return Err(Error::invalid_argument(format!(
                "page must be positive, got {page}"
            )));
        }

        Ok(Self {
            limit: Some(rows_per_page),
            offset: (page - 1).saturating_mul(rows_per_page),
        })
    }

    /// Gets the current page number (1-based).
    pub fn page_number(&self) -> i64 {
        match self.limit {
            Some(limit) => (self.offset / limit) + 1,
            None => 1,
        }
    }

    /// Returns whether this selects a bounded window.
    #[inline]
    pub fn is_bounded(&self) -> bool {
        self.limit.is_some()
    }
}

/// Result of an offset-paginated query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct OffsetPage<T> {
    /// The items in this page.
    pub items: Vec<T>,
    /// Number of items matching the filters, ignoring the window.
    pub total: i64,
}

impl<T> OffsetPage<T> {
    /// Creates a new offset page.
    pub fn new(items: Vec<T>, total: i64) -> Self {
        Self { items, total }
    }

    /// Creates an empty offset page.
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            total: 0,
        }
    }

    /// Maps the items to a different type.
    pub fn map<U, F>(self, f: F) -> OffsetPage<U>
    where
        F: FnMut(T) -> U,
    {
        OffsetPage {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
        }
    }

    /// Returns whether there are more pages after this one.
    pub fn has_more(&self, pagination: &OffsetPagination) -> bool {
        (pagination.offset + self.items.len() as i64) < self.total
    }

    /// Returns the total number of pages.
    pub fn total_pages(&self, pagination: &OffsetPagination) -> i64 {
        match pagination.limit {
            Some(limit) => (self.total + limit - 1) / limit,
            None => i64::from(self.total > 0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pagination_from_page() {
        let pagination = OffsetPagination::from_page(Some(1), Some(20)).unwrap();
        assert_eq!(pagination.limit, Some(20));
        assert_eq!(pagination.offset, 0);

        let pagination = OffsetPagination::from_page(Some(3), Some(10)).unwrap();
        assert_eq!(pagination.limit, Some(10));
        assert_eq!(pagination.offset, 20);

        let pagination = OffsetPagination::from_page(Some(2), None).unwrap();
        assert_eq!(pagination.limit, Some(DEFAULT_ROWS_PER_PAGE));
        assert_eq!(pagination.offset, DEFAULT_ROWS_PER_PAGE);
    }

    #[test]
    fn pagination_without_page_selects_all() {
        let pagination = OffsetPagination::from_page(None, Some(10)).unwrap();
        assert_eq!(pagination, OffsetPagination::all());
        assert!(!pagination.is_bounded());
    }

    #[test]
    fn pagination_rejects_non_positive_values() {
        assert!(
            OffsetPagination::from_page(Some(0), Some(10))
                .unwrap_err()
                .is_invalid_argument()
        );
        assert!(
            OffsetPagination::from_page(Some(1), Some(0))
                .unwrap_err()
                .is_invalid_argument()
        );
        assert!(
            OffsetPagination::from_page(None, Some(-1))
                .unwrap_err()
                .is_invalid_argument()
        );
    }

    #[test]
    fn pagination_bounds_checking() {
        let pagination = OffsetPagination::from_page(Some(1), Some(MAX_ROWS_PER_PAGE)).unwrap();
        assert_eq!(pagination.limit, Some(MAX_ROWS_PER_PAGE));

        let error = OffsetPagination::from_page(Some(1), Some(MAX_ROWS_PER_PAGE + 1)).unwrap_err();
        assert!(error.is_invalid_argument());
    }

    #[test]
    fn pagination_page_number() {
        let pagination = OffsetPagination::from_page(Some(4), Some(15)).unwrap();
        assert_eq!(pagination.page_number(), 4);
        assert_eq!(OffsetPagination::all().page_number(), 1);
    }

    #[test]
    fn offset_page_has_more() {
        let pagination = OffsetPagination::from_page(Some(1), Some(10)).unwrap();
        let page = OffsetPage::new((1..=10).collect::<Vec<_>>(), 25);
        assert!(page.has_more(&pagination));

        let page = OffsetPage::new(vec![1, 2, 3, 4, 5], 5);
        assert!(!page.has_more(&pagination));
    }

    #[test]
    fn offset_page_total_pages() {
        let pagination = OffsetPagination::from_page(Some(1), Some(10)).unwrap();

        let page: OffsetPage<i32> = OffsetPage::new(vec![], 25);
        assert_eq!(page.total_pages(&pagination), 3);

        let page: OffsetPage<i32> = OffsetPage::new(vec![], 30);
        assert_eq!(page.total_pages(&pagination), 3);

        let page: OffsetPage<i32> = OffsetPage::new(vec![], 31);
        assert_eq!(page.total_pages(&pagination), 4);

        let page: OffsetPage<i32> = OffsetPage::empty();
        assert_eq!(page.total_pages(&OffsetPagination::all()), 0);
    }
}
