//! Parameter object for filtered, sorted listings.

#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::{OffsetPagination, ProductFilter, ProductSortBy};
use crate::Result;

/// A filtered and sorted product listing request.
///
/// Without `page` the whole filtered result set is returned. Without
/// `rows_per_page` the default page size applies.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct ProductQuery {
    /// Price range and brand filters.
    #[serde(flatten)]
    pub filter: ProductFilter,
    /// Sort field and direction.
    #[serde(default)]
    pub sort: ProductSortBy,
    /// 1-based page number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<i64>,
    /// Page size.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rows_per_page: Option<i64>,
}

impl ProductQuery {
    /// Creates a query that lists every product newest first.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the filter.
    #[inline]
    pub fn with_filter(mut self, filter: ProductFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Sets the sort specification.
    #[inline]
    pub fn with_sort(mut self, sort: ProductSortBy) -> Self {
        self.sort = sort;
        self
    }

    /// Selects a page.
    #[inline]
    pub fn with_page(mut self, page: i64, rows_per_page: i64) -> Self {
        self.page = Some(page);
        self.rows_per_page = Some(rows_per_page);
        self
    }

    /// Resolves the window this query selects.
    pub fn pagination(&self) -> Result<OffsetPagination> {
        OffsetPagination::from_page(self.page, self.rows_per_page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ProductSortField, SortOrder};

    #[test]
    fn query_deserializes_flat_filters() {
        let query: ProductQuery = serde_json::from_str(
            r#"{
                "min_price": 100,
                "brand_ids": [2],
                "sort": {"field": "price", "order": "asc"},
                "page": 2,
                "rows_per_page": 10
            }"#,
        )
        .unwrap();

        assert_eq!(query.filter.min_price, Some(100));
        assert_eq!(query.sort.field, ProductSortField::Price);
        assert_eq!(query.sort.order, SortOrder::Asc);

        let pagination = query.pagination().unwrap();
        assert_eq!(pagination.offset, 10);
        assert_eq!(pagination.limit, Some(10));
    }

    #[test]
    fn query_without_page_lists_everything() {
        let pagination = ProductQuery::new().pagination().unwrap();
        assert_eq!(pagination.limit, None);
    }
}
