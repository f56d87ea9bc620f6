//! Pagination facade.
//!
//! [`RowSource`] is the seam between the engine and a storage executor: it
//! runs the structured query shapes and nothing else. [`Paginate`] is the
//! caller-facing API, implemented for every row source.

mod boundary;
mod collapse;

use std::future::Future;

pub use boundary::{Boundaries, resolve_boundaries};
pub use collapse::{Collapser, collapse_rows};

use crate::model::{Product, ProductRow};
use crate::query::{Conditions, CountQuery, CursorWindow, ExistsQuery, Ordering, SelectQuery};
use crate::types::{
    CursorPage, CursorPagination, OffsetPage, OffsetPagination, ProductFilter, ProductQuery,
    ProductSortBy,
};
use crate::{Result, TRACING_TARGET_PAGINATION};

/// Storage executor for the engine's query shapes.
///
/// Implementations must return joined rows in the order the query asks for,
/// with all rows of one product contiguous. Failures are reported as
/// [`Error::Store`](crate::Error::Store) carrying the original error.
pub trait RowSource: Send {
    /// Runs a window query and returns the flat joined rows.
    fn fetch_rows(
        &mut self,
        query: &SelectQuery,
    ) -> impl Future<Output = Result<Vec<ProductRow>>> + Send;

    /// Counts the products matching a query.
    fn count_rows(&mut self, query: &CountQuery) -> impl Future<Output = Result<i64>> + Send;

    /// Returns whether any product matches a query.
    fn row_exists(&mut self, query: &ExistsQuery) -> impl Future<Output = Result<bool>> + Send;
}

/// Paginated product listings.
///
/// Every call is a self-contained sequence of read queries against one
/// executor; nothing is cached between calls.
pub trait Paginate {
    /// Returns one page of products around a cursor.
    ///
    /// Only `created_at` ordering is accepted, in either direction. The page
    /// carries a `prev` cursor only when products precede it and a `next`
    /// cursor only when products follow it.
    fn paginate_by_cursor(
        &mut self,
        pagination: CursorPagination,
        filter: &ProductFilter,
        sort: ProductSortBy,
    ) -> impl Future<Output = Result<CursorPage<Product>>> + Send;

    /// Returns page `page` of `rows_per_page` products and the total count.
    ///
    /// Without `page` every matching product is returned. Without
    /// `rows_per_page` the default page size applies.
    fn paginate_by_offset(
        &mut self,
        page: Option<i64>,
        rows_per_page: Option<i64>,
        filter: &ProductFilter,
        sort: ProductSortBy,
    ) -> impl Future<Output = Result<OffsetPage<Product>>> + Send;

    /// Returns the products selected by a filtered, sorted listing request.
    fn list_filtered_sorted(
        &mut self,
        query: ProductQuery,
    ) -> impl Future<Output = Result<OffsetPage<Product>>> + Send;
}

impl<S: RowSource> Paginate for S {
    #[tracing::instrument(
        skip_all,
        target = TRACING_TARGET_PAGINATION,
        fields(
            position = pagination.position.as_str(),
            limit = pagination.limit,
            strategy = ?pagination.strategy,
        )
    )]
    async fn paginate_by_cursor(
        &mut self,
        pagination: CursorPagination,
        filter: &ProductFilter,
        sort: ProductSortBy,
    ) -> Result<CursorPage<Product>> {
        let window = CursorWindow::new(pagination, filter, sort)?;
        let limit = window.limit();

        let rows = self.fetch_rows(window.query()).await?;
        let mut items = collapse_rows(rows);

        let overflow = items.len() > limit;
        items.truncate(limit);
        if window.is_reversed() {
            items.reverse();
        }

        let boundaries = resolve_boundaries(self, &window, &items, overflow).await?;
        let cursors = boundaries.cursors(&items);

        tracing::debug!(
            target: TRACING_TARGET_PAGINATION,
            items = items.len(),
            has_prev = cursors.prev.is_some(),
            has_next = cursors.next.is_some(),
            "Fetched cursor page"
        );

        Ok(CursorPage::new(items, cursors))
    }

    #[tracing::instrument(
        skip_all,
        target = TRACING_TARGET_PAGINATION,
        fields(page = ?page, rows_per_page = ?rows_per_page, sort = ?sort)
    )]
    async fn paginate_by_offset(
        &mut self,
        page: Option<i64>,
        rows_per_page: Option<i64>,
        filter: &ProductFilter,
        sort: ProductSortBy,
    ) -> Result<OffsetPage<Product>> {
        let pagination = OffsetPagination::from_page(page, rows_per_page)?;
        offset_page(self, pagination, filter, sort).await
    }

    #[tracing::instrument(
        skip_all,
        target = TRACING_TARGET_PAGINATION,
        fields(page = ?query.page, rows_per_page = ?query.rows_per_page, sort = ?query.sort)
    )]
    async fn list_filtered_sorted(&mut self, query: ProductQuery) -> Result<OffsetPage<Product>> {
        let pagination = query.pagination()?;
        offset_page(self, pagination, &query.filter, query.sort).await
    }
}

/// Counts the filtered products and fetches the window `pagination` selects.
async fn offset_page<S: RowSource>(
    source: &mut S,
    pagination: OffsetPagination,
    filter: &ProductFilter,
    sort: ProductSortBy,
) -> Result<OffsetPage<Product>> {
    let conditions = Conditions::from_filter(filter);

    let total = source
        .count_rows(&CountQuery::new(conditions.without_boundary()))
        .await?;
    if total == 0 {
        tracing::debug!(target: TRACING_TARGET_PAGINATION, "No products match the filter");
        return Ok(OffsetPage::empty());
    }

    let query = SelectQuery::new(conditions, Ordering::from(sort)).with_window(pagination);
    let rows = source.fetch_rows(&query).await?;
    let items = collapse_rows(rows);

    tracing::debug!(
        target: TRACING_TARGET_PAGINATION,
        items = items.len(),
        total,
        "Fetched offset page"
    );

    Ok(OffsetPage::new(items, total))
}
