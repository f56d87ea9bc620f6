//! Window, count and existence query shapes.

use super::{Comparison, Conditions, Params, Statement};
use crate::model::Product;
use crate::types::{
    CursorPagination, CursorPosition, OffsetPagination, ProductFilter, ProductSortBy,
    ProductSortField, SortOrder,
};
use crate::{Error, Result};

/// Columns of a joined product row, in the order executors decode them.
pub const PRODUCT_ROW_COLUMNS: &str = "p.id, p.created_at, p.name, p.price, \
    b.id AS brand_id, b.name AS brand_name, \
    v.id AS variation_id, v.name AS variation_name, pv.quantity AS variation_quantity";

/// Total ordering of products.
///
/// The sort field is followed by `created_at` (unless it already is the
/// field) and then `id`, all in the same direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Ordering {
    /// Primary sort field.
    pub field: ProductSortField,
    /// Direction applied to every key.
    pub order: SortOrder,
}

impl Ordering {
    /// Creates a new ordering.
    #[inline]
    pub fn new(field: ProductSortField, order: SortOrder) -> Self {
        Self { field, order }
    }

    /// Returns the same keys in the opposite direction.
    #[inline]
    pub fn reverse(self) -> Self {
        Self {
            field: self.field,
            order: self.order.reverse(),
        }
    }

    /// Renders the `ORDER BY` key list.
    pub fn to_sql(&self) -> String {
        let direction = self.order.as_sql();
        let mut keys = vec![format!("{} {direction}", self.field.column())];
        if self.field != ProductSortField::CreatedAt {
            keys.push(format!("p.created_at {direction}"));
        }
        keys.push(format!("p.id {direction}"));
        keys.join(", ")
    }

    /// Compares two products under this ordering.
    pub fn compare(&self, a: &Product, b: &Product) -> std::cmp::Ordering {
        let primary = match self.field {
            ProductSortField::CreatedAt => a.created_at.cmp(&b.created_at),
            ProductSortField::Price => a
                .price
                .cmp(&b.price)
                .then_with(|| a.created_at.cmp(&b.created_at)),
        };
        self.order.apply(primary.then_with(|| a.id.cmp(&b.id)))
    }
}

impl From<ProductSortBy> for Ordering {
    fn from(sort: ProductSortBy) -> Self {
        Self::new(sort.field, sort.order)
    }
}

/// Bounded, ordered selection of products joined with brand and variations.
///
/// The limit and offset apply to products, not joined rows: they bound an
/// inner selection on the products table, and the joins fan out afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectQuery {
    /// Filters and boundary.
    pub conditions: Conditions,
    /// Order of the products and of the joined rows.
    pub ordering: Ordering,
    /// Maximum number of products, or all of them.
    pub limit: Option<i64>,
    /// Number of products to skip.
    pub offset: i64,
}

impl SelectQuery {
    /// Selects every product matching `conditions`.
    pub fn new(conditions: Conditions, ordering: Ordering) -> Self {
        Self {
            conditions,
            ordering,
            limit: None,
            offset: 0,
        }
    }

    /// Bounds the number of products.
    #[inline]
    pub fn with_limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Applies an offset window.
    #[inline]
    pub fn with_window(mut self, pagination: OffsetPagination) -> Self {
        self.limit = pagination.limit;
        self.offset = pagination.offset;
        self
    }

    /// Renders the query with positional parameters.
    pub fn render(&self) -> Statement {
        let mut params = Params::new();
        let order_by = self.ordering.to_sql();

        let mut inner = format!(
            "SELECT * FROM products AS p{} ORDER BY {order_by}",
            self.conditions.render_where(&mut params)
        );
        if let Some(limit) = self.limit {
            inner.push_str(&format!(" LIMIT {}", params.push(limit)));
        }
        if self.offset > 0 {
            inner.push_str(&format!(" OFFSET {}", params.push(self.offset)));
        }

        let sql = format!(
            "SELECT {PRODUCT_ROW_COLUMNS} FROM ({inner}) AS p \
             LEFT JOIN brands AS b ON b.id = p.brand_id \
             LEFT JOIN product_variations AS pv ON pv.product_id = p.id \
             LEFT JOIN variations AS v ON v.id = pv.variation_id \
             ORDER BY {order_by}, pv.id ASC"
        );

        Statement { sql, params }
    }
}

/// Number of products matching a set of conditions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountQuery {
    /// Filters to count under.
    pub conditions: Conditions,
}

impl CountQuery {
    /// Creates a new count query.
    #[inline]
    pub fn new(conditions: Conditions) -> Self {
        Self { conditions }
    }

    /// Renders the query with positional parameters.
    pub fn render(&self) -> Statement {
        let mut params = Params::new();
        let sql = format!(
            "SELECT COUNT(*) AS count FROM products AS p{}",
            self.conditions.render_where(&mut params)
        );
        Statement { sql, params }
    }
}

/// Whether any product matches a set of conditions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExistsQuery {
    /// Filters and boundary to probe.
    pub conditions: Conditions,
}

impl ExistsQuery {
    /// Creates a new existence query.
    #[inline]
    pub fn new(conditions: Conditions) -> Self {
        Self { conditions }
    }

    /// Renders the query with positional parameters.
    pub fn render(&self) -> Statement {
        let mut params = Params::new();
        let sql = format!(
            "SELECT EXISTS (SELECT 1 FROM products AS p{}) AS found",
            self.conditions.render_where(&mut params)
        );
        Statement { sql, params }
    }
}

/// The window of a cursor-paginated request and the probes around it.
///
/// A `prev` window is fetched in reverse order so the limit keeps the rows
/// closest to the cursor; the facade flips the collapsed slice back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CursorWindow {
    query: SelectQuery,
    filters: Conditions,
    pagination: CursorPagination,
    order: SortOrder,
}

impl CursorWindow {
    /// Builds the window for a request.
    ///
    /// Cursors encode creation times only, so any other sort field is
    /// rejected.
    pub fn new(
        pagination: CursorPagination,
        filter: &ProductFilter,
        sort: ProductSortBy,
    ) -> Result<Self> {
        if sort.field != ProductSortField::CreatedAt {
            return Err(Error::invalid_argument(format!(
                "cursor pagination cannot sort by `{}`, only by `{}`",
                sort.field,
                ProductSortField::CreatedAt
            )));
        }

        if pagination.limit <= 0 {
            return Err(Error::invalid_argument(format!(
                "limit must be positive, got {}",
                pagination.limit
            )));
        }

        let order = sort.order;
        let filters = Conditions::from_filter(filter);
        let ordering = Ordering::new(ProductSortField::CreatedAt, order);

        let (conditions, ordering) = match pagination.position {
            CursorPosition::First => (filters.clone(), ordering),
            CursorPosition::Next(cursor) => (
                filters
                    .clone()
                    .with_boundary(Comparison::after(order), cursor.timestamp()),
                ordering,
            ),
            CursorPosition::Prev(cursor) => (
                filters
                    .clone()
                    .with_boundary(Comparison::before(order), cursor.timestamp()),
                ordering.reverse(),
            ),
        };

        let query = SelectQuery::new(conditions, ordering).with_limit(pagination.fetch_limit());

        Ok(Self {
            query,
            filters,
            pagination,
            order,
        })
    }

    /// Returns the window query.
    #[inline]
    pub fn query(&self) -> &SelectQuery {
        &self.query
    }

    /// Returns the validated request.
    #[inline]
    pub fn pagination(&self) -> &CursorPagination {
        &self.pagination
    }

    /// Returns the number of products a page may hold.
    #[inline]
    pub fn limit(&self) -> usize {
        usize::try_from(self.pagination.limit).unwrap_or(usize::MAX)
    }

    /// Returns the order pages are presented in.
    #[inline]
    pub fn order(&self) -> SortOrder {
        self.order
    }

    /// Returns whether the window is fetched against the presented order.
    #[inline]
    pub fn is_reversed(&self) -> bool {
        matches!(self.pagination.position, CursorPosition::Prev(_))
    }

    /// Probes for any product preceding `first` in the presented order.
    pub fn probe_before(&self, first: &Product) -> ExistsQuery {
        ExistsQuery::new(
            self.filters
                .clone()
                .with_boundary(Comparison::before(self.order), first.created_at),
        )
    }

    /// Probes for any product following `last` in the presented order.
    pub fn probe_after(&self, last: &Product) -> ExistsQuery {
        ExistsQuery::new(
            self.filters
                .clone()
                .with_boundary(Comparison::after(self.order), last.created_at),
        )
    }
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;

    use super::*;
    use crate::query::SqlValue;
    use crate::types::{BoundaryStrategy, Cursor};

    fn ts(s: &str) -> Timestamp {
        s.parse().unwrap()
    }

    #[test]
    fn ordering_appends_tie_breakers() {
        let ordering = Ordering::new(ProductSortField::Price, SortOrder::Asc);
        assert_eq!(ordering.to_sql(), "p.price ASC, p.created_at ASC, p.id ASC");

        let ordering = Ordering::default();
        assert_eq!(ordering.to_sql(), "p.created_at DESC, p.id DESC");
        assert_eq!(ordering.reverse().to_sql(), "p.created_at ASC, p.id ASC");
    }

    #[test]
    fn ordering_compare_is_deterministic() {
        let created_at = ts("2022-05-25T13:29:16Z");
        let a = Product::new(1, created_at, "A", 500);
        let b = Product::new(2, created_at, "B", 500);

        let asc = Ordering::new(ProductSortField::Price, SortOrder::Asc);
        assert_eq!(asc.compare(&a, &b), std::cmp::Ordering::Less);
        assert_eq!(asc.reverse().compare(&a, &b), std::cmp::Ordering::Greater);
    }

    #[test]
    fn select_query_renders_window() {
        let conditions = Conditions::from_filter(&ProductFilter::new().with_max_price(900));
        let query = SelectQuery::new(conditions, Ordering::default())
            .with_window(OffsetPagination::from_page(Some(2), Some(10)).unwrap());

        let statement = query.render();
        assert_eq!(
            statement.sql,
            "SELECT p.id, p.created_at, p.name, p.price, \
             b.id AS brand_id, b.name AS brand_name, \
             v.id AS variation_id, v.name AS variation_name, pv.quantity AS variation_quantity \
             FROM (SELECT * FROM products AS p WHERE p.price <= $1 \
             ORDER BY p.created_at DESC, p.id DESC LIMIT $2 OFFSET $3) AS p \
             LEFT JOIN brands AS b ON b.id = p.brand_id \
             LEFT JOIN product_variations AS pv ON pv.product_id = p.id \
             LEFT JOIN variations AS v ON v.id = pv.variation_id \
             ORDER BY p.created_at DESC, p.id DESC, pv.id ASC"
        );
        assert_eq!(
            statement.values(),
            &[
                SqlValue::Integer(900),
                SqlValue::BigInt(10),
                SqlValue::BigInt(10)
            ]
        );
        assert_eq!(query.render(), statement);
    }

    #[test]
    fn count_and_exists_render() {
        let conditions = Conditions::from_filter(&ProductFilter::new().with_brands([7]));
        assert_eq!(
            CountQuery::new(conditions.clone()).render().sql,
            "SELECT COUNT(*) AS count FROM products AS p WHERE p.brand_id IN ($1)"
        );
        assert_eq!(
            ExistsQuery::new(conditions.with_boundary(Comparison::Greater, ts("2022-05-25T00:00:00Z")))
                .render()
                .sql,
            "SELECT EXISTS (SELECT 1 FROM products AS p WHERE p.brand_id IN ($1) AND p.created_at > $2) AS found"
        );
    }

    #[test]
    fn cursor_window_rejects_other_sort_fields() {
        let pagination = CursorPagination::first(5).unwrap();
        let error = CursorWindow::new(
            pagination,
            &ProductFilter::new(),
            ProductSortBy::desc(ProductSortField::Price),
        )
        .unwrap_err();
        assert!(error.is_invalid_argument());
    }

    #[test]
    fn cursor_window_next_uses_strict_boundary() {
        let cursor = Cursor::new(ts("2022-05-26T13:29:16Z"));
        let pagination = CursorPagination::next(3, cursor).unwrap();
        let window =
            CursorWindow::new(pagination, &ProductFilter::new(), ProductSortBy::default()).unwrap();

        assert!(!window.is_reversed());
        let query = window.query();
        assert_eq!(query.limit, Some(4));
        assert_eq!(
            query.conditions.boundary(),
            Some(&crate::query::Predicate::CreatedAt(
                Comparison::Less,
                cursor.timestamp()
            ))
        );
        assert_eq!(query.ordering.order, SortOrder::Desc);
    }

    #[test]
    fn cursor_window_prev_fetches_reversed() {
        let cursor = Cursor::new(ts("2022-05-26T13:29:16Z"));
        let pagination = CursorPagination::prev(3, cursor)
            .unwrap()
            .with_strategy(BoundaryStrategy::Probe);
        let window =
            CursorWindow::new(pagination, &ProductFilter::new(), ProductSortBy::default()).unwrap();

        assert!(window.is_reversed());
        let query = window.query();
        assert_eq!(query.limit, Some(3));
        assert_eq!(query.ordering.order, SortOrder::Asc);
        assert!(query.render().sql.contains("p.created_at > $1"));
    }

    #[test]
    fn probes_exclude_the_edge_row() {
        let pagination = CursorPagination::first(3).unwrap();
        let window =
            CursorWindow::new(pagination, &ProductFilter::new(), ProductSortBy::default()).unwrap();
        let edge = Product::new(1, ts("2022-05-26T13:29:16Z"), "Polo", 1200);

        let after = window.probe_after(&edge);
        assert!(after.render().sql.ends_with("WHERE p.created_at < $1) AS found"));
        let before = window.probe_before(&edge);
        assert!(before.render().sql.ends_with("WHERE p.created_at > $1) AS found"));
    }
}
