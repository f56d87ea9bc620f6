//! Request and response types: pagination, filtering and sorting.

mod filtering;
mod pagination;
mod product_query;
mod sorting;

pub use filtering::ProductFilter;
pub use pagination::{
    BoundaryStrategy, Cursor, CursorError, CursorPage, CursorPagination, CursorPosition,
    CursorRequest, Cursors, DEFAULT_ROWS_PER_PAGE, MAX_LIMIT, MAX_ROWS_PER_PAGE, OffsetPage,
    OffsetPagination,
};
pub use product_query::ProductQuery;
pub use sorting::{ProductSortBy, ProductSortField, SortBy, SortOrder};
