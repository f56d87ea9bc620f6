//! Pagination types.
//!
//! Cursor pagination is the primary mode: it stays stable while rows are
//! inserted or deleted between requests. Offset pagination supports random
//! page access and reports the total number of matches.

mod cursor;
mod offset;

pub use cursor::{
    BoundaryStrategy, Cursor, CursorError, CursorPage, CursorPagination, CursorPosition,
    CursorRequest, Cursors, MAX_LIMIT,
};
pub use offset::{DEFAULT_ROWS_PER_PAGE, MAX_ROWS_PER_PAGE, OffsetPage, OffsetPagination};
