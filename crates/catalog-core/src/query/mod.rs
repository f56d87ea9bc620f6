//! Structured query shapes.
//!
//! The pagination facade never writes SQL at its call sites. It composes
//! [`Conditions`] from the request filter and an optional boundary, wraps
//! them in a [`SelectQuery`], [`CountQuery`] or [`ExistsQuery`], and hands
//! the shape to a storage executor. SQL executors call `render` to get the
//! text with positional parameters; the in-memory executor evaluates the
//! same predicates directly.

mod params;
mod predicate;
mod window;

pub use params::{Params, SqlValue, Statement};
pub use predicate::{Comparison, Conditions, Predicate};
pub use window::{
    CountQuery, CursorWindow, ExistsQuery, Ordering, PRODUCT_ROW_COLUMNS, SelectQuery,
};
