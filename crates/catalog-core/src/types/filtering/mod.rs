//! Filtering options for product queries.

mod products;

pub use products::ProductFilter;
