//! Catalog entities as returned to callers.
//!
//! A [`Product`] is the paginated entity. Its creation timestamp is the
//! ordering key cursors are built from; brand and variations are attached
//! through joins and folded back into the product by the row collapser.

mod product;
mod row;

pub use product::{Brand, BrandId, Product, ProductId, Variation, VariationId};
pub use row::ProductRow;
