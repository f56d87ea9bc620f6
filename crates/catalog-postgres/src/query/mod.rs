//! Database query repositories for the catalog.
//!
//! [`PgConn`] implements [`RowSource`], which makes the whole [`Paginate`]
//! facade available on any pooled connection. [`PgConnection`] implements the
//! entity repositories below for single-entity reads and writes, so they are
//! usable inside transactions as well.
//!
//! [`PgConn`]: crate::PgConn
//! [`PgConnection`]: crate::PgConnection
//! [`RowSource`]: catalog_core::RowSource
//! [`Paginate`]: catalog_core::Paginate

pub mod brand;
mod executor;
pub mod product;

pub use brand::BrandRepository;
pub use executor::bind_statement;
pub use product::{PRODUCTS_CREATED_AT_KEY, ProductRepository};
