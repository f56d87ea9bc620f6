//! Prelude module for catalog-postgres.
//!
//! Re-exports the client, the repository traits and the pagination facade so
//! a single `use` brings everything needed to serve catalog listings.
//!
//! # Example
//!
//! ```rust,no_run
//! use catalog_postgres::prelude::*;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = PgConfig::new("postgresql://localhost/catalog").build()?;
//! client.run_pending_migrations().await?;
//!
//! let mut conn = client.get_connection().await?;
//! let page = conn
//!     .paginate_by_cursor(
//!         CursorPagination::first(20)?,
//!         &ProductFilter::new(),
//!         ProductSortBy::default(),
//!     )
//!     .await?;
//!
//! if let Some(next) = page.cursors.next {
//!     let following = conn
//!         .paginate_by_cursor(
//!             CursorPagination::next(20, next)?,
//!             &ProductFilter::new(),
//!             ProductSortBy::default(),
//!         )
//!         .await?;
//!     println!("{} more products", following.items.len());
//! }
//! # Ok(())
//! # }
//! ```

// Client and configuration
pub use crate::{
    PgClient, PgClientMigrationExt, PgConfig, PgConn, PgConnection, PgError, PgResult,
};

// Repositories
pub use crate::model::{NewBrand, NewProduct};
pub use crate::query::{BrandRepository, ProductRepository};

// Pagination facade
pub use catalog_core::prelude::*;
