//! Prelude module for catalog-core.
//!
//! This module re-exports the most commonly used types and traits, making it
//! easy to import everything you need with a single `use` statement.
//!
//! # Example
//!
//! ```rust
//! use catalog_core::prelude::*;
//!
//! # async fn example() -> Result<()> {
//! let mut store = MemoryStore::new();
//! let page = store
//!     .paginate_by_cursor(
//!         CursorPagination::first(20)?,
//!         &ProductFilter::new(),
//!         ProductSortBy::default(),
//!     )
//!     .await?;
//! assert!(page.items.is_empty());
//! # Ok(())
//! # }
//! ```

// Facade and executor traits
pub use crate::paginate::{Paginate, RowSource};

// In-memory executor
pub use crate::memory::MemoryStore;

// Entities
pub use crate::model::{Brand, BrandId, Product, ProductId, Variation, VariationId};

// Request and response types
pub use crate::types::{
    BoundaryStrategy, Cursor, CursorPage, CursorPagination, CursorRequest, Cursors, OffsetPage,
    OffsetPagination, ProductFilter, ProductQuery, ProductSortBy, ProductSortField, SortBy,
    SortOrder,
};

// Error types
pub use crate::{Error, ErrorKind, Result};
