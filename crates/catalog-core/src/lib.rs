#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

// Tracing target constants for consistent logging.

/// Tracing target for pagination operations.
///
/// Use this target for logging window construction, boundary resolution and page results.
pub const TRACING_TARGET_PAGINATION: &str = "catalog_core::pagination";

/// Tracing target for the in-memory executor.
pub const TRACING_TARGET_MEMORY: &str = "catalog_core::memory";

mod error;
pub mod memory;
pub mod model;
pub mod paginate;
pub mod prelude;
pub mod query;
pub mod types;

pub use error::{BoxError, Error, ErrorKind, Result};
pub use paginate::{Paginate, RowSource};
