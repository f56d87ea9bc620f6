//! Database models for the catalog tables.
//!
//! This module contains Diesel model definitions for all catalog tables,
//! including structs for querying and inserting records, and the row shapes
//! of the raw pagination queries.

mod brand;
mod joined;
mod product;
mod variation;

pub use brand::{BrandRecord, NewBrand};
pub use joined::{CountRow, ExistsRow, JoinedProductRow};
pub use product::{NewProduct, ProductRecord};
pub use variation::{NewProductVariation, NewVariation, ProductVariationRecord, VariationRecord};
