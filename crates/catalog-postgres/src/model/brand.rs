//! Brand model for PostgreSQL database operations.

use catalog_core::model::Brand;
use diesel::prelude::*;

use crate::schema::brands;

/// Brand row as stored in the `brands` table.
#[derive(Debug, Clone, PartialEq, Eq, Queryable, Selectable)]
#[diesel(table_name = brands)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct BrandRecord {
    /// Unique brand identifier.
    pub id: i64,
    /// Display name.
    pub name: String,
}

/// Data for creating a new brand.
#[derive(Debug, Default, Clone, Insertable)]
#[diesel(table_name = brands)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewBrand {
    /// Display name.
    pub name: String,
}

impl NewBrand {
    /// Creates a new brand insert.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl From<BrandRecord> for Brand {
    fn from(record: BrandRecord) -> Self {
        Brand::new(record.id, record.name)
    }
}
