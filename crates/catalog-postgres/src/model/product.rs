//! Product model for PostgreSQL database operations.
//!
//! ## Models
//!
//! - [`ProductRecord`] - A row of the `products` table without its relations
//! - [`NewProduct`] - Data structure for creating new products

use catalog_core::model::{BrandId, Product};
use diesel::prelude::*;
use jiff_diesel::Timestamp;

use crate::schema::products;

/// Product row as stored in the `products` table.
///
/// Brand and variations live in their own tables; see
/// [`ProductRepository::find_product_by_id`] for the joined entity.
///
/// [`ProductRepository::find_product_by_id`]: crate::query::ProductRepository::find_product_by_id
#[derive(Debug, Clone, PartialEq, Queryable, Selectable)]
#[diesel(table_name = products)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ProductRecord {
    /// Unique product identifier.
    pub id: i64,
    /// Timestamp when the product was created. Cursors encode this value.
    pub created_at: Timestamp,
    /// Display name.
    pub name: String,
    /// Price in cents.
    pub price: i32,
    /// Referenced brand, if any.
    pub brand_id: Option<i64>,
}

/// Data for creating a new product.
#[derive(Debug, Default, Clone, Insertable)]
#[diesel(table_name = products)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewProduct {
    /// Creation time. `None` lets the database default to `now()`.
    pub created_at: Option<Timestamp>,
    /// Display name.
    pub name: String,
    /// Price in cents.
    pub price: i32,
    /// Referenced brand, if any.
    pub brand_id: Option<i64>,
}

impl NewProduct {
    /// Creates a new product insert stamped by the database.
    pub fn new(name: impl Into<String>, price: i32) -> Self {
        Self {
            name: name.into(),
            price,
            ..Default::default()
        }
    }

    /// Sets an explicit creation time.
    pub fn with_created_at(mut self, created_at: jiff::Timestamp) -> Self {
        self.created_at = Some(created_at.into());
        self
    }

    /// References a brand.
    pub fn with_brand(mut self, brand_id: impl Into<BrandId>) -> Self {
        self.brand_id = Some(brand_id.into().0);
        self
    }
}

impl From<&Product> for NewProduct {
    fn from(product: &Product) -> Self {
        Self {
            created_at: Some(product.created_at.into()),
            name: product.name.clone(),
            price: product.price,
            brand_id: product.brand_id().map(|id| id.0),
        }
    }
}

impl From<ProductRecord> for Product {
    fn from(record: ProductRecord) -> Self {
        Product::new(
            record.id,
            jiff::Timestamp::from(record.created_at),
            record.name,
            record.price,
        )
    }
}

#[cfg(test)]
mod tests {
    use catalog_core::model::Brand;

    use super::*;

    #[test]
    fn new_product_defaults_to_database_time() {
        let product = NewProduct::new("Hat", 800).with_brand(3);
        assert!(product.created_at.is_none());
        assert_eq!(product.brand_id, Some(3));
    }

    #[test]
    fn new_product_from_entity() {
        let created_at: jiff::Timestamp = "2022-05-29T13:29:16Z".parse().unwrap();
        let product = Product::new(0, created_at, "Hat", 800).with_brand(Brand::new(2, "Zara"));

        let insert = NewProduct::from(&product);
        assert_eq!(insert.created_at.map(jiff::Timestamp::from), Some(created_at));
        assert_eq!(insert.brand_id, Some(2));
        assert_eq!(insert.price, 800);
    }
}
