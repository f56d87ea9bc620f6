//! Variation and product-variation link models.

use catalog_core::model::Variation;
use diesel::prelude::*;

use crate::schema::{product_variations, variations};

/// Variation kind as stored in the `variations` table.
#[derive(Debug, Clone, PartialEq, Eq, Queryable, Selectable)]
#[diesel(table_name = variations)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct VariationRecord {
    /// Unique variation identifier.
    pub id: i64,
    /// Display name (XS, L, red...).
    pub name: String,
}

/// Data for creating a new variation kind.
#[derive(Debug, Default, Clone, Insertable)]
#[diesel(table_name = variations)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewVariation {
    /// Display name.
    pub name: String,
}

/// Stock of one variation of one product.
#[derive(Debug, Clone, PartialEq, Eq, Queryable, Selectable)]
#[diesel(table_name = product_variations)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ProductVariationRecord {
    /// Unique link identifier. Orders variations within a product.
    pub id: i64,
    /// Units in stock.
    pub quantity: i32,
    /// Owning product.
    pub product_id: i64,
    /// Linked variation kind.
    pub variation_id: i64,
}

/// Data for linking a variation to a product.
#[derive(Debug, Default, Clone, Insertable)]
#[diesel(table_name = product_variations)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewProductVariation {
    /// Units in stock.
    pub quantity: i32,
    /// Owning product.
    pub product_id: i64,
    /// Linked variation kind.
    pub variation_id: i64,
}

impl ProductVariationRecord {
    /// Combines the link with its variation kind.
    pub fn into_variation(self, variation: VariationRecord) -> Variation {
        Variation::new(variation.id, variation.name, self.quantity)
    }
}
