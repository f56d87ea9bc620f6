//! Row shapes of the raw pagination queries.
//!
//! Column names match [`PRODUCT_ROW_COLUMNS`] and the aliases used by the
//! count and existence queries.
//!
//! [`PRODUCT_ROW_COLUMNS`]: catalog_core::query::PRODUCT_ROW_COLUMNS

use catalog_core::model::{Brand, ProductRow, Variation};
use diesel::sql_types::{BigInt, Bool, Integer, Nullable, Text, Timestamptz};
use jiff_diesel::Timestamp;

/// One row of the product/brand/variation join.
#[derive(Debug, Clone, diesel::QueryableByName)]
pub struct JoinedProductRow {
    #[diesel(sql_type = BigInt)]
    pub id: i64,
    #[diesel(sql_type = Timestamptz)]
    pub created_at: Timestamp,
    #[diesel(sql_type = Text)]
    pub name: String,
    #[diesel(sql_type = Integer)]
    pub price: i32,
    #[diesel(sql_type = Nullable<BigInt>)]
    pub brand_id: Option<i64>,
    #[diesel(sql_type = Nullable<Text>)]
    pub brand_name: Option<String>,
    #[diesel(sql_type = Nullable<BigInt>)]
    pub variation_id: Option<i64>,
    #[diesel(sql_type = Nullable<Text>)]
    pub variation_name: Option<String>,
    #[diesel(sql_type = Nullable<Integer>)]
    pub variation_quantity: Option<i32>,
}

impl From<JoinedProductRow> for ProductRow {
    fn from(row: JoinedProductRow) -> Self {
        let brand = row
            .brand_id
            .map(|id| Brand::new(id, row.brand_name.unwrap_or_default()));
        let variation = row.variation_id.map(|id| {
            Variation::new(
                id,
                row.variation_name.unwrap_or_default(),
                row.variation_quantity.unwrap_or_default(),
            )
        });

        ProductRow {
            id: row.id.into(),
            created_at: jiff::Timestamp::from(row.created_at),
            name: row.name,
            price: row.price,
            brand,
            variation,
        }
    }
}

/// Result of a count query.
#[derive(Debug, Clone, Copy, diesel::QueryableByName)]
pub struct CountRow {
    #[diesel(sql_type = BigInt)]
    pub count: i64,
}

/// Result of an existence query.
#[derive(Debug, Clone, Copy, diesel::QueryableByName)]
pub struct ExistsRow {
    #[diesel(sql_type = Bool)]
    pub found: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn joined(brand: Option<i64>, variation: Option<i64>) -> JoinedProductRow {
        let created_at: jiff::Timestamp = "2022-05-23T13:29:16Z".parse().unwrap();
        JoinedProductRow {
            id: 1,
            created_at: created_at.into(),
            name: "Shirt".into(),
            price: 1000,
            brand_id: brand,
            brand_name: brand.map(|_| "Nike".into()),
            variation_id: variation,
            variation_name: variation.map(|_| "M".into()),
            variation_quantity: variation.map(|_| 4),
        }
    }

    #[test]
    fn null_relations_become_none() {
        let row = ProductRow::from(joined(None, None));
        assert!(row.brand.is_none());
        assert!(row.variation.is_none());
        assert_eq!(row.price, 1000);
    }

    #[test]
    fn present_relations_are_kept() {
        let row = ProductRow::from(joined(Some(1), Some(7)));
        assert_eq!(row.brand, Some(Brand::new(1, "Nike")));
        assert_eq!(row.variation, Some(Variation::new(7, "M", 4)));
    }
}
