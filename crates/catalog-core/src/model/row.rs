//! Flat joined rows produced by storage executors.

use jiff::Timestamp;

use super::{Brand, Product, ProductId, Variation};

/// One row of the product/brand/variation join.
///
/// A product with `n` variations yields `n` rows; a product without any
/// yields a single row with `variation` set to `None`. Rows of the same
/// product are always contiguous.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductRow {
    /// Product id; rows sharing it collapse into one product.
    pub id: ProductId,
    /// Ordering key of the product.
    pub created_at: Timestamp,
    /// Product name.
    pub name: String,
    /// Price in cents.
    pub price: i32,
    /// Brand, repeated on every row of the product.
    pub brand: Option<Brand>,
    /// The single variation this row carries, if any.
    pub variation: Option<Variation>,
}

impl ProductRow {
    /// Expands a product into its joined rows.
    pub fn fan_out(product: &Product) -> Vec<ProductRow> {
        let row = |variation: Option<Variation>| ProductRow {
            id: product.id,
            created_at: product.created_at,
            name: product.name.clone(),
            price: product.price,
            brand: product.brand.clone(),
            variation,
        };

        if product.variations.is_empty() {
            return vec![row(None)];
        }

        product
            .variations
            .iter()
            .cloned()
            .map(|variation| row(Some(variation)))
            .collect()
    }

    /// Returns the product fields of this row without any variation.
    pub fn to_product(&self) -> Product {
        Product {
            id: self.id,
            created_at: self.created_at,
            name: self.name.clone(),
            price: self.price,
            brand: self.brand.clone(),
            variations: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fan_out_without_variations() {
        let created_at: Timestamp = "2022-05-23T13:29:16Z".parse().unwrap();
        let product = Product::new(1, created_at, "Shirt", 1000);

        let rows = ProductRow::fan_out(&product);
        assert_eq!(rows.len(), 1);
        assert!(rows[0].variation.is_none());
    }

    #[test]
    fn fan_out_one_row_per_variation() {
        let created_at: Timestamp = "2022-05-23T13:29:16Z".parse().unwrap();
        let product = Product::new(1, created_at, "Shirt", 1000)
            .with_variation(Variation::new(1, "S", 3))
            .with_variation(Variation::new(2, "M", 5));

        let rows = ProductRow::fan_out(&product);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].variation.as_ref().map(|v| v.quantity), Some(5));
        assert_eq!(rows[0].to_product().variations.len(), 0);
    }
}
