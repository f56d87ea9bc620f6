//! Sorting options for product queries.

#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

use super::SortBy;

/// Fields available for sorting products.
///
/// Every ordering is completed with `created_at` and then `id` in the same
/// direction, so equal primary values still sort deterministically.
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, AsRefStr, Display,
    EnumString
)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ProductSortField {
    /// Sort by creation time. The only field cursors encode.
    #[default]
    CreatedAt,
    /// Sort by price.
    Price,
}

impl ProductSortField {
    /// Returns the qualified column this field sorts on.
    pub fn column(self) -> &'static str {
        match self {
            Self::CreatedAt => "p.created_at",
            Self::Price => "p.price",
        }
    }
}

/// Sorting specification for products.
pub type ProductSortBy = SortBy<ProductSortField>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SortOrder;

    #[test]
    fn default_is_newest_first() {
        let sort = ProductSortBy::default();
        assert_eq!(sort.field, ProductSortField::CreatedAt);
        assert_eq!(sort.order, SortOrder::Desc);
    }

    #[test]
    fn sort_deserializes_from_snake_case() {
        let sort: ProductSortBy =
            serde_json::from_str(r#"{"field": "price", "order": "asc"}"#).unwrap();
        assert_eq!(sort, ProductSortBy::asc(ProductSortField::Price));

        let sort: ProductSortBy = serde_json::from_str(r#"{"field": "created_at"}"#).unwrap();
        assert!(sort.is_desc());
        assert_eq!(
            "created_at".parse::<ProductSortField>().unwrap(),
            ProductSortField::CreatedAt
        );
    }
}
