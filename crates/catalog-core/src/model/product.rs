//! Product, brand and variation types.

use derive_more::{Display, From, Into};
use jiff::Timestamp;
#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Unique product identifier.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, From, Into, Serialize,
    Deserialize
)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(transparent)]
pub struct ProductId(pub i64);

/// Unique brand identifier.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, From, Into, Serialize,
    Deserialize
)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(transparent)]
pub struct BrandId(pub i64);

/// Unique variation identifier.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, From, Into, Serialize,
    Deserialize
)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(transparent)]
pub struct VariationId(pub i64);

/// Brand a product may reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct Brand {
    /// Brand identifier.
    pub id: BrandId,
    /// Display name.
    pub name: String,
}

impl Brand {
    /// Creates a new brand.
    pub fn new(id: impl Into<BrandId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// A stocked variation of a product: a size, a colour and so on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct Variation {
    /// Variation identifier.
    pub id: VariationId,
    /// Display name (XS, L, red...).
    pub name: String,
    /// Units in stock for this product.
    pub quantity: i32,
}

impl Variation {
    /// Creates a new variation.
    pub fn new(id: impl Into<VariationId>, name: impl Into<String>, quantity: i32) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            quantity,
        }
    }
}

/// A catalog product with its brand and variations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct Product {
    /// Product identifier.
    pub id: ProductId,
    /// Creation time. This is the ordering key cursors encode.
    pub created_at: Timestamp,
    /// Display name.
    pub name: String,
    /// Price in cents.
    pub price: i32,
    /// Brand, when the product references one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<Brand>,
    /// Variations in the order they were attached.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub variations: Vec<Variation>,
}

impl Product {
    /// Creates a product without brand or variations.
    pub fn new(
        id: impl Into<ProductId>,
        created_at: Timestamp,
        name: impl Into<String>,
        price: i32,
    ) -> Self {
        Self {
            id: id.into(),
            created_at,
            name: name.into(),
            price,
            brand: None,
            variations: Vec::new(),
        }
    }

    /// Attaches a brand.
    #[inline]
    pub fn with_brand(mut self, brand: Brand) -> Self {
        self.brand = Some(brand);
        self
    }

    /// Appends a variation.
    #[inline]
    pub fn with_variation(mut self, variation: Variation) -> Self {
        self.variations.push(variation);
        self
    }

    /// Returns the brand identifier, if any.
    #[inline]
    pub fn brand_id(&self) -> Option<BrandId> {
        self.brand.as_ref().map(|brand| brand.id)
    }

    /// Returns the total quantity in stock across all variations.
    pub fn total_quantity(&self) -> i64 {
        self.variations.iter().map(|v| i64::from(v.quantity)).sum()
    }
}
