//! Filtering options for product queries.

#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::model::BrandId;

/// Filter options for products.
///
/// Both price bounds are inclusive. An empty brand list means no brand
/// filter. The same filter applies identically to windows, counts and
/// boundary probes.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct ProductFilter {
    /// Lowest price to include, in cents.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_price: Option<i32>,
    /// Highest price to include, in cents.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_price: Option<i32>,
    /// Brands to include (any match).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand_ids: Option<Vec<BrandId>>,
}

impl ProductFilter {
    /// Creates a new empty filter.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Filters out products cheaper than `price`.
    #[inline]
    pub fn with_min_price(mut self, price: i32) -> Self {
        self.min_price = Some(price);
        self
    }

    /// Filters out products more expensive than `price`.
    #[inline]
    pub fn with_max_price(mut self, price: i32) -> Self {
        self.max_price = Some(price);
        self
    }

    /// Filters by an inclusive price range.
    #[inline]
    pub fn with_price_range(self, min: i32, max: i32) -> Self {
        self.with_min_price(min).with_max_price(max)
    }

    /// Filters by brands.
    #[inline]
    pub fn with_brands(mut self, brand_ids: impl IntoIterator<Item = impl Into<BrandId>>) -> Self {
        self.brand_ids = Some(brand_ids.into_iter().map(Into::into).collect());
        self
    }

    /// Returns the brand filter, treating an empty list as absent.
    pub fn brands(&self) -> Option<&[BrandId]> {
        self.brand_ids.as_deref().filter(|ids| !ids.is_empty())
    }

    /// Returns whether any filter is active.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.min_price.is_none() && self.max_price.is_none() && self.brands().is_none()
    }
}
