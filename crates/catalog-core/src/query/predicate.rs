//! Filter predicates and their composition.

use jiff::Timestamp;

use super::Params;
use crate::model::{BrandId, Product};
use crate::types::{ProductFilter, SortOrder};

/// Strict comparison against a boundary value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    /// Strictly less than the boundary.
    Less,
    /// Strictly greater than the boundary.
    Greater,
}

impl Comparison {
    /// Comparison selecting rows that follow a boundary in `order`.
    #[inline]
    pub fn after(order: SortOrder) -> Self {
        match order {
            SortOrder::Asc => Self::Greater,
            SortOrder::Desc => Self::Less,
        }
    }

    /// Comparison selecting rows that precede a boundary in `order`.
    #[inline]
    pub fn before(order: SortOrder) -> Self {
        Self::after(order).flip()
    }

    /// Returns the opposite comparison.
    #[inline]
    pub fn flip(self) -> Self {
        match self {
            Self::Less => Self::Greater,
            Self::Greater => Self::Less,
        }
    }

    /// Returns the SQL operator.
    #[inline]
    pub fn as_sql(self) -> &'static str {
        match self {
            Self::Less => "<",
            Self::Greater => ">",
        }
    }

    /// Evaluates `value <op> boundary`.
    #[inline]
    pub fn holds<T: Ord>(self, value: &T, boundary: &T) -> bool {
        match self {
            Self::Less => value < boundary,
            Self::Greater => value > boundary,
        }
    }
}

/// A single condition on the products table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    /// `price >= n`.
    MinPrice(i32),
    /// `price <= n`.
    MaxPrice(i32),
    /// `brand_id` is one of the listed brands.
    BrandIn(Vec<BrandId>),
    /// `created_at` strictly on one side of a boundary.
    CreatedAt(Comparison, Timestamp),
}

impl Predicate {
    /// Renders the predicate, binding its values into `params`.
    pub fn render(&self, params: &mut Params) -> String {
        match self {
            Self::MinPrice(price) => format!("p.price >= {}", params.push(*price)),
            Self::MaxPrice(price) => format!("p.price <= {}", params.push(*price)),
            Self::BrandIn(brand_ids) => {
                let placeholders: Vec<String> =
                    brand_ids.iter().map(|id| params.push(id.0)).collect();
                format!("p.brand_id IN ({})", placeholders.join(", "))
            }
            Self::CreatedAt(comparison, boundary) => format!(
                "p.created_at {} {}",
                comparison.as_sql(),
                params.push(*boundary)
            ),
        }
    }

    /// Evaluates the predicate against a product.
    pub fn matches(&self, product: &Product) -> bool {
        match self {
            Self::MinPrice(price) => product.price >= *price,
            Self::MaxPrice(price) => product.price <= *price,
            Self::BrandIn(brand_ids) => product
                .brand_id()
                .is_some_and(|brand_id| brand_ids.contains(&brand_id)),
            Self::CreatedAt(comparison, boundary) => comparison.holds(&product.created_at, boundary),
        }
    }
}

/// Ordered conjunction of filter predicates plus an optional boundary.
///
/// Filters always render in the same order (price range, then brands) and
/// the boundary always renders last, so equal inputs produce equal text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Conditions {
    filters: Vec<Predicate>,
    boundary: Option<Predicate>,
}

impl Conditions {
    /// Composes the predicates of a request filter.
    pub fn from_filter(filter: &ProductFilter) -> Self {
        let mut filters = Vec::with_capacity(3);
        if let Some(price) = filter.min_price {
            filters.push(Predicate::MinPrice(price));
        }
        if let Some(price) = filter.max_price {
            filters.push(Predicate::MaxPrice(price));
        }
        if let Some(brand_ids) = filter.brands() {
            filters.push(Predicate::BrandIn(brand_ids.to_vec()));
        }

        Self {
            filters,
            boundary: None,
        }
    }

    /// Restricts the rows to one side of a creation-time boundary.
    pub fn with_boundary(mut self, comparison: Comparison, boundary: Timestamp) -> Self {
        self.boundary = Some(Predicate::CreatedAt(comparison, boundary));
        self
    }

    /// Returns the same filters without any boundary.
    pub fn without_boundary(&self) -> Self {
        Self {
            filters: self.filters.clone(),
            boundary: None,
        }
    }

    /// Returns the boundary predicate, if any.
    #[inline]
    pub fn boundary(&self) -> Option<&Predicate> {
        self.boundary.as_ref()
    }

    /// Iterates over all predicates in render order.
    pub fn predicates(&self) -> impl Iterator<Item = &Predicate> {
        self.filters.iter().chain(self.boundary.iter())
    }

    /// Returns whether there is nothing to filter on.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.filters.is_empty() && self.boundary.is_none()
    }

    /// Renders a ` WHERE ...` clause, or nothing when empty.
    pub fn render_where(&self, params: &mut Params) -> String {
        if self.is_empty() {
            return String::new();
        }

        let clauses: Vec<String> = self
            .predicates()
            .map(|predicate| predicate.render(params))
            .collect();
        format!(" WHERE {}", clauses.join(" AND "))
    }

    /// Evaluates every predicate against a product.
    pub fn matches(&self, product: &Product) -> bool {
        self.predicates().all(|predicate| predicate.matches(product))
    }
}
