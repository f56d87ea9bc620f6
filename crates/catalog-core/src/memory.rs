//! In-memory storage executor.
//!
//! [`MemoryStore`] evaluates the engine's query shapes directly against a
//! list of products, with the same predicate and ordering semantics the SQL
//! executors get from the rendered text.

use crate::model::{Product, ProductId, ProductRow};
use crate::paginate::RowSource;
use crate::query::{Conditions, CountQuery, ExistsQuery, SelectQuery};
use crate::{Error, Result, TRACING_TARGET_MEMORY};

/// Product store held in process memory.
///
/// Ordering keys are unique: a product whose `created_at` is already held by
/// another product is rejected, as the unique index does for Postgres.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    products: Vec<Product>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store from products, failing on the first duplicate ordering key.
    pub fn from_products(products: impl IntoIterator<Item = Product>) -> Result<Self> {
        let mut store = Self::new();
        for product in products {
            store.insert(product)?;
        }
        Ok(store)
    }

    /// Inserts a product, replacing and returning any product with the same id.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if another product already has the
    /// same `created_at`; the store is left unchanged.
    pub fn insert(&mut self, product: Product) -> Result<Option<Product>> {
        if let Some(taken) = self
            .products
            .iter()
            .find(|p| p.created_at == product.created_at && p.id != product.id)
        {
            tracing::warn!(
                target: TRACING_TARGET_MEMORY,
                product_id = %product.id,
                conflicting_id = %taken.id,
                created_at = %product.created_at,
                "Rejected duplicate ordering key"
            );
            return Err(Error::invalid_argument(format!(
                "created_at {} is already used by product {}",
                product.created_at, taken.id
            )));
        }

        match self.products.iter_mut().find(|p| p.id == product.id) {
            Some(existing) => Ok(Some(std::mem::replace(existing, product))),
            None => {
                self.products.push(product);
                Ok(None)
            }
        }
    }

    /// Removes a product.
    pub fn remove(&mut self, id: ProductId) -> Option<Product> {
        let position = self.products.iter().position(|p| p.id == id)?;
        Some(self.products.remove(position))
    }

    /// Returns a product by id.
    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Returns every product in insertion order.
    #[inline]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Returns the number of products.
    #[inline]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Returns whether the store is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    fn matching<'a>(&'a self, conditions: &'a Conditions) -> impl Iterator<Item = &'a Product> {
        self.products.iter().filter(|p| conditions.matches(p))
    }
}

impl RowSource for MemoryStore {
    async fn fetch_rows(&mut self, query: &SelectQuery) -> Result<Vec<ProductRow>> {
        let mut products: Vec<&Product> = self.matching(&query.conditions).collect();
        products.sort_by(|a, b| query.ordering.compare(a, b));

        let offset = usize::try_from(query.offset).unwrap_or(0);
        let limit = match query.limit {
            Some(limit) => usize::try_from(limit).unwrap_or(0),
            None => usize::MAX,
        };

        let rows: Vec<ProductRow> = products
            .into_iter()
            .skip(offset)
            .take(limit)
            .flat_map(ProductRow::fan_out)
            .collect();

        tracing::trace!(
            target: TRACING_TARGET_MEMORY,
            rows = rows.len(),
            "Evaluated window query"
        );

        Ok(rows)
    }

    async fn count_rows(&mut self, query: &CountQuery) -> Result<i64> {
        let count = self.matching(&query.conditions).count();
        Ok(i64::try_from(count).unwrap_or(i64::MAX))
    }

    async fn row_exists(&mut self, query: &ExistsQuery) -> Result<bool> {
        Ok(self.matching(&query.conditions).next().is_some())
    }
}
